use crate::env_utils::env_var_or;

/// Environment variable overriding [`ModelConfig::max_ancestor_depth`].
pub const MAX_ANCESTOR_DEPTH_ENV: &str = "APIVIEW_MAX_ANCESTOR_DEPTH";

/// Tunables for traversing the type graph.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Upper bound on the number of base types yielded by an ancestor walk.
    /// Valid hierarchies are acyclic, but module images are untrusted input.
    pub max_ancestor_depth: usize,
}

impl ModelConfig {
    pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 256;

    pub fn new(max_ancestor_depth: usize) -> Self {
        Self { max_ancestor_depth }
    }

    /// Defaults, overridden by `APIVIEW_MAX_ANCESTOR_DEPTH` when set and parseable.
    pub fn from_env() -> Self {
        Self {
            max_ancestor_depth: env_var_or(
                MAX_ANCESTOR_DEPTH_ENV,
                Self::DEFAULT_MAX_ANCESTOR_DEPTH,
            ),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: Self::DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(ModelConfig::default().max_ancestor_depth, 256);
    }

    #[test]
    fn test_from_env_override() {
        std::env::set_var(MAX_ANCESTOR_DEPTH_ENV, "8");
        assert_eq!(ModelConfig::from_env(), ModelConfig::new(8));
        std::env::remove_var(MAX_ANCESTOR_DEPTH_ENV);
    }
}
