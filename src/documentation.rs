//! Registry of the types declared in a set of module images.
//!
//! ```ignore
//! let docs = Documentation::builder()
//!     .add_image(std::fs::read("corlib.avmi")?)
//!     .add_image_dir(Path::new("out/"))?
//!     .build()?;
//! let circle = docs.get_metadata_type("Shapes.Circle");
//! ```

use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use apiview_metadata::{
    image_digest, image_digest_hex, list_image_files, read_image_bytes, ImageError,
    MetadataSymbolProvider, ModuleImage,
};
use apiview_model::{ModelConfig, ResolvedType, TypeFactory, TypeNode};

/// Resolved type backed by module images.
pub type MetadataType<'d> = ResolvedType<'d, MetadataSymbolProvider>;

/// Type node backed by module images.
pub type MetadataNode<'d> = TypeNode<'d, MetadataSymbolProvider>;

/// Errors from [`DocumentationBuilder::build`].
#[derive(Debug)]
pub enum BuildError {
    /// No images were added.
    NoInputs,
    /// An image could not be decoded or failed validation.
    MalformedImage {
        /// Where the image came from: a file path or `image #N`.
        origin: String,
        source: ImageError,
    },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::NoInputs => {
                write!(f, "Unable to create documentation with no inputs")
            }
            BuildError::MalformedImage { origin, source } => {
                write!(f, "malformed module image {}: {}", origin, source)
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::NoInputs => None,
            BuildError::MalformedImage { source, .. } => Some(source),
        }
    }
}

/// Types declared in a fixed set of module images.
///
/// Immutable once built; every node it hands out borrows it.
#[derive(Debug)]
pub struct Documentation {
    provider: MetadataSymbolProvider,
    config: ModelConfig,
}

impl Documentation {
    pub fn builder() -> DocumentationBuilder {
        DocumentationBuilder::default()
    }

    /// Look up a declared type by metadata name (``Ns.Outer+Inner`1``).
    ///
    /// `None` when no supplied image declares exactly one type of that name.
    pub fn get_metadata_type(&self, metadata_name: &str) -> Option<MetadataType<'_>> {
        self.factory().lookup(metadata_name)
    }

    pub fn factory(&self) -> TypeFactory<'_, MetadataSymbolProvider> {
        TypeFactory::new(&self.provider, self.config)
    }

    pub fn provider(&self) -> &MetadataSymbolProvider {
        &self.provider
    }

    pub fn config(&self) -> ModelConfig {
        self.config
    }

    /// Names of the modules this documentation was built from, in input order.
    pub fn module_names(&self) -> Vec<&str> {
        self.provider.images().iter().map(|i| i.name.as_str()).collect()
    }
}

#[derive(Debug)]
struct PendingImage {
    origin: String,
    bytes: Vec<u8>,
}

/// Collects module images for a [`Documentation`].
#[derive(Debug)]
pub struct DocumentationBuilder {
    inputs: Vec<PendingImage>,
    config: ModelConfig,
}

impl Default for DocumentationBuilder {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            config: ModelConfig::from_env(),
        }
    }
}

impl DocumentationBuilder {
    /// Add one encoded module image. Decoding happens in [`build`](Self::build).
    pub fn add_image(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        let origin = format!("image #{}", self.inputs.len());
        self.inputs.push(PendingImage {
            origin,
            bytes: bytes.into(),
        });
        self
    }

    pub fn add_image_file(mut self, path: &Path) -> Result<Self> {
        let bytes = read_image_bytes(path)?;
        self.inputs.push(PendingImage {
            origin: path.display().to_string(),
            bytes,
        });
        Ok(self)
    }

    /// Add every `*.avmi` file in `dir`, in sorted order.
    pub fn add_image_dir(mut self, dir: &Path) -> Result<Self> {
        for path in list_image_files(dir)? {
            self = self.add_image_file(&path)?;
        }
        Ok(self)
    }

    pub fn with_config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    pub fn image_count(&self) -> usize {
        self.inputs.len()
    }

    /// Decode and index the collected images.
    ///
    /// Byte-identical images are kept once.
    pub fn build(self) -> std::result::Result<Documentation, BuildError> {
        if self.inputs.is_empty() {
            return Err(BuildError::NoInputs);
        }

        let mut seen = HashSet::new();
        let mut images: Vec<ModuleImage> = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            if !seen.insert(image_digest(&input.bytes)) {
                debug!(
                    origin = %input.origin,
                    digest = %image_digest_hex(&input.bytes),
                    "skipping duplicate module image"
                );
                continue;
            }
            let image =
                ModuleImage::from_bytes(&input.bytes).map_err(|source| BuildError::MalformedImage {
                    origin: input.origin.clone(),
                    source,
                })?;
            images.push(image);
        }

        info!(
            images = images.len(),
            inputs = self.inputs.len(),
            "built documentation"
        );
        Ok(Documentation {
            provider: MetadataSymbolProvider::new(images),
            config: self.config,
        })
    }
}
