//! Tracing setup for the `apiview` binary.
//!
//! Output format is chosen by `APIVIEW_LOG_FORMAT`:
//!
//! - `text` (default): plain `tracing-subscriber` lines
//! - `json`: one JSON object per event
//!
//! ```bash
//! APIVIEW_LOG=debug apiview describe --image-dir out/ Shapes.Circle
//! APIVIEW_LOG="apiview_metadata=debug" APIVIEW_LOG_FORMAT=json apiview describe ...
//! ```
//!
//! Nothing is installed unless `APIVIEW_LOG` or `RUST_LOG` is set.

use apiview_model::env_utils::env_string_or;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

pub const LOG_ENV: &str = "APIVIEW_LOG";
pub const LOG_FORMAT_ENV: &str = "APIVIEW_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&env_string_or(LOG_FORMAT_ENV, "text"))
    }
}

/// `APIVIEW_LOG` wins over `RUST_LOG` when both are set.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Install the global subscriber. All output goes to stderr so stdout stays
/// clean JSON.
pub fn init_tracing() {
    if std::env::var(LOG_ENV).is_err() && std::env::var("RUST_LOG").is_err() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
