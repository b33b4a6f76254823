//! apiview
//!
//! Describe the named types declared in compiled module images: their kind,
//! accessibility, modifiers, enclosing type, base type and interfaces.
//!
//! - [`documentation`]: [`Documentation`], the registry built from images
//! - [`export`]: serde snapshots of type descriptions
//! - [`logging`]: tracing setup for the CLI
//!
//! The type model lives in [`apiview_model`] and the image format in
//! [`apiview_metadata`]; both are re-exported.

pub mod documentation;
pub mod export;
pub mod logging;

pub use apiview_metadata;
pub use apiview_model;

pub use apiview_model::{Accessibility, ModelConfig, TypeKind};
pub use documentation::{BuildError, Documentation, DocumentationBuilder, MetadataNode, MetadataType};
pub use export::{TypeDescriptionJson, TypeRefJson};
