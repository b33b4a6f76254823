//! apiview model
//!
//! Read-only description of the named types found in compiled modules.
//!
//! - [`accessibility`] and [`kind`]: the closed vocabularies and their
//!   classifiers from raw provider facts
//! - [`symbols`]: the [`SymbolProvider`] seam the model reads through
//! - [`node`]: [`TypeNode`], either a [`ResolvedType`] or an [`UnresolvedType`]
//!
//! # Example
//!
//! ```ignore
//! use apiview_model::{ModelConfig, TypeFactory};
//!
//! let factory = TypeFactory::new(&provider, ModelConfig::default());
//! if let Some(ty) = factory.lookup("System.Collections.Generic.List`1") {
//!     for iface in ty.interfaces() {
//!         println!("{} ({:?})", iface.name(), iface.kind());
//!     }
//! }
//! ```

pub mod accessibility;
pub mod config;
pub mod env_utils;
pub mod kind;
pub mod node;
pub mod symbols;

#[cfg(test)]
pub(crate) mod test_utils;

pub use accessibility::Accessibility;
pub use config::ModelConfig;
pub use kind::TypeKind;
pub use node::{Ancestors, Modifiers, ResolvedType, TypeFactory, TypeNode, UnresolvedType};
pub use symbols::{format_metadata_name, RawAccessibility, RawTypeKind, SymbolProvider};
