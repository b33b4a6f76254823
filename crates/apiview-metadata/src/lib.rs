//! Module images and the symbol provider that reads them.
//!
//! - [`image`]: the on-disk table format and its validation
//! - [`flags`]: visibility and attribute bits of type definitions
//! - [`writer`]: [`ImageWriter`] for building images in code and tests
//! - [`provider`]: [`MetadataSymbolProvider`], the
//!   [`SymbolProvider`](apiview_model::SymbolProvider) over a set of images
//! - [`loader`]: file and directory helpers

pub mod flags;
pub mod image;
pub mod loader;
pub mod provider;
pub mod writer;

pub use flags::{TypeAttributes, Visibility};
pub use image::{image_digest, image_digest_hex, ImageError, ModuleImage, TypeHandle};
pub use loader::{
    list_image_files, read_image_bytes, read_image_dir, read_image_file, write_image_file,
    IMAGE_EXTENSION,
};
pub use provider::{MetadataSymbol, MetadataSymbolProvider};
pub use writer::{ImageWriter, TypeDefBuilder};
