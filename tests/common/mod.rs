#![allow(unused_imports)]
//! Shared utilities for the integration tests.
//!
//! - `fixtures`: module images built with `ImageWriter`
//! - `assertions`: assertion helpers with readable failure messages

pub mod assertions;
pub mod fixtures;

pub use assertions::{assert_err, assert_error_contains, assert_node, assert_ok};
pub use fixtures::{corlib_image, cyclic_image, documentation, library_image, write_images};
