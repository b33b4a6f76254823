//! Kinds of named types.

use serde::Serialize;

use crate::symbols::RawTypeKind;

/// Closed set of named type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    /// The type is referenced by metadata but was not found in any supplied
    /// module, so its real kind is unknown.
    Missing,
}

/// Map a raw kind fact onto [`TypeKind`].
///
/// # Panics
///
/// Panics on raw kinds that do not describe a named type (arrays, pointers,
/// type parameters, ...). Every raw kind is listed, so a new one does not
/// compile here until it is placed on one side or the other.
pub fn classify(raw: RawTypeKind) -> TypeKind {
    match raw {
        RawTypeKind::Class => TypeKind::Class,
        RawTypeKind::Interface => TypeKind::Interface,
        RawTypeKind::Struct => TypeKind::Struct,
        RawTypeKind::Enum => TypeKind::Enum,
        RawTypeKind::Delegate => TypeKind::Delegate,
        RawTypeKind::Error => TypeKind::Missing,
        other @ (RawTypeKind::Array
        | RawTypeKind::Pointer
        | RawTypeKind::FunctionPointer
        | RawTypeKind::TypeParameter
        | RawTypeKind::Module) => panic!("type with unknown kind '{other:?}'"),
    }
}
