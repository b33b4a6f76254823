//! Type definition flags.
//!
//! The low bits follow ECMA-335 `TypeAttributes`. The high bits are specific
//! to this image format and stand in for the marker attributes a full
//! metadata reader would decode (`IsByRefLike`, `IsReadOnly`,
//! `CompilerGenerated`).

use bitflags::bitflags;

use apiview_model::RawAccessibility;

/// Mask selecting the [`Visibility`] bits of a flags word.
pub const VISIBILITY_MASK: u32 = 0x0000_0007;

bitflags! {
    /// Non-visibility attributes of a type definition.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeAttributes: u32 {
        const INTERFACE = 0x0000_0020;
        const ABSTRACT = 0x0000_0080;
        const SEALED = 0x0000_0100;
        const BY_REF_LIKE = 0x1000_0000;
        const READ_ONLY = 0x2000_0000;
        const COMPILER_GENERATED = 0x4000_0000;
    }
}

/// Visibility of a type definition, stored in the low three flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Visibility {
    /// Top-level, visible within the module's assembly only.
    NotPublic = 0,
    Public = 1,
    NestedPublic = 2,
    NestedPrivate = 3,
    /// `protected`
    NestedFamily = 4,
    /// `internal`
    NestedAssembly = 5,
    /// `private protected`
    NestedFamAndAssem = 6,
    /// `protected internal`
    NestedFamOrAssem = 7,
}

impl Visibility {
    pub fn from_flags(flags: u32) -> Self {
        match flags & VISIBILITY_MASK {
            0 => Visibility::NotPublic,
            1 => Visibility::Public,
            2 => Visibility::NestedPublic,
            3 => Visibility::NestedPrivate,
            4 => Visibility::NestedFamily,
            5 => Visibility::NestedAssembly,
            6 => Visibility::NestedFamAndAssem,
            _ => Visibility::NestedFamOrAssem,
        }
    }

    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn is_nested(self) -> bool {
        !matches!(self, Visibility::NotPublic | Visibility::Public)
    }

    pub fn to_raw_accessibility(self) -> RawAccessibility {
        match self {
            Visibility::NotPublic | Visibility::NestedAssembly => RawAccessibility::Internal,
            Visibility::Public | Visibility::NestedPublic => RawAccessibility::Public,
            Visibility::NestedPrivate => RawAccessibility::Private,
            Visibility::NestedFamily => RawAccessibility::Protected,
            Visibility::NestedFamAndAssem => RawAccessibility::ProtectedAndInternal,
            Visibility::NestedFamOrAssem => RawAccessibility::ProtectedOrInternal,
        }
    }
}

/// Pack a visibility and attributes into one flags word.
pub fn compose_flags(visibility: Visibility, attributes: TypeAttributes) -> u32 {
    visibility.bits() | attributes.bits()
}

/// Split a flags word; unknown bits are retained in the attributes.
pub fn split_flags(flags: u32) -> (Visibility, TypeAttributes) {
    (
        Visibility::from_flags(flags),
        TypeAttributes::from_bits_retain(flags & !VISIBILITY_MASK),
    )
}
