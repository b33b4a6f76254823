//! Declared accessibility of a type and its classification from raw symbol facts.

use serde::Serialize;

use crate::symbols::RawAccessibility;

/// The accessibilities a declared type can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    Public,
    Protected,
    Internal,
    /// `protected internal`: visible to derived types or the declaring module.
    ProtectedInternal,
    /// `private protected`: visible to derived types within the declaring module.
    PrivateProtected,
    Private,
    /// The raw symbol has no meaningful accessibility.
    Unknown,
}

impl Accessibility {
    /// Source-level keyword spelling, e.g. `"protected internal"`.
    pub fn keyword(self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Private => "private",
            Accessibility::Unknown => "unknown",
        }
    }
}

/// Map a raw accessibility fact onto [`Accessibility`].
///
/// Total over [`RawAccessibility`]. The match lists every raw value, so a
/// new one does not compile here until it has a mapping.
pub fn classify(raw: RawAccessibility) -> Accessibility {
    match raw {
        RawAccessibility::Public => Accessibility::Public,
        RawAccessibility::Protected => Accessibility::Protected,
        RawAccessibility::ProtectedOrInternal => Accessibility::ProtectedInternal,
        RawAccessibility::Internal => Accessibility::Internal,
        RawAccessibility::ProtectedAndInternal => Accessibility::PrivateProtected,
        RawAccessibility::Private => Accessibility::Private,
        RawAccessibility::NotApplicable => Accessibility::Unknown,
    }
}
