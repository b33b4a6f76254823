//! The symbol provider seam.
//!
//! The model never owns a symbol table. It holds opaque [`SymbolProvider::Symbol`]
//! keys and asks the provider for raw facts when a node is built or when a
//! relation (base type, interfaces, enclosing type) is followed.

use std::fmt;
use std::hash::Hash;

/// Raw declared accessibility as reported by a symbol provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RawAccessibility {
    NotApplicable,
    Private,
    /// `private protected` in source.
    ProtectedAndInternal,
    Protected,
    Internal,
    /// `protected internal` in source.
    ProtectedOrInternal,
    Public,
}

/// Raw type kind as reported by a symbol provider.
///
/// Wider than [`TypeKind`](crate::TypeKind): providers can describe
/// constructed and non-named types as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RawTypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
    /// A referenced type that could not be located.
    Error,
    Array,
    Pointer,
    FunctionPointer,
    TypeParameter,
    Module,
}

/// Source of raw type facts, typically backed by loaded module images.
///
/// Methods other than [`metadata_name`](SymbolProvider::metadata_name),
/// [`arity`](SymbolProvider::arity) and
/// [`enclosing_type_symbol`](SymbolProvider::enclosing_type_symbol) are only
/// meaningful for symbols that are not unresolved references.
pub trait SymbolProvider {
    /// Opaque, cheap-to-clone key identifying a symbol inside this provider.
    type Symbol: Clone + Eq + Hash + fmt::Debug;

    /// Find a declared type by its fully qualified metadata name
    /// (e.g. ``Namespace.Outer+Inner`1``).
    fn find_named_type(&self, metadata_name: &str) -> Option<Self::Symbol>;

    /// Whether the symbol is a reference that did not resolve to any definition.
    fn is_unresolved_reference(&self, symbol: &Self::Symbol) -> bool;

    fn raw_kind(&self, symbol: &Self::Symbol) -> RawTypeKind;

    fn raw_accessibility(&self, symbol: &Self::Symbol) -> RawAccessibility;

    fn is_abstract(&self, symbol: &Self::Symbol) -> bool;

    fn is_sealed(&self, symbol: &Self::Symbol) -> bool;

    fn is_generic(&self, symbol: &Self::Symbol) -> bool;

    fn is_static(&self, symbol: &Self::Symbol) -> bool;

    fn is_ref_like(&self, symbol: &Self::Symbol) -> bool;

    fn is_readonly(&self, symbol: &Self::Symbol) -> bool;

    /// Base type, `None` for root types and interfaces.
    fn base_type_symbol(&self, symbol: &Self::Symbol) -> Option<Self::Symbol>;

    /// Directly declared interfaces in declaration order.
    fn declared_interface_symbols(&self, symbol: &Self::Symbol) -> Vec<Self::Symbol>;

    /// The symbol's own name, without namespace, enclosing types or arity suffix.
    fn metadata_name(&self, symbol: &Self::Symbol) -> &str;

    /// Number of type parameters declared directly on the symbol.
    fn arity(&self, symbol: &Self::Symbol) -> usize;

    fn enclosing_type_symbol(&self, symbol: &Self::Symbol) -> Option<Self::Symbol>;

    /// Whether the symbol was synthesized by a compiler rather than declared.
    fn is_compiler_synthesized(&self, symbol: &Self::Symbol) -> bool;
}

/// Append the generic arity suffix (`` `N ``) to a simple name when `arity > 0`.
pub fn format_metadata_name(name: &str, arity: usize) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}`{arity}")
    }
}
