//! Type nodes: immutable descriptions of named types.
//!
//! A [`TypeNode`] is either [`Resolved`](TypeNode::Resolved), when its
//! declaration was found in the supplied modules, or
//! [`Unresolved`](TypeNode::Unresolved), when metadata only mentions it. Only
//! the name, kind and enclosing type are available on both arms; everything
//! else lives on [`ResolvedType`].
//!
//! Nodes borrow the provider and build related nodes on demand. Nothing is
//! cached, so following `base_type()` twice builds two equal nodes.

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::accessibility::{self, Accessibility};
use crate::config::ModelConfig;
use crate::kind::{self, TypeKind};
use crate::symbols::{format_metadata_name, RawTypeKind, SymbolProvider};

/// Modifier flags of a resolved type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Modifiers {
    pub is_abstract: bool,
    pub is_sealed: bool,
    pub is_generic: bool,
    pub is_static: bool,
    pub is_ref_like: bool,
    pub is_readonly: bool,
}

/// Builds [`TypeNode`]s for the symbols of one provider.
pub struct TypeFactory<'p, P: SymbolProvider + ?Sized> {
    provider: &'p P,
    config: ModelConfig,
}

impl<'p, P: SymbolProvider + ?Sized> Clone for TypeFactory<'p, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'p, P: SymbolProvider + ?Sized> Copy for TypeFactory<'p, P> {}

impl<'p, P: SymbolProvider + ?Sized> TypeFactory<'p, P> {
    pub fn new(provider: &'p P, config: ModelConfig) -> Self {
        Self { provider, config }
    }

    pub fn provider(&self) -> &'p P {
        self.provider
    }

    pub fn config(&self) -> ModelConfig {
        self.config
    }

    /// Look up a declared type by fully qualified metadata name.
    ///
    /// Returns `None` when no such type exists. Never returns an unresolved
    /// node: "not found" and "referenced but missing" are different things.
    pub fn lookup(&self, metadata_name: &str) -> Option<ResolvedType<'p, P>> {
        let symbol = self.provider.find_named_type(metadata_name)?;
        match self.describe(symbol) {
            TypeNode::Resolved(ty) => Some(ty),
            TypeNode::Unresolved(_) => {
                debug!(
                    name = metadata_name,
                    "lookup matched an unresolved reference; reporting not found"
                );
                None
            }
        }
    }

    /// Wrap a provider symbol in a node.
    ///
    /// # Panics
    ///
    /// Panics when the symbol is compiler synthesized; only declared types
    /// are described.
    pub fn describe(&self, symbol: P::Symbol) -> TypeNode<'p, P> {
        let provider = self.provider;
        assert!(
            !provider.is_compiler_synthesized(&symbol),
            "type descriptions do not support compiler generated types ({symbol:?})"
        );

        let name = format_metadata_name(provider.metadata_name(&symbol), provider.arity(&symbol));

        if provider.is_unresolved_reference(&symbol)
            || provider.raw_kind(&symbol) == RawTypeKind::Error
        {
            return TypeNode::Unresolved(UnresolvedType {
                factory: *self,
                symbol,
                name,
            });
        }

        let kind = kind::classify(provider.raw_kind(&symbol));
        let accessibility = accessibility::classify(provider.raw_accessibility(&symbol));
        let modifiers = Modifiers {
            is_abstract: provider.is_abstract(&symbol),
            is_sealed: provider.is_sealed(&symbol),
            is_generic: provider.is_generic(&symbol),
            is_static: provider.is_static(&symbol),
            is_ref_like: provider.is_ref_like(&symbol),
            is_readonly: provider.is_readonly(&symbol),
        };

        TypeNode::Resolved(ResolvedType {
            factory: *self,
            symbol,
            name,
            kind,
            accessibility,
            modifiers,
        })
    }

    fn parent_of(&self, symbol: &P::Symbol) -> Option<TypeNode<'p, P>> {
        self.provider
            .enclosing_type_symbol(symbol)
            .map(|outer| self.describe(outer))
    }
}

/// Description of one named type, found or missing.
pub enum TypeNode<'p, P: SymbolProvider + ?Sized> {
    Resolved(ResolvedType<'p, P>),
    Unresolved(UnresolvedType<'p, P>),
}

impl<'p, P: SymbolProvider + ?Sized> TypeNode<'p, P> {
    /// Metadata name with arity suffix, without namespace or enclosing types.
    pub fn name(&self) -> &str {
        match self {
            TypeNode::Resolved(ty) => ty.name(),
            TypeNode::Unresolved(ty) => ty.name(),
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeNode::Resolved(ty) => ty.kind(),
            TypeNode::Unresolved(_) => TypeKind::Missing,
        }
    }

    pub fn parent(&self) -> Option<TypeNode<'p, P>> {
        match self {
            TypeNode::Resolved(ty) => ty.parent(),
            TypeNode::Unresolved(ty) => ty.parent(),
        }
    }

    /// Declared accessibility; `None` for unresolved types, which have none.
    pub fn accessibility(&self) -> Option<Accessibility> {
        self.as_resolved().map(ResolvedType::accessibility)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, TypeNode::Unresolved(_))
    }

    pub fn as_resolved(&self) -> Option<&ResolvedType<'p, P>> {
        match self {
            TypeNode::Resolved(ty) => Some(ty),
            TypeNode::Unresolved(_) => None,
        }
    }

    pub fn into_resolved(self) -> Option<ResolvedType<'p, P>> {
        match self {
            TypeNode::Resolved(ty) => Some(ty),
            TypeNode::Unresolved(_) => None,
        }
    }

    pub fn symbol(&self) -> &P::Symbol {
        match self {
            TypeNode::Resolved(ty) => &ty.symbol,
            TypeNode::Unresolved(ty) => &ty.symbol,
        }
    }
}

impl<'p, P: SymbolProvider + ?Sized> PartialEq for TypeNode<'p, P> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeNode::Resolved(a), TypeNode::Resolved(b)) => a == b,
            (TypeNode::Unresolved(a), TypeNode::Unresolved(b)) => a == b,
            _ => false,
        }
    }
}

impl<'p, P: SymbolProvider + ?Sized> fmt::Debug for TypeNode<'p, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Resolved(ty) => f.debug_tuple("Resolved").field(ty).finish(),
            TypeNode::Unresolved(ty) => f.debug_tuple("Unresolved").field(ty).finish(),
        }
    }
}

/// A named type whose declaration was found: class, interface, struct, enum
/// or delegate.
pub struct ResolvedType<'p, P: SymbolProvider + ?Sized> {
    factory: TypeFactory<'p, P>,
    symbol: P::Symbol,
    name: String,
    kind: TypeKind,
    accessibility: Accessibility,
    modifiers: Modifiers,
}

impl<'p, P: SymbolProvider + ?Sized> ResolvedType<'p, P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Never [`TypeKind::Missing`].
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn accessibility(&self) -> Accessibility {
        self.accessibility
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.is_abstract
    }

    pub fn is_sealed(&self) -> bool {
        self.modifiers.is_sealed
    }

    pub fn is_generic(&self) -> bool {
        self.modifiers.is_generic
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.is_static
    }

    /// `ref struct` in source.
    pub fn is_ref_like(&self) -> bool {
        self.modifiers.is_ref_like
    }

    pub fn is_readonly(&self) -> bool {
        self.modifiers.is_readonly
    }

    pub fn symbol(&self) -> &P::Symbol {
        &self.symbol
    }

    /// Enclosing type for nested types.
    pub fn parent(&self) -> Option<TypeNode<'p, P>> {
        self.factory.parent_of(&self.symbol)
    }

    /// The base type, or `None` for root types (and interfaces).
    ///
    /// A base that cannot be located is an unresolved node, not `None`.
    pub fn base_type(&self) -> Option<TypeNode<'p, P>> {
        self.factory
            .provider
            .base_type_symbol(&self.symbol)
            .map(|base| self.factory.describe(base))
    }

    /// Directly declared interfaces in declaration order, each resolved or not.
    pub fn interfaces(&self) -> Vec<TypeNode<'p, P>> {
        self.factory
            .provider
            .declared_interface_symbols(&self.symbol)
            .into_iter()
            .map(|iface| self.factory.describe(iface))
            .collect()
    }

    /// Walk the base type chain, nearest first.
    ///
    /// Ends at a root type, after an unresolved base, or after
    /// [`ModelConfig::max_ancestor_depth`] steps.
    pub fn ancestors(&self) -> Ancestors<'p, P> {
        Ancestors {
            next: self.base_type(),
            remaining: self.factory.config.max_ancestor_depth,
            origin: self.name.clone(),
        }
    }
}

impl<'p, P: SymbolProvider + ?Sized> PartialEq for ResolvedType<'p, P> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol
            && self.name == other.name
            && self.kind == other.kind
            && self.accessibility == other.accessibility
            && self.modifiers == other.modifiers
    }
}

impl<'p, P: SymbolProvider + ?Sized> fmt::Debug for ResolvedType<'p, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedType")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("accessibility", &self.accessibility)
            .field("modifiers", &self.modifiers)
            .field("symbol", &self.symbol)
            .finish()
    }
}

/// A type mentioned by metadata but absent from every supplied module.
///
/// Only its name and enclosing type are known.
pub struct UnresolvedType<'p, P: SymbolProvider + ?Sized> {
    factory: TypeFactory<'p, P>,
    symbol: P::Symbol,
    name: String,
}

impl<'p, P: SymbolProvider + ?Sized> UnresolvedType<'p, P> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> TypeKind {
        TypeKind::Missing
    }

    /// Enclosing type, which may itself be resolved or unresolved.
    pub fn parent(&self) -> Option<TypeNode<'p, P>> {
        self.factory.parent_of(&self.symbol)
    }

    pub fn symbol(&self) -> &P::Symbol {
        &self.symbol
    }
}

impl<'p, P: SymbolProvider + ?Sized> PartialEq for UnresolvedType<'p, P> {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.name == other.name
    }
}

impl<'p, P: SymbolProvider + ?Sized> fmt::Debug for UnresolvedType<'p, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnresolvedType")
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .finish()
    }
}

/// Iterator over a type's base chain. See [`ResolvedType::ancestors`].
pub struct Ancestors<'p, P: SymbolProvider + ?Sized> {
    next: Option<TypeNode<'p, P>>,
    remaining: usize,
    origin: String,
}

impl<'p, P: SymbolProvider + ?Sized> Iterator for Ancestors<'p, P> {
    type Item = TypeNode<'p, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next.take()?;
        if self.remaining == 0 {
            warn!(
                origin = %self.origin,
                at = node.name(),
                "ancestor walk hit the depth limit; base chain is cyclic or too deep"
            );
            return None;
        }
        self.remaining -= 1;
        self.next = match &node {
            TypeNode::Resolved(ty) => ty.base_type(),
            TypeNode::Unresolved(_) => None,
        };
        Some(node)
    }
}
