//! JSON snapshots of type descriptions.

use serde::Serialize;

use apiview_model::{Accessibility, Modifiers, ResolvedType, SymbolProvider, TypeKind, TypeNode};

/// A related type as it appears inside a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRefJson {
    pub name: String,
    pub kind: TypeKind,
}

impl TypeRefJson {
    pub fn from_node<P: SymbolProvider + ?Sized>(node: &TypeNode<'_, P>) -> Self {
        Self {
            name: node.name().to_string(),
            kind: node.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptionJson {
    pub name: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub modifiers: Modifiers,
    pub parent: Option<TypeRefJson>,
    pub base: Option<TypeRefJson>,
    pub interfaces: Vec<TypeRefJson>,
    /// Base chain nearest first; present only when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<TypeRefJson>>,
}

impl TypeDescriptionJson {
    pub fn from_resolved<P: SymbolProvider + ?Sized>(ty: &ResolvedType<'_, P>) -> Self {
        Self {
            name: ty.name().to_string(),
            kind: ty.kind(),
            accessibility: ty.accessibility(),
            modifiers: ty.modifiers(),
            parent: ty.parent().as_ref().map(TypeRefJson::from_node),
            base: ty.base_type().as_ref().map(TypeRefJson::from_node),
            interfaces: ty.interfaces().iter().map(TypeRefJson::from_node).collect(),
            ancestors: None,
        }
    }

    pub fn with_ancestors<P: SymbolProvider + ?Sized>(mut self, ty: &ResolvedType<'_, P>) -> Self {
        self.ancestors = Some(ty.ancestors().map(|a| TypeRefJson::from_node(&a)).collect());
        self
    }
}
