//! In-memory symbol provider for unit tests.

use crate::symbols::{format_metadata_name, RawAccessibility, RawTypeKind, SymbolProvider};

#[derive(Debug, Clone)]
pub struct FakeType {
    name: String,
    full_name: Option<String>,
    arity: usize,
    kind: RawTypeKind,
    accessibility: RawAccessibility,
    is_abstract: bool,
    is_sealed: bool,
    is_static: bool,
    is_ref_like: bool,
    is_readonly: bool,
    base: Option<usize>,
    interfaces: Vec<usize>,
    enclosing: Option<usize>,
    unresolved: bool,
    findable: bool,
    synthesized: bool,
}

impl FakeType {
    pub fn new(name: &str, kind: RawTypeKind) -> Self {
        Self {
            name: name.to_string(),
            full_name: None,
            arity: 0,
            kind,
            accessibility: RawAccessibility::Public,
            is_abstract: false,
            is_sealed: false,
            is_static: false,
            is_ref_like: false,
            is_readonly: false,
            base: None,
            interfaces: Vec::new(),
            enclosing: None,
            unresolved: false,
            findable: true,
            synthesized: false,
        }
    }

    pub fn class(name: &str) -> Self {
        Self::new(name, RawTypeKind::Class)
    }

    pub fn interface(name: &str) -> Self {
        Self::new(name, RawTypeKind::Interface)
    }

    pub fn struct_(name: &str) -> Self {
        Self::new(name, RawTypeKind::Struct)
    }

    /// A reference that did not resolve; not findable by name unless
    /// [`findable`](Self::findable) is called.
    pub fn unresolved(name: &str) -> Self {
        let mut ty = Self::new(name, RawTypeKind::Error);
        ty.accessibility = RawAccessibility::NotApplicable;
        ty.unresolved = true;
        ty.findable = false;
        ty
    }

    pub fn findable(mut self) -> Self {
        self.findable = true;
        self
    }

    pub fn full_name(mut self, full_name: &str) -> Self {
        self.full_name = Some(full_name.to_string());
        self
    }

    pub fn arity(mut self, arity: usize) -> Self {
        self.arity = arity;
        self
    }

    pub fn accessibility(mut self, accessibility: RawAccessibility) -> Self {
        self.accessibility = accessibility;
        self
    }

    pub fn abstract_(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn ref_like(mut self) -> Self {
        self.is_ref_like = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.is_readonly = true;
        self
    }

    pub fn base(mut self, base: usize) -> Self {
        self.base = Some(base);
        self
    }

    pub fn interfaces(mut self, interfaces: Vec<usize>) -> Self {
        self.interfaces = interfaces;
        self
    }

    pub fn enclosing(mut self, enclosing: usize) -> Self {
        self.enclosing = Some(enclosing);
        self
    }

    pub fn synthesized(mut self) -> Self {
        self.synthesized = true;
        self
    }

    fn lookup_name(&self) -> String {
        self.full_name
            .clone()
            .unwrap_or_else(|| format_metadata_name(&self.name, self.arity))
    }
}

#[derive(Debug, Default)]
pub struct FakeProvider {
    types: Vec<FakeType>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ty: FakeType) -> usize {
        self.types.push(ty);
        self.types.len() - 1
    }

    pub fn set_base(&mut self, id: usize, base: usize) {
        self.types[id].base = Some(base);
    }
}

impl SymbolProvider for FakeProvider {
    type Symbol = usize;

    fn find_named_type(&self, metadata_name: &str) -> Option<usize> {
        self.types.iter().position(|t| {
            t.findable && !t.synthesized && t.lookup_name() == metadata_name
        })
    }

    fn is_unresolved_reference(&self, symbol: &usize) -> bool {
        self.types[*symbol].unresolved
    }

    fn raw_kind(&self, symbol: &usize) -> RawTypeKind {
        self.types[*symbol].kind
    }

    fn raw_accessibility(&self, symbol: &usize) -> RawAccessibility {
        self.types[*symbol].accessibility
    }

    fn is_abstract(&self, symbol: &usize) -> bool {
        self.types[*symbol].is_abstract
    }

    fn is_sealed(&self, symbol: &usize) -> bool {
        self.types[*symbol].is_sealed
    }

    fn is_generic(&self, symbol: &usize) -> bool {
        self.types[*symbol].arity > 0
    }

    fn is_static(&self, symbol: &usize) -> bool {
        self.types[*symbol].is_static
    }

    fn is_ref_like(&self, symbol: &usize) -> bool {
        self.types[*symbol].is_ref_like
    }

    fn is_readonly(&self, symbol: &usize) -> bool {
        self.types[*symbol].is_readonly
    }

    fn base_type_symbol(&self, symbol: &usize) -> Option<usize> {
        self.types[*symbol].base
    }

    fn declared_interface_symbols(&self, symbol: &usize) -> Vec<usize> {
        self.types[*symbol].interfaces.clone()
    }

    fn metadata_name(&self, symbol: &usize) -> &str {
        &self.types[*symbol].name
    }

    fn arity(&self, symbol: &usize) -> usize {
        self.types[*symbol].arity
    }

    fn enclosing_type_symbol(&self, symbol: &usize) -> Option<usize> {
        self.types[*symbol].enclosing
    }

    fn is_compiler_synthesized(&self, symbol: &usize) -> bool {
        self.types[*symbol].synthesized
    }
}
