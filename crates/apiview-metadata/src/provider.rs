//! [`SymbolProvider`] over a set of decoded module images.
//!
//! Definitions are indexed by full metadata name across all images. Type
//! references resolve through the same index, so a reference to a type defined
//! in another supplied image becomes that definition, and a reference to a
//! type nobody defines stays an unresolved [`MetadataSymbol::Reference`].

use std::collections::HashMap;

use tracing::{debug, warn};

use apiview_model::{RawAccessibility, RawTypeKind, SymbolProvider};

use crate::flags::TypeAttributes;
use crate::image::{ModuleImage, TypeDefRow, TypeHandle, TypeRefRow};

const SYSTEM_OBJECT: &str = "System.Object";
const SYSTEM_VALUE_TYPE: &str = "System.ValueType";
const SYSTEM_ENUM: &str = "System.Enum";
const SYSTEM_MULTICAST_DELEGATE: &str = "System.MulticastDelegate";

/// Key of a symbol inside a [`MetadataSymbolProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetadataSymbol {
    /// A type definition row.
    Definition { image: u32, row: u32 },
    /// A type reference row that matched no definition.
    Reference { image: u32, row: u32 },
}

#[derive(Debug, Clone, Copy)]
enum NameEntry {
    Unique(MetadataSymbol),
    /// Defined by more than one row; treated as not found.
    Ambiguous,
}

/// Symbol provider backed by decoded [`ModuleImage`]s.
#[derive(Debug)]
pub struct MetadataSymbolProvider {
    images: Vec<ModuleImage>,
    by_name: HashMap<String, NameEntry>,
}

impl MetadataSymbolProvider {
    /// Index the given images. Images are expected to be validated already
    /// (as [`ModuleImage::from_bytes`] does), which guarantees that no
    /// declared type reaches a compiler-generated row as base, interface or
    /// enclosing type. Rows nested in compiler-generated rows are not indexed.
    pub fn new(images: Vec<ModuleImage>) -> Self {
        let mut by_name: HashMap<String, NameEntry> = HashMap::new();
        for (image_idx, image) in images.iter().enumerate() {
            let mut indexed = 0usize;
            for row in 0..image.type_defs.len() {
                if image.is_def_synthesized(row as u32) {
                    continue;
                }
                let full_name = image.def_full_name(row as u32);
                let symbol = MetadataSymbol::Definition {
                    image: image_idx as u32,
                    row: row as u32,
                };
                by_name
                    .entry(full_name)
                    .and_modify(|entry| *entry = NameEntry::Ambiguous)
                    .or_insert(NameEntry::Unique(symbol));
                indexed += 1;
            }
            debug!(
                module = %image.name,
                types = indexed,
                references = image.type_refs.len(),
                "indexed module image"
            );
        }
        for (name, entry) in &by_name {
            if let NameEntry::Ambiguous = entry {
                warn!(name = %name, "type defined by more than one module; lookups will not find it");
            }
        }
        Self { images, by_name }
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    pub fn images(&self) -> &[ModuleImage] {
        &self.images
    }

    /// Full metadata name of a symbol (``Ns.Outer+Inner`1``).
    pub fn full_name(&self, symbol: &MetadataSymbol) -> String {
        match *symbol {
            MetadataSymbol::Definition { image, row } => {
                self.images[image as usize].def_full_name(row)
            }
            MetadataSymbol::Reference { image, row } => {
                self.images[image as usize].ref_full_name(row)
            }
        }
    }

    /// Name of the module image declaring a definition; `None` for
    /// unresolved references.
    pub fn module_name(&self, symbol: &MetadataSymbol) -> Option<&str> {
        match *symbol {
            MetadataSymbol::Definition { image, .. } => Some(&self.images[image as usize].name),
            MetadataSymbol::Reference { .. } => None,
        }
    }

    fn lookup_unique(&self, full_name: &str) -> Option<MetadataSymbol> {
        match self.by_name.get(full_name) {
            Some(NameEntry::Unique(symbol)) => Some(*symbol),
            Some(NameEntry::Ambiguous) | None => None,
        }
    }

    fn resolve_ref(&self, image: u32, row: u32) -> MetadataSymbol {
        let full_name = self.images[image as usize].ref_full_name(row);
        self.lookup_unique(&full_name)
            .unwrap_or(MetadataSymbol::Reference { image, row })
    }

    fn resolve(&self, image: u32, handle: TypeHandle) -> MetadataSymbol {
        match handle {
            TypeHandle::Def(row) => MetadataSymbol::Definition { image, row },
            TypeHandle::Ref(row) => self.resolve_ref(image, row),
        }
    }

    fn def(&self, symbol: &MetadataSymbol) -> Option<&TypeDefRow> {
        match *symbol {
            MetadataSymbol::Definition { image, row } => {
                Some(&self.images[image as usize].type_defs[row as usize])
            }
            MetadataSymbol::Reference { .. } => None,
        }
    }

    fn type_ref(&self, image: u32, row: u32) -> &TypeRefRow {
        &self.images[image as usize].type_refs[row as usize]
    }

    fn attributes(&self, symbol: &MetadataSymbol) -> TypeAttributes {
        self.def(symbol)
            .map(TypeDefRow::attributes)
            .unwrap_or_else(TypeAttributes::empty)
    }

    /// Kind of a definition, decided by its flags and the name of its base.
    fn definition_kind(&self, image: u32, row: u32) -> RawTypeKind {
        let image_ref = &self.images[image as usize];
        let def = &image_ref.type_defs[row as usize];
        if def.attributes().contains(TypeAttributes::INTERFACE) {
            return RawTypeKind::Interface;
        }
        let Some(extends) = def.extends else {
            return RawTypeKind::Class;
        };
        match image_ref.handle_full_name(extends).as_str() {
            SYSTEM_ENUM => RawTypeKind::Enum,
            SYSTEM_MULTICAST_DELEGATE => RawTypeKind::Delegate,
            SYSTEM_VALUE_TYPE if image_ref.def_full_name(row) != SYSTEM_ENUM => {
                RawTypeKind::Struct
            }
            _ => RawTypeKind::Class,
        }
    }

    fn is_static_class(&self, symbol: &MetadataSymbol) -> bool {
        let attributes = self.attributes(symbol);
        attributes.contains(TypeAttributes::ABSTRACT | TypeAttributes::SEALED)
            && self.raw_kind(symbol) == RawTypeKind::Class
    }

    /// Whether the definition is the universal root (`System.Object`).
    pub fn is_root(&self, symbol: &MetadataSymbol) -> bool {
        matches!(symbol, MetadataSymbol::Definition { .. }) && self.full_name(symbol) == SYSTEM_OBJECT
    }
}

impl SymbolProvider for MetadataSymbolProvider {
    type Symbol = MetadataSymbol;

    fn find_named_type(&self, metadata_name: &str) -> Option<MetadataSymbol> {
        self.lookup_unique(metadata_name)
    }

    fn is_unresolved_reference(&self, symbol: &MetadataSymbol) -> bool {
        matches!(symbol, MetadataSymbol::Reference { .. })
    }

    fn raw_kind(&self, symbol: &MetadataSymbol) -> RawTypeKind {
        match *symbol {
            MetadataSymbol::Definition { image, row } => self.definition_kind(image, row),
            MetadataSymbol::Reference { .. } => RawTypeKind::Error,
        }
    }

    fn raw_accessibility(&self, symbol: &MetadataSymbol) -> RawAccessibility {
        self.def(symbol)
            .map(|def| def.visibility().to_raw_accessibility())
            .unwrap_or(RawAccessibility::NotApplicable)
    }

    fn is_abstract(&self, symbol: &MetadataSymbol) -> bool {
        self.attributes(symbol).contains(TypeAttributes::ABSTRACT) && !self.is_static_class(symbol)
    }

    fn is_sealed(&self, symbol: &MetadataSymbol) -> bool {
        self.attributes(symbol).contains(TypeAttributes::SEALED) && !self.is_static_class(symbol)
    }

    fn is_generic(&self, symbol: &MetadataSymbol) -> bool {
        self.arity(symbol) > 0
    }

    fn is_static(&self, symbol: &MetadataSymbol) -> bool {
        self.is_static_class(symbol)
    }

    fn is_ref_like(&self, symbol: &MetadataSymbol) -> bool {
        self.attributes(symbol).contains(TypeAttributes::BY_REF_LIKE)
    }

    fn is_readonly(&self, symbol: &MetadataSymbol) -> bool {
        self.attributes(symbol).contains(TypeAttributes::READ_ONLY)
    }

    fn base_type_symbol(&self, symbol: &MetadataSymbol) -> Option<MetadataSymbol> {
        let MetadataSymbol::Definition { image, .. } = *symbol else {
            return None;
        };
        let def = self.def(symbol)?;
        if def.attributes().contains(TypeAttributes::INTERFACE) {
            return None;
        }
        def.extends.map(|extends| self.resolve(image, extends))
    }

    fn declared_interface_symbols(&self, symbol: &MetadataSymbol) -> Vec<MetadataSymbol> {
        let MetadataSymbol::Definition { image, .. } = *symbol else {
            return Vec::new();
        };
        self.def(symbol)
            .map(|def| {
                def.interfaces
                    .iter()
                    .map(|iface| self.resolve(image, *iface))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn metadata_name(&self, symbol: &MetadataSymbol) -> &str {
        match *symbol {
            MetadataSymbol::Definition { image, row } => {
                &self.images[image as usize].type_defs[row as usize].name
            }
            MetadataSymbol::Reference { image, row } => &self.type_ref(image, row).name,
        }
    }

    fn arity(&self, symbol: &MetadataSymbol) -> usize {
        match *symbol {
            MetadataSymbol::Definition { image, row } => {
                self.images[image as usize].type_defs[row as usize].arity as usize
            }
            MetadataSymbol::Reference { image, row } => self.type_ref(image, row).arity as usize,
        }
    }

    fn enclosing_type_symbol(&self, symbol: &MetadataSymbol) -> Option<MetadataSymbol> {
        match *symbol {
            MetadataSymbol::Definition { image, row } => self.images[image as usize].type_defs
                [row as usize]
                .enclosing
                .map(|outer| MetadataSymbol::Definition { image, row: outer }),
            MetadataSymbol::Reference { image, row } => self
                .type_ref(image, row)
                .enclosing
                .map(|outer| self.resolve_ref(image, outer)),
        }
    }

    fn is_compiler_synthesized(&self, symbol: &MetadataSymbol) -> bool {
        match *symbol {
            MetadataSymbol::Definition { image, row } => {
                self.images[image as usize].is_def_synthesized(row)
            }
            MetadataSymbol::Reference { .. } => false,
        }
    }
}
