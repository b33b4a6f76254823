//! Programmatic construction of module images.
//!
//! ```ignore
//! let mut w = ImageWriter::new("Shapes");
//! let object = w.reference("System.Object");
//! let shape = w.define("Shapes.Shape").extends(object).attributes(TypeAttributes::ABSTRACT).build();
//! w.define("Shapes.Circle").extends(shape).build();
//! let bytes = w.to_bytes()?;
//! ```

use std::collections::HashMap;

use crate::flags::{compose_flags, TypeAttributes, Visibility};
use crate::image::{ImageError, ModuleImage, TypeDefRow, TypeHandle, TypeRefRow};

/// Accumulates type definitions and references into a [`ModuleImage`].
#[derive(Debug)]
pub struct ImageWriter {
    image: ModuleImage,
    refs_by_name: HashMap<String, u32>,
}

impl ImageWriter {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            image: ModuleImage::new(module_name),
            refs_by_name: HashMap::new(),
        }
    }

    /// Reference a type by full metadata name (``Ns.Outer`1+Inner``).
    ///
    /// Enclosing references are created as needed; repeated names share a row.
    pub fn reference(&mut self, full_name: &str) -> TypeHandle {
        TypeHandle::Ref(self.reference_row(full_name))
    }

    fn reference_row(&mut self, full_name: &str) -> u32 {
        if let Some(&row) = self.refs_by_name.get(full_name) {
            return row;
        }
        let (enclosing, namespace, simple) = match full_name.rsplit_once('+') {
            Some((outer, inner)) => (Some(self.reference_row(outer)), "", inner),
            None => {
                let (namespace, simple) = split_namespace(full_name);
                (None, namespace, simple)
            }
        };
        let (name, arity) = split_arity(simple);
        let row = self.image.type_refs.len() as u32;
        self.image.type_refs.push(TypeRefRow {
            namespace: namespace.to_string(),
            name: name.to_string(),
            arity,
            enclosing,
        });
        self.refs_by_name.insert(full_name.to_string(), row);
        row
    }

    /// Start a definition named ``Ns.Name`N``; public, top-level and without
    /// a base type until configured otherwise.
    pub fn define(&mut self, name: &str) -> TypeDefBuilder<'_> {
        let (namespace, simple) = split_namespace(name);
        let (simple, arity) = split_arity(simple);
        TypeDefBuilder {
            row: TypeDefRow {
                namespace: namespace.to_string(),
                name: simple.to_string(),
                arity,
                flags: 0,
                extends: None,
                interfaces: Vec::new(),
                enclosing: None,
            },
            visibility: Visibility::Public,
            attributes: TypeAttributes::empty(),
            writer: self,
        }
    }

    pub fn finish(self) -> ModuleImage {
        self.image
    }

    pub fn to_bytes(self) -> Result<Vec<u8>, ImageError> {
        self.image.to_bytes()
    }
}

/// One pending type definition. Call [`build`](Self::build) to add it.
pub struct TypeDefBuilder<'w> {
    writer: &'w mut ImageWriter,
    row: TypeDefRow,
    visibility: Visibility,
    attributes: TypeAttributes,
}

impl<'w> TypeDefBuilder<'w> {
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Add attributes; may be called repeatedly.
    pub fn attributes(mut self, attributes: TypeAttributes) -> Self {
        self.attributes |= attributes;
        self
    }

    pub fn extends(mut self, base: TypeHandle) -> Self {
        self.row.extends = Some(base);
        self
    }

    /// Declare an interface; declaration order is preserved.
    pub fn implements(mut self, interface: TypeHandle) -> Self {
        self.row.interfaces.push(interface);
        self
    }

    /// Nest this definition inside another definition of the same image.
    ///
    /// # Panics
    ///
    /// Panics if `outer` is a reference rather than a definition.
    pub fn nested_in(mut self, outer: TypeHandle) -> Self {
        let TypeHandle::Def(row) = outer else {
            panic!("only type definitions can enclose a definition, got {outer:?}");
        };
        self.row.enclosing = Some(row);
        self.row.namespace.clear();
        self
    }

    pub fn build(mut self) -> TypeHandle {
        self.row.flags = compose_flags(self.visibility, self.attributes);
        let row = self.writer.image.type_defs.len() as u32;
        self.writer.image.type_defs.push(self.row);
        TypeHandle::Def(row)
    }
}

/// `"A.B.C"` -> `("A.B", "C")`; no dot means the global namespace.
fn split_namespace(name: &str) -> (&str, &str) {
    name.rsplit_once('.').unwrap_or(("", name))
}

/// ``"List`1"`` -> `("List", 1)`; a suffix that is not a number stays in the name.
fn split_arity(name: &str) -> (&str, u16) {
    match name.rsplit_once('`') {
        Some((base, digits)) => match digits.parse::<u16>() {
            Ok(arity) => (base, arity),
            Err(_) => (name, 0),
        },
        None => (name, 0),
    }
}
