//! Compiled module image: type definition and type reference tables.
//!
//! Wire layout: `b"AVMI"`, format version as `u16` little endian, then the
//! BCS-encoded [`ModuleImage`]. Row indices are positions in the owning
//! table.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use apiview_model::format_metadata_name;

use crate::flags::{split_flags, TypeAttributes, Visibility};

pub const IMAGE_MAGIC: [u8; 4] = *b"AVMI";
pub const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: usize = IMAGE_MAGIC.len() + 2;

/// Reference from one row to a type, either defined in this image or
/// referenced by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeHandle {
    Def(u32),
    Ref(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefRow {
    /// Empty for the global namespace and for nested types.
    pub namespace: String,
    /// Simple name without arity suffix.
    pub name: String,
    pub arity: u16,
    /// Visibility bits plus [`TypeAttributes`].
    pub flags: u32,
    pub extends: Option<TypeHandle>,
    pub interfaces: Vec<TypeHandle>,
    /// Row of the enclosing definition in the same image.
    pub enclosing: Option<u32>,
}

impl TypeDefRow {
    pub fn visibility(&self) -> Visibility {
        split_flags(self.flags).0
    }

    pub fn attributes(&self) -> TypeAttributes {
        split_flags(self.flags).1
    }

    pub fn metadata_name(&self) -> String {
        format_metadata_name(&self.name, self.arity as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRefRow {
    pub namespace: String,
    pub name: String,
    pub arity: u16,
    /// Row of the enclosing reference in the same image.
    pub enclosing: Option<u32>,
}

impl TypeRefRow {
    pub fn metadata_name(&self) -> String {
        format_metadata_name(&self.name, self.arity as usize)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleImage {
    pub name: String,
    pub type_defs: Vec<TypeDefRow>,
    pub type_refs: Vec<TypeRefRow>,
}

/// Errors decoding or validating a module image.
#[derive(Debug)]
pub enum ImageError {
    /// Fewer bytes than the header.
    Truncated { len: usize },
    BadMagic,
    UnsupportedVersion(u16),
    Decode(bcs::Error),
    Encode(bcs::Error),
    /// A row points past the end of a table.
    IndexOutOfRange {
        table: &'static str,
        row: u32,
        field: &'static str,
        index: u32,
    },
    /// Following `enclosing` from a row never reaches a top-level row.
    EnclosingCycle { table: &'static str, row: u32 },
    /// A declared type's base or interface is a compiler-generated row.
    SynthesizedTarget {
        row: u32,
        field: &'static str,
        index: u32,
    },
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageError::Truncated { len } => {
                write!(f, "image truncated: {} bytes, header needs {}", len, HEADER_LEN)
            }
            ImageError::BadMagic => write!(f, "not a module image (bad magic)"),
            ImageError::UnsupportedVersion(v) => {
                write!(f, "unsupported image format version {} (expected {})", v, FORMAT_VERSION)
            }
            ImageError::Decode(e) => write!(f, "failed to decode image body: {}", e),
            ImageError::Encode(e) => write!(f, "failed to encode image body: {}", e),
            ImageError::IndexOutOfRange {
                table,
                row,
                field,
                index,
            } => write!(
                f,
                "{}[{}].{} points to row {} which does not exist",
                table, row, field, index
            ),
            ImageError::EnclosingCycle { table, row } => {
                write!(f, "{}[{}] is nested in itself", table, row)
            }
            ImageError::SynthesizedTarget { row, field, index } => write!(
                f,
                "{}[{}].{} points to compiler-generated row {}",
                TYPE_DEFS, row, field, index
            ),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Decode(e) | ImageError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

const TYPE_DEFS: &str = "type_defs";
const TYPE_REFS: &str = "type_refs";

impl ModuleImage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_defs: Vec::new(),
            type_refs: Vec::new(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ImageError> {
        let body = bcs::to_bytes(self).map_err(ImageError::Encode)?;
        let mut out = Vec::with_capacity(HEADER_LEN + body.len());
        out.extend_from_slice(&IMAGE_MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&body);
        Ok(out)
    }

    /// Decode and validate an image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() < HEADER_LEN {
            return Err(ImageError::Truncated { len: bytes.len() });
        }
        if bytes[..IMAGE_MAGIC.len()] != IMAGE_MAGIC {
            return Err(ImageError::BadMagic);
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != FORMAT_VERSION {
            return Err(ImageError::UnsupportedVersion(version));
        }
        let image: ModuleImage =
            bcs::from_bytes(&bytes[HEADER_LEN..]).map_err(ImageError::Decode)?;
        image.validate()?;
        Ok(image)
    }

    /// Check every row index and reject nesting cycles.
    pub fn validate(&self) -> Result<(), ImageError> {
        let defs = self.type_defs.len();
        let refs = self.type_refs.len();

        let check_handle = |row: usize, field: &'static str, handle: &TypeHandle| {
            let (len, index) = match *handle {
                TypeHandle::Def(i) => (defs, i),
                TypeHandle::Ref(i) => (refs, i),
            };
            if index as usize >= len {
                return Err(ImageError::IndexOutOfRange {
                    table: TYPE_DEFS,
                    row: row as u32,
                    field,
                    index,
                });
            }
            Ok(())
        };

        for (row, def) in self.type_defs.iter().enumerate() {
            if let Some(extends) = &def.extends {
                check_handle(row, "extends", extends)?;
            }
            for iface in &def.interfaces {
                check_handle(row, "interfaces", iface)?;
            }
            if let Some(outer) = def.enclosing {
                if outer as usize >= defs {
                    return Err(ImageError::IndexOutOfRange {
                        table: TYPE_DEFS,
                        row: row as u32,
                        field: "enclosing",
                        index: outer,
                    });
                }
            }
        }
        for (row, r) in self.type_refs.iter().enumerate() {
            if let Some(outer) = r.enclosing {
                if outer as usize >= refs {
                    return Err(ImageError::IndexOutOfRange {
                        table: TYPE_REFS,
                        row: row as u32,
                        field: "enclosing",
                        index: outer,
                    });
                }
            }
        }

        check_nesting(TYPE_DEFS, self.type_defs.iter().map(|d| d.enclosing))?;
        check_nesting(TYPE_REFS, self.type_refs.iter().map(|r| r.enclosing))?;

        for (row, def) in self.type_defs.iter().enumerate() {
            if self.is_def_synthesized(row as u32) {
                continue;
            }
            let targets = def
                .extends
                .iter()
                .map(|h| ("extends", h))
                .chain(def.interfaces.iter().map(|h| ("interfaces", h)));
            for (field, handle) in targets {
                if let TypeHandle::Def(index) = *handle {
                    if self.is_def_synthesized(index) {
                        return Err(ImageError::SynthesizedTarget {
                            row: row as u32,
                            field,
                            index,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Whether a definition, or any definition enclosing it, is compiler
    /// generated. Such rows are never described.
    pub fn is_def_synthesized(&self, row: u32) -> bool {
        let mut current = Some(row);
        while let Some(row) = current {
            let def = &self.type_defs[row as usize];
            if def.attributes().contains(TypeAttributes::COMPILER_GENERATED) {
                return true;
            }
            current = def.enclosing;
        }
        false
    }

    /// Full metadata name of a definition, e.g. ``Ns.Outer+Inner`1``.
    pub fn def_full_name(&self, row: u32) -> String {
        let def = &self.type_defs[row as usize];
        match def.enclosing {
            Some(outer) => format!("{}+{}", self.def_full_name(outer), def.metadata_name()),
            None => qualify(&def.namespace, &def.metadata_name()),
        }
    }

    /// Full metadata name a reference row asks for.
    pub fn ref_full_name(&self, row: u32) -> String {
        let r = &self.type_refs[row as usize];
        match r.enclosing {
            Some(outer) => format!("{}+{}", self.ref_full_name(outer), r.metadata_name()),
            None => qualify(&r.namespace, &r.metadata_name()),
        }
    }

    pub fn handle_full_name(&self, handle: TypeHandle) -> String {
        match handle {
            TypeHandle::Def(row) => self.def_full_name(row),
            TypeHandle::Ref(row) => self.ref_full_name(row),
        }
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}

/// Every `enclosing` chain must reach a top-level row within `len` steps.
fn check_nesting(
    table: &'static str,
    enclosing: impl Iterator<Item = Option<u32>>,
) -> Result<(), ImageError> {
    let parents: Vec<Option<u32>> = enclosing.collect();
    for start in 0..parents.len() {
        let mut current = parents[start];
        let mut steps = 0;
        while let Some(outer) = current {
            steps += 1;
            if steps > parents.len() {
                return Err(ImageError::EnclosingCycle {
                    table,
                    row: start as u32,
                });
            }
            current = parents[outer as usize];
        }
    }
    Ok(())
}

/// SHA-256 of an encoded image.
pub fn image_digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher.finalize().into()
}

pub fn image_digest_hex(bytes: &[u8]) -> String {
    hex::encode(image_digest(bytes))
}
