//! Module image fixtures.
//!
//! `corlib_image` holds the handful of `System` types kind detection keys on.
//! `library_image` references them by name and declares one type per scenario
//! the integration tests cover.

use std::path::{Path, PathBuf};

use apiview::apiview_metadata::{ImageWriter, TypeAttributes, Visibility};
use apiview::{Documentation, ModelConfig};

pub const CORLIB: &str = "corlib";
pub const LIBRARY: &str = "TestLib";

pub fn corlib_image() -> Vec<u8> {
    let mut w = ImageWriter::new(CORLIB);
    let object = w.define("System.Object").build();
    let value_type = w
        .define("System.ValueType")
        .extends(object)
        .attributes(TypeAttributes::ABSTRACT)
        .build();
    w.define("System.Enum")
        .extends(value_type)
        .attributes(TypeAttributes::ABSTRACT)
        .build();
    let delegate = w
        .define("System.Delegate")
        .extends(object)
        .attributes(TypeAttributes::ABSTRACT)
        .build();
    w.define("System.MulticastDelegate")
        .extends(delegate)
        .attributes(TypeAttributes::ABSTRACT)
        .build();
    w.to_bytes().expect("corlib encodes")
}

pub fn library_image() -> Vec<u8> {
    let mut w = ImageWriter::new(LIBRARY);
    let object = w.reference("System.Object");
    let value_type = w.reference("System.ValueType");
    let enum_ = w.reference("System.Enum");
    let multicast = w.reference("System.MulticastDelegate");
    let missing_base = w.reference("MissingBase");
    let missing_iface = w.reference("IMissing");
    let ghost = w.reference("External.Container+Ghost");
    let interface = TypeAttributes::INTERFACE | TypeAttributes::ABSTRACT;

    // names
    w.define("TestNamespace.TestType").extends(object).build();
    w.define("TestNamespace.GenericType`2").extends(object).build();
    w.define("GlobalType").extends(object).build();

    // hierarchy
    let base = w.define("Base").extends(object).build();
    w.define("Derived").extends(base).build();
    w.define("DerivedFromMissing").extends(missing_base).build();
    w.define("DerivedFromGhost").extends(ghost).build();

    // interfaces
    let i1 = w.define("I1").attributes(interface).build();
    let i2 = w.define("I2").attributes(interface).build();
    w.define("C")
        .extends(object)
        .implements(i1)
        .implements(i2)
        .build();
    w.define("MixedInterfaces")
        .extends(base)
        .implements(i1)
        .implements(missing_iface)
        .build();
    w.define("IDerived").attributes(interface).implements(i1).build();

    // kinds
    w.define("Kinds.TestStruct")
        .extends(value_type)
        .attributes(TypeAttributes::SEALED)
        .build();
    w.define("Kinds.TestEnum")
        .extends(enum_)
        .attributes(TypeAttributes::SEALED)
        .build();
    w.define("Kinds.TestDelegate")
        .extends(multicast)
        .attributes(TypeAttributes::SEALED)
        .build();
    w.define("Kinds.ITestInterface").attributes(interface).build();

    // modifiers
    w.define("Modifiers.AbstractType")
        .extends(object)
        .attributes(TypeAttributes::ABSTRACT)
        .build();
    w.define("Modifiers.SealedType")
        .extends(object)
        .attributes(TypeAttributes::SEALED)
        .build();
    w.define("Modifiers.StaticType")
        .extends(object)
        .attributes(TypeAttributes::ABSTRACT | TypeAttributes::SEALED)
        .build();
    w.define("Modifiers.SpanLike")
        .extends(value_type)
        .attributes(
            TypeAttributes::SEALED | TypeAttributes::BY_REF_LIKE | TypeAttributes::READ_ONLY,
        )
        .build();

    // accessibility
    w.define("Access.InternalType")
        .visibility(Visibility::NotPublic)
        .extends(object)
        .build();
    let outer = w.define("Access.Outer").extends(object).build();
    for (name, visibility) in [
        ("PublicInner", Visibility::NestedPublic),
        ("ProtectedInner", Visibility::NestedFamily),
        ("InternalInner", Visibility::NestedAssembly),
        ("ProtectedInternalInner", Visibility::NestedFamOrAssem),
        ("PrivateProtectedInner", Visibility::NestedFamAndAssem),
        ("PrivateInner", Visibility::NestedPrivate),
    ] {
        w.define(name)
            .nested_in(outer)
            .visibility(visibility)
            .extends(object)
            .build();
    }
    let inner = w.define("Generic`1").nested_in(outer).extends(object).build();
    w.define("Deepest").nested_in(inner).extends(object).build();

    w.define("<PrivateImplementationDetails>")
        .visibility(Visibility::NotPublic)
        .attributes(TypeAttributes::COMPILER_GENERATED | TypeAttributes::SEALED)
        .extends(object)
        .build();

    w.to_bytes().expect("library encodes")
}

/// Two classes whose bases point at each other.
#[allow(dead_code)]
pub fn cyclic_image() -> Vec<u8> {
    use apiview::apiview_metadata::TypeHandle;

    let mut w = ImageWriter::new("Cyclic");
    w.define("Loop.A").extends(TypeHandle::Def(1)).build();
    w.define("Loop.B").extends(TypeHandle::Def(0)).build();
    w.to_bytes().expect("cyclic image encodes")
}

/// Documentation over corlib and the test library.
#[allow(dead_code)]
pub fn documentation() -> Documentation {
    Documentation::builder()
        .add_image(corlib_image())
        .add_image(library_image())
        .with_config(ModelConfig::default())
        .build()
        .expect("fixture documentation builds")
}

/// Write corlib and the test library into `dir`; returns their paths.
#[allow(dead_code)]
pub fn write_images(dir: &Path) -> Vec<PathBuf> {
    let corlib = dir.join("corlib.avmi");
    let library = dir.join("testlib.avmi");
    std::fs::write(&corlib, corlib_image()).expect("write corlib");
    std::fs::write(&library, library_image()).expect("write library");
    vec![corlib, library]
}
