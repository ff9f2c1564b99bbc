//! # mutproto
//!
//! Compiler from a resolved protobuf schema to mutable Kotlin data classes
//! that convert to and from the Java protobuf wire classes.
//!
//! ## Features
//!
//! - **Closed type lattice** - Shapes that cannot nest are unrepresentable
//! - **Representation selection** - Native types, defaults and containers per field
//! - **Compact collections** - Unboxed libGDX containers for primitive elements
//! - **Paired conversions** - Every decode rule has a matching encode rule
//!
//! ## Quick Start
//!
//! ```ignore
//! use mutproto::prelude::*;
//! use std::path::Path;
//!
//! let ir = SchemaIr::from_file(Path::new("schema.json"))?;
//! let config = GeneratorConfig::new()
//!     .kotlin_package("com.example.model")
//!     .compact_collection_mode(true);
//! let files = Generator::new(&ir, &config)?.generate()?;
//! files.write_to(Path::new("generated"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Type lattice, schema IR, name resolution and validation
//! - [`codegen`] - Representation selection, conversion and emission

pub mod prelude;

/// Type lattice, schema IR, name resolution and validation.
pub mod schema {
    pub use mutproto_schema::*;
}

/// Representation selection, conversion derivation and emission.
pub mod codegen {
    pub use mutproto_codegen::*;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_prelude_generates() {
        let mut ir = SchemaIr::new("demo");
        let mut point = MessageDef::new("Point");
        point.add_field(FieldDef::new("x", FieldType::named("float"), 1));
        point.add_field(FieldDef::new("y", FieldType::named("float"), 2));
        ir.add_message(point);

        let config = GeneratorConfig::new().kotlin_package("com.example");
        let files = Generator::new(&ir, &config)
            .expect("generator")
            .generate()
            .expect("generate");
        assert!(files.kotlin.contents.contains("  var x: Float,\n"));
        assert!(files.proto.contents.contains("  float y = 2;\n"));

        let dir = tempfile::tempdir().expect("tempdir");
        let written = files.write_to(dir.path()).expect("write");
        assert!(written.iter().all(|path| path.exists()));
    }
}
