//! Prelude module for convenient imports.
//!
//! ```ignore
//! use mutproto::prelude::*;
//! ```

// Schema types
pub use mutproto_schema::{
    EnumDef, EnumValueDef, FieldDef, FieldKind, FieldType, MessageDef, OneOfDef, OptionDef,
    ParseError, PrimitiveKind, RpcDef, SchemaError, SchemaIr, ServiceDef, SymbolTable, TypeName,
    ValueShape,
};

// Codegen types
pub use mutproto_codegen::{
    CodegenContext, CodegenError, GeneratedFile, GeneratedFiles, Generator, GeneratorConfig,
    HeckNaming, Naming,
};
