//! # mutproto Schema
//!
//! Semantic type model for the mutproto compiler.
//!
//! This crate provides:
//! - The closed type lattice (`FieldKind`, `ValueShape`)
//! - The schema intermediate representation, loadable from JSON
//! - Symbol table and name resolution
//! - Opt-in field number validation

pub mod error;
pub mod ir;
pub mod messages;
pub mod resolve;
pub mod services;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use ir::{Definition, SchemaIr, ScopedEnum, ScopedMessage, ScopedOneOf};
pub use messages::{
    FieldDef, MessageDef, MessageMember, OneOfDef, OneOfMember, OptionDef, ReservedItem,
};
pub use resolve::{SymbolKind, SymbolTable, project_oneof};
pub use services::{RpcDef, ServiceDef, ServiceMember};
pub use types::{
    EnumDef, EnumMember, EnumValueDef, FieldKind, FieldType, PrimitiveKind, ShapeKind, TypeExpr,
    TypeName, ValueShape,
};
pub use validation::validate_schema;
