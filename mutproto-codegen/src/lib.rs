//! # mutproto Codegen
//!
//! Kotlin object model and proto3 wire schema generation.
//!
//! This crate provides:
//! - Native representation selection per field
//! - Conversion descriptors pairing decode and encode
//! - Kotlin mutable data class, enum and sealed union emission
//! - `.proto` emission from the schema IR

pub mod config;
pub mod context;
pub mod conversion;
pub mod emit;
pub mod error;
pub mod generator;
pub mod kotlin;
pub mod model;
pub mod naming;
pub mod proto;
pub mod repr;

pub use config::GeneratorConfig;
pub use context::CodegenContext;
pub use conversion::{
    AtomicRule, ConversionDescriptor, DecodeExpr, EncodeStmt, FieldAccessors, FieldDescriptors,
    FieldSpec, PostProcess, derive, describe_field,
};
pub use error::CodegenError;
pub use generator::{GeneratedFile, GeneratedFiles, Generator};
pub use naming::{HeckNaming, Naming};
pub use repr::{AuxImport, RepresentationDescriptor, Selection, select};

use mutproto_schema::SchemaIr;

/// Generates both output files from a JSON schema IR string.
///
/// # Arguments
/// * `json` - Schema IR in JSON form
/// * `config` - Generator configuration
///
/// # Errors
/// Returns `CodegenError` if parsing, resolution or generation fails.
pub fn generate_from_json(
    json: &str,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, CodegenError> {
    let ir = SchemaIr::from_json(json)?;
    Generator::new(&ir, config)?.generate()
}

/// Generates both output files from a JSON schema IR file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, resolution or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    config: &GeneratorConfig,
) -> Result<GeneratedFiles, CodegenError> {
    let ir = SchemaIr::from_file(path)?;
    Generator::new(&ir, config)?.generate()
}
