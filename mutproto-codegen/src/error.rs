//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] mutproto_schema::ParseError),

    /// Schema resolution or validation error.
    #[error("schema error: {0}")]
    Schema(#[from] mutproto_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Field whose type has no native representation.
    #[error("unsupported type {kind} for field '{field}'")]
    UnsupportedFieldType {
        /// Field name.
        field: String,
        /// Offending kind.
        kind: String,
    },

    /// Shape that the type model should never have produced here.
    #[error("invalid shape {shape} for field '{field}'")]
    InvalidShapeNesting {
        /// Field name.
        field: String,
        /// Offending shape.
        shape: String,
    },

    /// Reference to a message that is not in the schema.
    #[error("unknown message '{name}'")]
    UnknownMessage {
        /// Canonical name.
        name: String,
    },
}

impl CodegenError {
    /// Creates an unsupported field type error.
    pub fn unsupported(field: impl Into<String>, kind: impl ToString) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            kind: kind.to_string(),
        }
    }

    /// Creates an invalid shape nesting error.
    pub fn nesting(field: impl Into<String>, shape: impl ToString) -> Self {
        Self::InvalidShapeNesting {
            field: field.into(),
            shape: shape.to_string(),
        }
    }
}
