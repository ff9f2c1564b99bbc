//! Error types for schema loading, resolution, and validation.

use thiserror::Error;

/// Error type for loading a schema IR.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Malformed JSON or unexpected structure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema resolution and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Loading error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Wrappers combined in a way the type lattice cannot express.
    #[error("invalid shape for field '{field}': {reason}")]
    InvalidShapeNesting {
        /// Field name.
        field: String,
        /// What was wrong.
        reason: String,
    },

    /// Map key that is not an allowed primitive.
    #[error("invalid map key '{key}' for field '{field}'")]
    InvalidMapKey {
        /// Field name.
        field: String,
        /// Key type as written.
        key: String,
    },

    /// Two definitions share a canonical name.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (message, enum).
        kind: String,
        /// Canonical name.
        name: String,
    },

    /// Two fields of a message share a number.
    #[error("duplicate tag {tag} in message '{message}' (field '{field}')")]
    DuplicateTag {
        /// Message name.
        message: String,
        /// Second field using the tag.
        field: String,
        /// Field number.
        tag: u32,
    },

    /// Field number outside the legal range.
    #[error("tag {tag} of field '{field}' in message '{message}' is out of range")]
    TagOutOfRange {
        /// Message name.
        message: String,
        /// Field name.
        field: String,
        /// Field number.
        tag: u32,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates an invalid shape nesting error.
    pub fn nesting(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShapeNesting {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
