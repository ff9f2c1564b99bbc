//! Per-run configuration shared by representation selection and conversion.

use crate::naming::Naming;
use mutproto_schema::TypeName;

/// Constant inputs of a generation run.
#[derive(Debug, Clone, Copy)]
pub struct CodegenContext<'a> {
    /// Naming convention.
    pub naming: &'a dyn Naming,
    /// Select unboxed containers for repeated and map fields.
    pub compact: bool,
    /// Outer class wrapping the generated wire classes; empty for none.
    pub outer_class: &'a str,
}

impl<'a> CodegenContext<'a> {
    /// Creates a context without an outer wire class.
    #[must_use]
    pub fn new(naming: &'a dyn Naming, compact: bool) -> Self {
        Self {
            naming,
            compact,
            outer_class: "",
        }
    }

    /// Sets the outer wire class.
    #[must_use]
    pub fn outer_class(mut self, outer_class: &'a str) -> Self {
        self.outer_class = outer_class;
        self
    }

    /// Returns the fully qualified wire class of a message or enum.
    #[must_use]
    pub fn wire_class(&self, name: &TypeName) -> String {
        if self.outer_class.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.outer_class, name)
        }
    }
}
