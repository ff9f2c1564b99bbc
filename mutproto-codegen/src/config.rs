//! Generator configuration.

use crate::naming::{HeckNaming, Naming};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Configuration of a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Use unboxed libGDX containers for repeated and map fields.
    pub compact_collection_mode: bool,
    /// Package of the generated Kotlin file.
    pub kotlin_package: String,
    /// Package of the generated proto file; defaults to the schema package.
    pub proto_package: Option<String>,
    /// `java_package` option; defaults to the proto package.
    pub java_package: Option<String>,
    /// `java_outer_classname` option wrapping the wire classes.
    pub outer_class_name: String,
    /// Name of the generated proto file.
    pub proto_file_name: String,
    /// Name of the generated Kotlin file.
    pub kotlin_file_name: String,
    /// Extra Kotlin imports.
    pub imports: Vec<String>,
    /// Check field numbers before generating.
    pub validate_tags: bool,
    /// Pre-size decoded containers with the wire element count.
    pub wire_count_hints: bool,
    /// Size hint overrides keyed by (canonical message name, field name).
    pub size_hints: BTreeMap<(String, String), String>,
    /// Naming convention.
    pub naming: Arc<dyn Naming>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            compact_collection_mode: false,
            kotlin_package: String::new(),
            proto_package: None,
            java_package: None,
            outer_class_name: "SchemaProto".to_string(),
            proto_file_name: "schema.proto".to_string(),
            kotlin_file_name: "Schema.kt".to_string(),
            imports: Vec::new(),
            validate_tags: false,
            wire_count_hints: true,
            size_hints: BTreeMap::new(),
            naming: Arc::new(HeckNaming),
        }
    }
}

impl GeneratorConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables compact collection mode.
    #[must_use]
    pub fn compact_collection_mode(mut self, enabled: bool) -> Self {
        self.compact_collection_mode = enabled;
        self
    }

    /// Sets the Kotlin package.
    #[must_use]
    pub fn kotlin_package(mut self, package: impl Into<String>) -> Self {
        self.kotlin_package = package.into();
        self
    }

    /// Sets the proto package.
    #[must_use]
    pub fn proto_package(mut self, package: impl Into<String>) -> Self {
        self.proto_package = Some(package.into());
        self
    }

    /// Sets the Java package of the wire classes.
    #[must_use]
    pub fn java_package(mut self, package: impl Into<String>) -> Self {
        self.java_package = Some(package.into());
        self
    }

    /// Sets the outer class wrapping the wire classes.
    #[must_use]
    pub fn proto_outer_class_name(mut self, name: impl Into<String>) -> Self {
        self.outer_class_name = name.into();
        self
    }

    /// Sets the proto file name.
    #[must_use]
    pub fn proto_file_name(mut self, name: impl Into<String>) -> Self {
        self.proto_file_name = name.into();
        self
    }

    /// Sets the Kotlin file name.
    #[must_use]
    pub fn kotlin_file_name(mut self, name: impl Into<String>) -> Self {
        self.kotlin_file_name = name.into();
        self
    }

    /// Adds an import to the Kotlin file.
    #[must_use]
    pub fn import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    /// Enables field number validation.
    #[must_use]
    pub fn validate_tags(mut self, enabled: bool) -> Self {
        self.validate_tags = enabled;
        self
    }

    /// Enables or disables pre-sizing from the wire element count.
    #[must_use]
    pub fn wire_count_hints(mut self, enabled: bool) -> Self {
        self.wire_count_hints = enabled;
        self
    }

    /// Overrides the decode size hint of one repeated or map field.
    #[must_use]
    pub fn size_hint(
        mut self,
        message: impl Into<String>,
        field: impl Into<String>,
        expr: impl Into<String>,
    ) -> Self {
        self.size_hints
            .insert((message.into(), field.into()), expr.into());
        self
    }

    /// Sets the naming convention.
    #[must_use]
    pub fn naming(mut self, naming: impl Naming + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    /// Returns the size hint override of a field.
    #[must_use]
    pub fn size_hint_for(&self, message: &str, field: &str) -> Option<&str> {
        self.size_hints
            .get(&(message.to_string(), field.to_string()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(!config.compact_collection_mode);
        assert!(!config.validate_tags);
        assert!(config.wire_count_hints);
        assert_eq!(config.proto_file_name, "schema.proto");
        assert!(config.imports.is_empty());
    }

    #[test]
    fn test_builder_methods() {
        let config = GeneratorConfig::new()
            .compact_collection_mode(true)
            .kotlin_package("com.example.model")
            .java_package("com.example.proto")
            .proto_outer_class_name("Game")
            .import("com.example.Extra")
            .size_hint("Board", "cells", "64");
        assert!(config.compact_collection_mode);
        assert_eq!(config.kotlin_package, "com.example.model");
        assert_eq!(config.java_package.as_deref(), Some("com.example.proto"));
        assert_eq!(config.outer_class_name, "Game");
        assert_eq!(config.imports, vec!["com.example.Extra"]);
        assert_eq!(config.size_hint_for("Board", "cells"), Some("64"));
        assert_eq!(config.size_hint_for("Board", "rows"), None);
    }
}
