//! Schema intermediate representation.
//!
//! The IR is produced once by an upstream parser (or loaded from JSON) and is
//! read-only from then on. Traversal helpers hand out definitions together with
//! their canonical [`TypeName`].

use crate::error::ParseError;
use crate::messages::{MessageDef, OneOfDef};
use crate::services::ServiceDef;
use crate::types::{EnumDef, TypeName};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parsed, name-resolvable schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIr {
    /// Package name; may be empty.
    #[serde(default)]
    pub package: String,
    /// Top-level definitions in source order.
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

/// Top-level definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Definition {
    /// Message.
    Message(MessageDef),
    /// Enum.
    Enum(EnumDef),
    /// Service.
    Service(ServiceDef),
}

impl SchemaIr {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            definitions: Vec::new(),
        }
    }

    /// Loads a schema from its JSON form.
    ///
    /// # Errors
    /// Returns `ParseError::Json` if the document does not describe a schema.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a schema from a JSON file.
    ///
    /// # Errors
    /// Returns `ParseError` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Adds a top-level message.
    pub fn add_message(&mut self, message: MessageDef) {
        self.definitions.push(Definition::Message(message));
    }

    /// Adds a top-level enum.
    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.definitions.push(Definition::Enum(enum_def));
    }

    /// Adds a service.
    pub fn add_service(&mut self, service: ServiceDef) {
        self.definitions.push(Definition::Service(service));
    }

    /// Iterates the services.
    pub fn services(&self) -> impl Iterator<Item = &ServiceDef> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Service(service) => Some(service),
            _ => None,
        })
    }

    /// Returns every message, nested ones included, depth-first in source order.
    #[must_use]
    pub fn all_messages(&self) -> Vec<ScopedMessage<'_>> {
        let mut out = Vec::new();
        for def in &self.definitions {
            if let Definition::Message(message) = def {
                collect_messages(TypeName::new(message.name.clone()), message, &mut out);
            }
        }
        out
    }

    /// Returns every enum, nested ones included, in source order.
    #[must_use]
    pub fn all_enums(&self) -> Vec<ScopedEnum<'_>> {
        let mut out = Vec::new();
        for def in &self.definitions {
            match def {
                Definition::Enum(enum_def) => out.push(ScopedEnum {
                    name: TypeName::new(enum_def.name.clone()),
                    def: enum_def,
                }),
                Definition::Message(message) => {
                    collect_enums(&TypeName::new(message.name.clone()), message, &mut out);
                }
                Definition::Service(_) => {}
            }
        }
        out
    }

    /// Returns every oneof together with its containing message.
    #[must_use]
    pub fn all_one_ofs(&self) -> Vec<ScopedOneOf<'_>> {
        self.all_messages()
            .into_iter()
            .flat_map(|scoped| {
                scoped.def.one_ofs().map(move |one_of| ScopedOneOf {
                    name: scoped.name.child(&one_of.name),
                    message: scoped.name.clone(),
                    def: one_of,
                })
            })
            .collect()
    }
}

/// Message with its canonical name.
#[derive(Debug, Clone)]
pub struct ScopedMessage<'a> {
    /// Canonical name.
    pub name: TypeName,
    /// Definition.
    pub def: &'a MessageDef,
}

/// Enum with its canonical name.
#[derive(Debug, Clone)]
pub struct ScopedEnum<'a> {
    /// Canonical name.
    pub name: TypeName,
    /// Definition.
    pub def: &'a EnumDef,
}

/// Oneof with its canonical union name and containing message.
#[derive(Debug, Clone)]
pub struct ScopedOneOf<'a> {
    /// Canonical union name (`Message.oneof`).
    pub name: TypeName,
    /// Containing message.
    pub message: TypeName,
    /// Definition.
    pub def: &'a OneOfDef,
}

fn collect_messages<'a>(name: TypeName, message: &'a MessageDef, out: &mut Vec<ScopedMessage<'a>>) {
    let nested: Vec<_> = message.nested_messages().collect();
    out.push(ScopedMessage {
        name: name.clone(),
        def: message,
    });
    for child in nested {
        collect_messages(name.child(&child.name), child, out);
    }
}

fn collect_enums<'a>(scope: &TypeName, message: &'a MessageDef, out: &mut Vec<ScopedEnum<'a>>) {
    for enum_def in message.nested_enums() {
        out.push(ScopedEnum {
            name: scope.child(&enum_def.name),
            def: enum_def,
        });
    }
    for child in message.nested_messages() {
        collect_enums(&scope.child(&child.name), child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::FieldDef;
    use crate::types::{EnumValueDef, FieldType};

    const SCHEMA_JSON: &str = r#"{
        "package": "demo",
        "definitions": [
            {"enum": {"name": "Kind", "members": [
                {"value": {"name": "KIND_UNKNOWN", "tag": 0}}
            ]}},
            {"message": {"name": "Person", "members": [
                {"field": {"name": "name", "tag": 1, "type": "string"}},
                {"nested_enum": {"name": "PhoneType", "members": [
                    {"value": {"name": "MOBILE", "tag": 0}}
                ]}},
                {"nested_message": {"name": "PhoneNumber", "members": [
                    {"field": {"name": "number", "tag": 1, "type": "string"}},
                    {"field": {"name": "type", "tag": 2, "type": "PhoneType"}}
                ]}},
                {"one_of": {"name": "contact", "members": [
                    {"field": {"name": "email", "tag": 3, "type": "string"}}
                ]}}
            ]}},
            {"service": {"name": "Directory", "members": [
                {"rpc": {"name": "Find", "in_type": "Person", "out_type": "Person", "out_stream": true}}
            ]}}
        ]
    }"#;

    #[test]
    fn test_schema_ir_from_json() {
        let ir = SchemaIr::from_json(SCHEMA_JSON).expect("Failed to parse");
        assert_eq!(ir.package, "demo");
        assert_eq!(ir.definitions.len(), 3);
        assert_eq!(ir.services().count(), 1);
        let rpc = ir.services().next().and_then(|s| s.rpcs().next()).expect("rpc");
        assert!(rpc.out_stream);
        assert!(!rpc.in_stream);
    }

    #[test]
    fn test_schema_ir_from_json_rejects_garbage() {
        assert!(matches!(
            SchemaIr::from_json(r#"{"definitions": 3}"#),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_all_messages_canonical_names() {
        let ir = SchemaIr::from_json(SCHEMA_JSON).expect("Failed to parse");
        let names: Vec<_> = ir
            .all_messages()
            .into_iter()
            .map(|m| m.name.to_string())
            .collect();
        assert_eq!(names, vec!["Person", "Person.PhoneNumber"]);
    }

    #[test]
    fn test_all_enums_canonical_names() {
        let ir = SchemaIr::from_json(SCHEMA_JSON).expect("Failed to parse");
        let names: Vec<_> = ir
            .all_enums()
            .into_iter()
            .map(|e| e.name.to_string())
            .collect();
        assert_eq!(names, vec!["Kind", "Person.PhoneType"]);
    }

    #[test]
    fn test_all_one_ofs() {
        let ir = SchemaIr::from_json(SCHEMA_JSON).expect("Failed to parse");
        let one_ofs = ir.all_one_ofs();
        assert_eq!(one_ofs.len(), 1);
        assert_eq!(one_ofs[0].name.as_str(), "Person.contact");
        assert_eq!(one_ofs[0].message.as_str(), "Person");
    }

    #[test]
    fn test_builder_methods() {
        let mut ir = SchemaIr::new("demo");
        let mut msg = MessageDef::new("Point");
        msg.add_field(FieldDef::new("x", FieldType::named("int32"), 1));
        ir.add_message(msg);
        let mut level = EnumDef::new("Level");
        level.add_value(EnumValueDef::new("LOW", 0));
        ir.add_enum(level);
        assert_eq!(ir.all_messages().len(), 1);
        assert_eq!(ir.all_enums().len(), 1);
    }
}
