//! Name resolution and shape normalization.
//!
//! Every message and enum is registered under its canonical name. Field types
//! resolve by name lookup only, so self-referencing and mutually recursive
//! messages never expand structurally.

use crate::error::SchemaError;
use crate::ir::SchemaIr;
use crate::types::{FieldKind, FieldType, PrimitiveKind, TypeExpr, TypeName, ValueShape};
use std::collections::HashMap;

/// Kind of a registered symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Message type.
    Message,
    /// Enum type.
    Enum,
}

impl SymbolKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Enum => "enum",
        }
    }
}

/// Canonical name to symbol kind table for one schema.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    package: String,
    symbols: HashMap<TypeName, SymbolKind>,
}

impl SymbolTable {
    /// Registers every message and enum of the schema, nested ones included.
    ///
    /// # Errors
    /// Returns `SchemaError::DuplicateDefinition` if two definitions share a
    /// canonical name.
    pub fn build(ir: &SchemaIr) -> Result<Self, SchemaError> {
        let mut table = Self {
            package: ir.package.clone(),
            symbols: HashMap::new(),
        };
        for scoped in ir.all_messages() {
            table.insert(scoped.name, SymbolKind::Message)?;
        }
        for scoped in ir.all_enums() {
            table.insert(scoped.name, SymbolKind::Enum)?;
        }
        Ok(table)
    }

    fn insert(&mut self, name: TypeName, kind: SymbolKind) -> Result<(), SchemaError> {
        if let Some(existing) = self.symbols.get(&name) {
            return Err(SchemaError::duplicate(existing.label(), name.as_str()));
        }
        self.symbols.insert(name, kind);
        Ok(())
    }

    /// Returns the number of registered symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if no symbol is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the kind of a canonical name.
    #[must_use]
    pub fn kind_of(&self, name: &TypeName) -> Option<SymbolKind> {
        self.symbols.get(name).copied()
    }

    /// Looks a type reference up from within `scope`.
    ///
    /// The innermost scope is tried first, then each enclosing scope, then the
    /// root. A leading `.` or the schema package prefix anchors the name at
    /// the root.
    #[must_use]
    pub fn lookup(&self, name: &str, scope: Option<&TypeName>) -> Option<(TypeName, SymbolKind)> {
        if let Some(absolute) = self.strip_root(name) {
            let candidate = TypeName::new(absolute);
            return self.kind_of(&candidate).map(|kind| (candidate, kind));
        }

        let mut current = scope.cloned();
        while let Some(enclosing) = current {
            let candidate = enclosing.child(name);
            if let Some(kind) = self.kind_of(&candidate) {
                return Some((candidate, kind));
            }
            current = enclosing.parent();
        }

        let candidate = TypeName::new(name);
        self.kind_of(&candidate).map(|kind| (candidate, kind))
    }

    fn strip_root<'a>(&self, name: &'a str) -> Option<&'a str> {
        let (anchored, rest) = match name.strip_prefix('.') {
            Some(rest) => (true, rest),
            None => (false, name),
        };
        let unpackaged = if self.package.is_empty() {
            None
        } else {
            rest.strip_prefix(self.package.as_str())
                .and_then(|tail| tail.strip_prefix('.'))
        };
        match unpackaged {
            Some(tail) => Some(tail),
            None if anchored => Some(rest),
            None => None,
        }
    }

    /// Resolves a named type to its atomic kind.
    ///
    /// Never fails; unknown names become [`FieldKind::Unresolved`] and empty
    /// names become [`FieldKind::Empty`].
    #[must_use]
    pub fn resolve_kind(&self, name: &str, scope: Option<&TypeName>) -> FieldKind {
        if name.is_empty() {
            return FieldKind::Empty;
        }
        if let Some(primitive) = PrimitiveKind::from_proto_name(name) {
            return FieldKind::Primitive(primitive);
        }
        match self.lookup(name, scope) {
            Some((canonical, SymbolKind::Message)) => FieldKind::MessageRef(canonical),
            Some((canonical, SymbolKind::Enum)) => FieldKind::EnumRef(canonical),
            None => FieldKind::Unresolved(name.to_string()),
        }
    }

    /// Normalizes a raw field type into a [`ValueShape`].
    ///
    /// # Errors
    /// Returns `SchemaError::InvalidShapeNesting` when `optional` and
    /// `repeated` are combined or applied to a map, and
    /// `SchemaError::InvalidMapKey` when a map key is not an allowed primitive.
    pub fn resolve(
        &self,
        field_type: &FieldType,
        scope: Option<&TypeName>,
        field: &str,
    ) -> Result<ValueShape, SchemaError> {
        if field_type.optional && field_type.repeated {
            return Err(SchemaError::nesting(field, "optional and repeated are exclusive"));
        }
        match &field_type.expr {
            TypeExpr::Named(name) => {
                let kind = self.resolve_kind(name, scope);
                Ok(if field_type.optional {
                    ValueShape::Optional(kind)
                } else if field_type.repeated {
                    ValueShape::Repeated(kind)
                } else {
                    ValueShape::Atomic(kind)
                })
            }
            TypeExpr::Map { key, value } => {
                if field_type.optional || field_type.repeated {
                    return Err(SchemaError::nesting(field, "map fields take no modifier"));
                }
                let key_kind = PrimitiveKind::from_proto_name(key)
                    .filter(PrimitiveKind::is_valid_map_key)
                    .ok_or_else(|| SchemaError::InvalidMapKey {
                        field: field.to_string(),
                        key: key.clone(),
                    })?;
                Ok(ValueShape::Map {
                    key: key_kind,
                    value: self.resolve_kind(value, scope),
                })
            }
        }
    }

    /// Resolves one side of an RPC.
    #[must_use]
    pub fn resolve_rpc(&self, stream: bool, type_name: &str, scope: Option<&TypeName>) -> ValueShape {
        let atomic = ValueShape::Atomic(self.resolve_kind(type_name, scope));
        if stream {
            ValueShape::Stream(Box::new(atomic))
        } else {
            atomic
        }
    }
}

/// Projects a oneof of `message` as a tagged union field.
#[must_use]
pub fn project_oneof(message: &TypeName, one_of: &str) -> ValueShape {
    ValueShape::Atomic(FieldKind::UnionRef(message.child(one_of)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{FieldDef, MessageDef};
    use crate::types::{EnumDef, EnumValueDef};

    fn tree_schema() -> SchemaIr {
        let mut ir = SchemaIr::new("demo");

        let mut node = MessageDef::new("Node");
        node.add_field(FieldDef::new("children", FieldType::repeated("Node"), 1));
        node.add_field(FieldDef::new("parent", FieldType::optional("Node"), 2));
        let mut color = EnumDef::new("Color");
        color.add_value(EnumValueDef::new("RED", 0));
        node.add_nested_enum(color);
        let mut meta = MessageDef::new("Meta");
        meta.add_field(FieldDef::new("color", FieldType::named("Color"), 1));
        node.add_nested_message(meta);
        ir.add_message(node);

        let mut color = EnumDef::new("Color");
        color.add_value(EnumValueDef::new("TOP_RED", 0));
        ir.add_enum(color);
        ir
    }

    #[test]
    fn test_build_registers_nested() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        assert_eq!(table.len(), 4);
        assert_eq!(table.kind_of(&TypeName::new("Node.Meta")), Some(SymbolKind::Message));
        assert_eq!(table.kind_of(&TypeName::new("Node.Color")), Some(SymbolKind::Enum));
        assert_eq!(table.kind_of(&TypeName::new("Color")), Some(SymbolKind::Enum));
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let mut ir = SchemaIr::new("");
        ir.add_message(MessageDef::new("Point"));
        ir.add_enum(EnumDef::new("Point"));
        let err = SymbolTable::build(&ir).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateDefinition { ref name, .. } if name == "Point"));
    }

    #[test]
    fn test_lookup_innermost_scope_wins() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let scope = TypeName::new("Node.Meta");
        let (name, kind) = table.lookup("Color", Some(&scope)).expect("found");
        assert_eq!(name.as_str(), "Node.Color");
        assert_eq!(kind, SymbolKind::Enum);

        let (root, _) = table.lookup("Color", None).expect("found");
        assert_eq!(root.as_str(), "Color");
    }

    #[test]
    fn test_lookup_absolute_names() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let scope = TypeName::new("Node");
        let (name, _) = table.lookup(".demo.Color", Some(&scope)).expect("found");
        assert_eq!(name.as_str(), "Color");
        let (name, _) = table.lookup("demo.Node.Meta", None).expect("found");
        assert_eq!(name.as_str(), "Node.Meta");
    }

    #[test]
    fn test_resolve_recursive_message() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let scope = TypeName::new("Node");
        let shape = table
            .resolve(&FieldType::repeated("Node"), Some(&scope), "children")
            .expect("shape");
        assert_eq!(shape, ValueShape::Repeated(FieldKind::MessageRef(TypeName::new("Node"))));
        let shape = table
            .resolve(&FieldType::optional("Node"), Some(&scope), "parent")
            .expect("shape");
        assert_eq!(shape, ValueShape::Optional(FieldKind::MessageRef(TypeName::new("Node"))));
    }

    #[test]
    fn test_resolve_sentinels() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let shape = table
            .resolve(&FieldType::named("Foo"), None, "foo")
            .expect("shape");
        assert_eq!(shape, ValueShape::Atomic(FieldKind::Unresolved("Foo".to_string())));
        let shape = table
            .resolve(&FieldType::named(""), None, "blank")
            .expect("shape");
        assert_eq!(shape, ValueShape::Atomic(FieldKind::Empty));
    }

    #[test]
    fn test_resolve_primitive_and_map() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let shape = table
            .resolve(&FieldType::named("int32"), None, "id")
            .expect("shape");
        assert_eq!(shape, ValueShape::Atomic(FieldKind::Primitive(PrimitiveKind::Int32)));

        let shape = table
            .resolve(&FieldType::map("string", "Node"), None, "index")
            .expect("shape");
        assert_eq!(
            shape,
            ValueShape::Map {
                key: PrimitiveKind::String,
                value: FieldKind::MessageRef(TypeName::new("Node")),
            }
        );
    }

    #[test]
    fn test_resolve_rejects_bad_nesting() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let both = FieldType {
            repeated: true,
            ..FieldType::optional("int32")
        };
        assert!(matches!(
            table.resolve(&both, None, "x"),
            Err(SchemaError::InvalidShapeNesting { .. })
        ));

        let repeated_map = FieldType {
            repeated: true,
            ..FieldType::map("int32", "int32")
        };
        assert!(matches!(
            table.resolve(&repeated_map, None, "x"),
            Err(SchemaError::InvalidShapeNesting { .. })
        ));
    }

    #[test]
    fn test_resolve_rejects_bad_map_key() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        for key in ["float", "bytes", "Node"] {
            let err = table
                .resolve(&FieldType::map(key, "int32"), None, "m")
                .unwrap_err();
            assert!(matches!(err, SchemaError::InvalidMapKey { .. }), "key {key}");
        }
    }

    #[test]
    fn test_resolve_rpc_and_oneof() {
        let table = SymbolTable::build(&tree_schema()).expect("table");
        let streamed = table.resolve_rpc(true, "Node", None);
        assert_eq!(
            streamed,
            ValueShape::Stream(Box::new(ValueShape::Atomic(FieldKind::MessageRef(
                TypeName::new("Node")
            ))))
        );
        assert_eq!(
            table.resolve_rpc(false, "Node", None),
            ValueShape::Atomic(FieldKind::MessageRef(TypeName::new("Node")))
        );

        let union = project_oneof(&TypeName::new("Node"), "payload");
        assert_eq!(
            union,
            ValueShape::Atomic(FieldKind::UnionRef(TypeName::new("Node.payload")))
        );
    }
}
