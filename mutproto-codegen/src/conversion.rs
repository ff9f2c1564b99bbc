//! Wire conversion descriptors.
//!
//! Each atomic kind has exactly one [`AtomicRule`]; every wrapper shape
//! composes a single wrapper-level step around it. The descriptors are pure
//! data and are turned into source text by the emitters.

use crate::context::CodegenContext;
use crate::error::CodegenError;
use crate::naming::Naming;
use crate::repr::{self, RepresentationDescriptor, Selection};
use mutproto_schema::{FieldKind, ValueShape};

/// A field as seen by the code generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as declared.
    pub name: String,
    /// Resolved shape.
    pub shape: ValueShape,
    /// Field number; `None` for projected oneofs.
    pub tag: Option<u32>,
}

impl FieldSpec {
    /// Creates a field spec.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: ValueShape, tag: u32) -> Self {
        Self {
            name: name.into(),
            shape,
            tag: Some(tag),
        }
    }

    /// Creates a projected oneof, which has no field number.
    #[must_use]
    pub fn union(name: impl Into<String>, shape: ValueShape) -> Self {
        Self {
            name: name.into(),
            shape,
            tag: None,
        }
    }
}

/// Accessor names of a field, derived through the naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccessors {
    /// Property name (`phoneNumbers`).
    pub accessor: String,
    /// Capitalized form (`PhoneNumbers`).
    pub capitalized: String,
}

impl FieldAccessors {
    /// Derives the accessors of a field name.
    #[must_use]
    pub fn of(name: &str, naming: &dyn Naming) -> Self {
        Self {
            accessor: naming.field_accessor(name),
            capitalized: naming.capitalized_accessor(name),
        }
    }
}

/// Decode and encode rule of one atomic kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomicRule {
    /// Values are copied as-is.
    Primitive,
    /// Values go through the enum's `fromProto` / `toProto`.
    Enum {
        /// Native enum class.
        enum_class: String,
    },
    /// Values go through the class's `fromProto` and mutate a wire sub-builder.
    Message {
        /// Native class.
        class: String,
        /// Wire class, used to build detached values.
        wire_class: String,
    },
    /// Oneof alternatives living inline in the containing wire message.
    Union {
        /// Native sealed class.
        class: String,
    },
}

/// First-phase decode of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeExpr {
    /// Read the wire field through the atomic rule.
    ReadAtomic {
        /// Field accessors.
        field: FieldAccessors,
        /// Atomic rule.
        rule: AtomicRule,
    },
    /// `null` unless the wire presence check passes, then the atomic read.
    ReadOptional {
        /// Field accessors.
        field: FieldAccessors,
        /// Atomic rule.
        rule: AtomicRule,
    },
    /// A constant expression, filled in by a [`PostProcess`].
    Literal(String),
}

/// Second-phase decode filling a freshly constructed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcess {
    /// Append every wire element, decoded by the rule.
    ForEachRepeatedElement {
        /// Field accessors.
        field: FieldAccessors,
        /// Element rule.
        rule: AtomicRule,
    },
    /// Insert every wire entry; keys are copied, values decoded by the rule.
    ForEachMapEntry {
        /// Field accessors.
        field: FieldAccessors,
        /// Value rule.
        rule: AtomicRule,
    },
}

/// Encode statement of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeStmt {
    /// Write the native value through the atomic rule.
    WriteAtomic {
        /// Field accessors.
        field: FieldAccessors,
        /// Atomic rule.
        rule: AtomicRule,
    },
    /// Write when non-null, otherwise clear the wire field.
    WriteOptional {
        /// Field accessors.
        field: FieldAccessors,
        /// Atomic rule.
        rule: AtomicRule,
    },
    /// Append every native element.
    ForEachRepeatedElement {
        /// Field accessors.
        field: FieldAccessors,
        /// Element rule.
        rule: AtomicRule,
    },
    /// Put every native entry.
    ForEachMapEntry {
        /// Field accessors.
        field: FieldAccessors,
        /// Value rule.
        rule: AtomicRule,
    },
}

impl EncodeStmt {
    /// Returns true if a null native value clears the wire field.
    #[must_use]
    pub const fn clears_when_absent(&self) -> bool {
        matches!(self, Self::WriteOptional { .. })
    }
}

/// Decode and encode logic of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionDescriptor {
    /// Initial decode expression.
    pub decode: DecodeExpr,
    /// Container fill step, for repeated and map fields.
    pub post_process: Option<PostProcess>,
    /// Encode statement.
    pub encode: EncodeStmt,
}

/// Representation and conversion of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptors {
    /// Selected representation.
    pub representation: Selection,
    /// Conversion logic.
    pub conversion: ConversionDescriptor,
}

/// Returns the rule of an atomic kind.
///
/// # Errors
/// Returns `CodegenError::UnsupportedFieldType` for sentinels and primitives
/// without a native mapping.
pub fn atomic_rule(
    field: &str,
    kind: &FieldKind,
    ctx: &CodegenContext<'_>,
) -> Result<AtomicRule, CodegenError> {
    match kind {
        FieldKind::Primitive(primitive) => repr::primitive_type(*primitive)
            .map(|_| AtomicRule::Primitive)
            .ok_or_else(|| CodegenError::unsupported(field, primitive)),
        FieldKind::EnumRef(name) => Ok(AtomicRule::Enum {
            enum_class: ctx.naming.enum_class_symbol(name),
        }),
        FieldKind::MessageRef(name) => Ok(AtomicRule::Message {
            class: ctx.naming.class_symbol(name),
            wire_class: ctx.wire_class(name),
        }),
        FieldKind::UnionRef(name) => Ok(AtomicRule::Union {
            class: ctx.naming.class_symbol(name),
        }),
        FieldKind::Unresolved(_) | FieldKind::Empty => Err(CodegenError::unsupported(field, kind)),
    }
}

/// Rule of a collection element; a oneof has no repeated or map form on the wire.
fn element_rule(
    field: &str,
    kind: &FieldKind,
    ctx: &CodegenContext<'_>,
) -> Result<AtomicRule, CodegenError> {
    match atomic_rule(field, kind, ctx)? {
        AtomicRule::Union { .. } => Err(CodegenError::nesting(field, kind)),
        rule => Ok(rule),
    }
}

/// Derives the conversion descriptor of a field from its shape and
/// representation.
///
/// `size_hint` pre-sizes containers during decode; without one they are built
/// empty.
///
/// # Errors
/// Returns `CodegenError::UnsupportedFieldType` or
/// `CodegenError::InvalidShapeNesting`; no partial descriptor is produced.
pub fn derive(
    field: &FieldSpec,
    representation: &RepresentationDescriptor,
    ctx: &CodegenContext<'_>,
    size_hint: Option<&str>,
) -> Result<ConversionDescriptor, CodegenError> {
    let name = field.name.as_str();
    let accessors = FieldAccessors::of(name, ctx.naming);

    let descriptor = match &field.shape {
        ValueShape::Atomic(kind) => {
            let rule = atomic_rule(name, kind, ctx)?;
            ConversionDescriptor {
                decode: DecodeExpr::ReadAtomic {
                    field: accessors.clone(),
                    rule: rule.clone(),
                },
                post_process: None,
                encode: EncodeStmt::WriteAtomic {
                    field: accessors,
                    rule,
                },
            }
        }
        ValueShape::Optional(kind) => {
            let rule = atomic_rule(name, kind, ctx)?;
            ConversionDescriptor {
                decode: DecodeExpr::ReadOptional {
                    field: accessors.clone(),
                    rule: rule.clone(),
                },
                post_process: None,
                encode: EncodeStmt::WriteOptional {
                    field: accessors,
                    rule,
                },
            }
        }
        ValueShape::Repeated(kind) => {
            let rule = element_rule(name, kind, ctx)?;
            ConversionDescriptor {
                decode: DecodeExpr::Literal(representation.constructor_expr(size_hint)),
                post_process: Some(PostProcess::ForEachRepeatedElement {
                    field: accessors.clone(),
                    rule: rule.clone(),
                }),
                encode: EncodeStmt::ForEachRepeatedElement {
                    field: accessors,
                    rule,
                },
            }
        }
        ValueShape::Map { key, value } => {
            if repr::primitive_type(*key).is_none() {
                return Err(CodegenError::unsupported(name, key));
            }
            let rule = element_rule(name, value, ctx)?;
            ConversionDescriptor {
                decode: DecodeExpr::Literal(representation.constructor_expr(size_hint)),
                post_process: Some(PostProcess::ForEachMapEntry {
                    field: accessors.clone(),
                    rule: rule.clone(),
                }),
                encode: EncodeStmt::ForEachMapEntry {
                    field: accessors,
                    rule,
                },
            }
        }
        ValueShape::Stream(_) => return Err(CodegenError::nesting(name, &field.shape)),
    };
    Ok(descriptor)
}

/// Selects the representation of a field and derives its conversion.
///
/// # Errors
/// Returns the first error of [`repr::select`] or [`derive`].
pub fn describe_field(
    field: &FieldSpec,
    ctx: &CodegenContext<'_>,
    size_hint: Option<&str>,
) -> Result<FieldDescriptors, CodegenError> {
    let representation = repr::select(&field.name, &field.shape, ctx)?;
    let conversion = derive(field, &representation.descriptor, ctx, size_hint)?;
    Ok(FieldDescriptors {
        representation,
        conversion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::HeckNaming;
    use mutproto_schema::{PrimitiveKind, TypeName};

    fn ctx() -> CodegenContext<'static> {
        CodegenContext::new(&HeckNaming, false).outer_class("Book")
    }

    fn accessors(accessor: &str, capitalized: &str) -> FieldAccessors {
        FieldAccessors {
            accessor: accessor.to_string(),
            capitalized: capitalized.to_string(),
        }
    }

    #[test]
    fn test_atomic_primitive() {
        let field = FieldSpec::new("id", ValueShape::Atomic(FieldKind::Primitive(PrimitiveKind::Int32)), 1);
        let descriptors = describe_field(&field, &ctx(), None).expect("describe");
        assert_eq!(
            descriptors.conversion.decode,
            DecodeExpr::ReadAtomic {
                field: accessors("id", "Id"),
                rule: AtomicRule::Primitive,
            }
        );
        assert!(descriptors.conversion.post_process.is_none());
        assert_eq!(
            descriptors.conversion.encode,
            EncodeStmt::WriteAtomic {
                field: accessors("id", "Id"),
                rule: AtomicRule::Primitive,
            }
        );
    }

    #[test]
    fn test_optional_message_clears() {
        let shape = ValueShape::Optional(FieldKind::MessageRef(TypeName::new("Address")));
        let field = FieldSpec::new("home_address", shape, 2);
        let descriptors = describe_field(&field, &ctx(), None).expect("describe");
        let rule = AtomicRule::Message {
            class: "Address".to_string(),
            wire_class: "Book.Address".to_string(),
        };
        assert_eq!(
            descriptors.conversion.decode,
            DecodeExpr::ReadOptional {
                field: accessors("homeAddress", "HomeAddress"),
                rule: rule.clone(),
            }
        );
        assert!(descriptors.conversion.encode.clears_when_absent());
        assert_eq!(
            descriptors.conversion.encode,
            EncodeStmt::WriteOptional {
                field: accessors("homeAddress", "HomeAddress"),
                rule,
            }
        );
    }

    #[test]
    fn test_repeated_uses_size_hint() {
        let shape = ValueShape::Repeated(FieldKind::EnumRef(TypeName::new("Color")));
        let field = FieldSpec::new("colors", shape, 3);
        let descriptors = describe_field(&field, &ctx(), Some("proto.colorsCount")).expect("describe");
        assert_eq!(
            descriptors.conversion.decode,
            DecodeExpr::Literal("ArrayList(proto.colorsCount)".to_string())
        );
        assert_eq!(
            descriptors.conversion.post_process,
            Some(PostProcess::ForEachRepeatedElement {
                field: accessors("colors", "Colors"),
                rule: AtomicRule::Enum {
                    enum_class: "Color".to_string()
                },
            })
        );

        let empty = describe_field(&field, &ctx(), None).expect("describe");
        assert_eq!(
            empty.conversion.decode,
            DecodeExpr::Literal("mutableListOf()".to_string())
        );
    }

    #[test]
    fn test_map_rule_applies_to_values() {
        let shape = ValueShape::Map {
            key: PrimitiveKind::String,
            value: FieldKind::MessageRef(TypeName::new("Stat")),
        };
        let field = FieldSpec::new("stats", shape, 4);
        let descriptors = describe_field(&field, &ctx(), None).expect("describe");
        assert!(matches!(
            descriptors.conversion.encode,
            EncodeStmt::ForEachMapEntry {
                rule: AtomicRule::Message { ref wire_class, .. },
                ..
            } if wire_class == "Book.Stat"
        ));
    }

    #[test]
    fn test_union_atomic() {
        let field = FieldSpec::union(
            "contact",
            ValueShape::Atomic(FieldKind::UnionRef(TypeName::new("Person.contact"))),
        );
        let descriptors = describe_field(&field, &ctx(), None).expect("describe");
        assert_eq!(
            descriptors.conversion.decode,
            DecodeExpr::ReadAtomic {
                field: accessors("contact", "Contact"),
                rule: AtomicRule::Union {
                    class: "PersonContact".to_string()
                },
            }
        );
    }

    #[test]
    fn test_unsupported_fails_without_descriptor() {
        let cases = [
            ValueShape::Atomic(FieldKind::Unresolved("Foo".to_string())),
            ValueShape::Atomic(FieldKind::Empty),
            ValueShape::Optional(FieldKind::Primitive(PrimitiveKind::Bytes)),
            ValueShape::Map {
                key: PrimitiveKind::Int32,
                value: FieldKind::Primitive(PrimitiveKind::Fixed64),
            },
        ];
        for shape in cases {
            let field = FieldSpec::new("f", shape, 1);
            assert!(matches!(
                describe_field(&field, &ctx(), None),
                Err(CodegenError::UnsupportedFieldType { .. })
            ));
        }

        let int_map = describe_field(
            &FieldSpec::new(
                "m",
                ValueShape::Map {
                    key: PrimitiveKind::Int32,
                    value: FieldKind::Primitive(PrimitiveKind::Int32),
                },
                1,
            ),
            &ctx(),
            None,
        )
        .expect("describe")
        .representation
        .descriptor;
        for key in [
            PrimitiveKind::Uint64,
            PrimitiveKind::Fixed32,
            PrimitiveKind::Sfixed64,
        ] {
            let field = FieldSpec::new(
                "m",
                ValueShape::Map {
                    key,
                    value: FieldKind::Primitive(PrimitiveKind::Int32),
                },
                1,
            );
            match derive(&field, &int_map, &ctx(), None) {
                Err(CodegenError::UnsupportedFieldType { field, kind }) => {
                    assert_eq!(field, "m");
                    assert_eq!(kind, key.to_string());
                }
                other => panic!("expected unsupported map key, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_optional_union_reads_case_and_clears() {
        let union = FieldKind::UnionRef(TypeName::new("Person.contact"));
        let field = FieldSpec::new("contact", ValueShape::Optional(union.clone()), 1);
        let descriptors = describe_field(&field, &ctx(), None).expect("describe");
        let rule = AtomicRule::Union {
            class: "PersonContact".to_string(),
        };
        assert_eq!(
            descriptors.conversion.decode,
            DecodeExpr::ReadOptional {
                field: accessors("contact", "Contact"),
                rule: rule.clone(),
            }
        );
        assert!(descriptors.conversion.encode.clears_when_absent());

        for shape in [
            ValueShape::Repeated(union.clone()),
            ValueShape::Map {
                key: PrimitiveKind::String,
                value: union.clone(),
            },
        ] {
            let field = FieldSpec::new("contact", shape, 1);
            assert!(matches!(
                describe_field(&field, &ctx(), None),
                Err(CodegenError::InvalidShapeNesting { .. })
            ));
        }
    }

    #[test]
    fn test_tag_does_not_change_descriptors() {
        let shape = ValueShape::Repeated(FieldKind::MessageRef(TypeName::new("Item")));
        let first = describe_field(&FieldSpec::new("items", shape.clone(), 1), &ctx(), None).expect("describe");
        let second = describe_field(&FieldSpec::new("items", shape, 99), &ctx(), None).expect("describe");
        assert_eq!(first, second);
    }
}
