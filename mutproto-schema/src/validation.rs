//! Schema validation utilities.
//!
//! Field numbers and enum value names are not checked during resolution.
//! These checks are opt-in and run before any code is generated.

use crate::error::SchemaError;
use crate::ir::SchemaIr;
use crate::messages::{FieldDef, MessageDef};
use crate::types::{EnumDef, TypeName};
use std::collections::HashSet;

/// Largest legal field number.
pub const MAX_TAG: u32 = 536_870_911;

/// Field numbers reserved for the protobuf implementation.
pub const IMPLEMENTATION_RESERVED: std::ops::RangeInclusive<u32> = 19_000..=19_999;

/// Validates field numbers and enum value names across the schema.
///
/// # Errors
/// Returns `SchemaError::DuplicateTag`, `SchemaError::TagOutOfRange`, or
/// `SchemaError::Validation` for the first problem found.
pub fn validate_schema(ir: &SchemaIr) -> Result<(), SchemaError> {
    for scoped in ir.all_messages() {
        validate_message(&scoped.name, scoped.def)?;
    }
    for scoped in ir.all_enums() {
        validate_enum(&scoped.name, scoped.def)?;
    }
    Ok(())
}

/// Returns true if `tag` may be used as a field number.
#[must_use]
pub fn is_legal_tag(tag: u32) -> bool {
    (1..=MAX_TAG).contains(&tag) && !IMPLEMENTATION_RESERVED.contains(&tag)
}

fn validate_message(name: &TypeName, message: &MessageDef) -> Result<(), SchemaError> {
    let one_of_fields = message.one_ofs().flat_map(|one_of| one_of.fields());
    let mut seen = HashSet::new();

    for field in message.fields().chain(one_of_fields) {
        check_tag(name, field)?;
        if !seen.insert(field.tag) {
            return Err(SchemaError::DuplicateTag {
                message: name.to_string(),
                field: field.name.clone(),
                tag: field.tag,
            });
        }
        if message.reserved().any(|item| item.contains_tag(field.tag)) {
            return Err(SchemaError::validation(format!(
                "field '{}' in message '{}' uses reserved tag {}",
                field.name, name, field.tag
            )));
        }
    }
    Ok(())
}

fn check_tag(message: &TypeName, field: &FieldDef) -> Result<(), SchemaError> {
    if is_legal_tag(field.tag) {
        Ok(())
    } else {
        Err(SchemaError::TagOutOfRange {
            message: message.to_string(),
            field: field.name.clone(),
            tag: field.tag,
        })
    }
}

fn validate_enum(name: &TypeName, enum_def: &EnumDef) -> Result<(), SchemaError> {
    let mut seen_names = HashSet::new();
    for value in enum_def.values() {
        if !seen_names.insert(value.name.as_str()) {
            return Err(SchemaError::validation(format!(
                "Duplicate enum value name '{}' in enum '{}'",
                value.name, name
            )));
        }
    }
    if enum_def.values().next().is_none() {
        return Err(SchemaError::validation(format!("enum '{name}' has no values")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{MessageMember, OneOfDef, ReservedItem};
    use crate::types::{EnumValueDef, FieldType};

    fn schema_with(message: MessageDef) -> SchemaIr {
        let mut ir = SchemaIr::new("test");
        ir.add_message(message);
        ir
    }

    #[test]
    fn test_validate_valid_schema() {
        let mut msg = MessageDef::new("Point");
        msg.add_field(FieldDef::new("x", FieldType::named("int32"), 1));
        msg.add_field(FieldDef::new("y", FieldType::named("int32"), 2));
        let mut ir = schema_with(msg);
        let mut level = EnumDef::new("Level");
        level.add_value(EnumValueDef::new("LOW", 0));
        ir.add_enum(level);
        assert!(validate_schema(&ir).is_ok());
    }

    #[test]
    fn test_validate_duplicate_tag_across_oneof() {
        let mut msg = MessageDef::new("Shape");
        msg.add_field(FieldDef::new("id", FieldType::named("int32"), 1));
        let mut kind = OneOfDef::new("kind");
        kind.add_field(FieldDef::new("circle", FieldType::named("float"), 1));
        msg.add_one_of(kind);
        let err = validate_schema(&schema_with(msg)).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTag { tag: 1, ref field, .. } if field == "circle"));
    }

    #[test]
    fn test_validate_tag_range() {
        assert!(!is_legal_tag(0));
        assert!(is_legal_tag(1));
        assert!(is_legal_tag(MAX_TAG));
        assert!(!is_legal_tag(MAX_TAG + 1));
        assert!(!is_legal_tag(19_500));

        let mut msg = MessageDef::new("Bad");
        msg.add_field(FieldDef::new("x", FieldType::named("int32"), 19_000));
        let err = validate_schema(&schema_with(msg)).unwrap_err();
        assert!(matches!(err, SchemaError::TagOutOfRange { tag: 19_000, .. }));
    }

    #[test]
    fn test_validate_reserved_tag() {
        let mut msg = MessageDef::new("Legacy");
        msg.members
            .push(MessageMember::Reserved(vec![ReservedItem::Range { start: 2, end: 4 }]));
        msg.add_field(FieldDef::new("x", FieldType::named("int32"), 3));
        let err = validate_schema(&schema_with(msg)).unwrap_err();
        assert!(matches!(err, SchemaError::Validation { .. }));
    }

    #[test]
    fn test_validate_duplicate_enum_value_name() {
        let mut ir = SchemaIr::new("test");
        let mut level = EnumDef::new("Level");
        level.add_value(EnumValueDef::new("LOW", 0));
        level.add_value(EnumValueDef::new("LOW", 1));
        ir.add_enum(level);
        assert!(matches!(validate_schema(&ir), Err(SchemaError::Validation { .. })));
    }
}
