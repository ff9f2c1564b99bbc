//! Rendering of conversion descriptors as Kotlin statements.

use crate::conversion::{AtomicRule, DecodeExpr, EncodeStmt, FieldAccessors, PostProcess};
use crate::emit::Stmt;

/// Applies the wire-to-native conversion of a rule to a raw wire value.
#[must_use]
pub fn read_atomic(rule: &AtomicRule, raw: &str) -> String {
    match rule {
        AtomicRule::Primitive => raw.to_string(),
        AtomicRule::Enum { enum_class } => format!("{enum_class}.fromProto({raw})"),
        AtomicRule::Message { class, .. } | AtomicRule::Union { class } => {
            format!("{class}.fromProto({raw})")
        }
    }
}

/// Writes a native value into the wire builder.
#[must_use]
pub fn write_atomic(rule: &AtomicRule, value: &str, builder: &str, field: &FieldAccessors) -> String {
    let accessor = &field.accessor;
    match rule {
        AtomicRule::Primitive => format!("{builder}.{accessor} = {value}"),
        AtomicRule::Enum { .. } => format!("{builder}.{accessor} = {value}.toProto()"),
        AtomicRule::Message { .. } => format!("{value}.toProto({builder}.{accessor}Builder)"),
        AtomicRule::Union { .. } => format!("{value}.toProto({builder})"),
    }
}

/// Unions read the containing wire message; every other rule reads the field.
fn wire_source(rule: &AtomicRule, proto: &str, field: &FieldAccessors) -> String {
    match rule {
        AtomicRule::Union { .. } => proto.to_string(),
        _ => format!("{proto}.{}", field.accessor),
    }
}

/// Presence test of an optional field; an unset oneof reports case number 0.
fn absent(rule: &AtomicRule, proto: &str, field: &FieldAccessors) -> String {
    match rule {
        AtomicRule::Union { .. } => format!("{proto}.{}Case.number == 0", field.accessor),
        _ => format!("!{proto}.has{}()", field.capitalized),
    }
}

/// Renders the first-phase decode expression.
#[must_use]
pub fn decode_expr(decode: &DecodeExpr, proto: &str) -> String {
    match decode {
        DecodeExpr::ReadAtomic { field, rule } => read_atomic(rule, &wire_source(rule, proto, field)),
        DecodeExpr::ReadOptional { field, rule } => format!(
            "if ({}) null else {}",
            absent(rule, proto, field),
            read_atomic(rule, &wire_source(rule, proto, field))
        ),
        DecodeExpr::Literal(expr) => expr.clone(),
    }
}

/// Renders the container fill step.
#[must_use]
pub fn post_process(step: &PostProcess, proto: &str, instance: &str) -> Stmt {
    match step {
        PostProcess::ForEachRepeatedElement { field, rule } => Stmt::block(
            format!("{proto}.{}List.forEach {{ elem ->", field.accessor),
            vec![Stmt::line(format!(
                "{instance}.{}.add({})",
                field.accessor,
                read_atomic(rule, "elem")
            ))],
        ),
        PostProcess::ForEachMapEntry { field, rule } => Stmt::block(
            format!("{proto}.{}Map.forEach {{ entry ->", field.accessor),
            vec![Stmt::line(format!(
                "{instance}.{}.put(entry.key, {})",
                field.accessor,
                read_atomic(rule, "entry.value")
            ))],
        ),
    }
}

/// Renders the encode statement.
#[must_use]
pub fn encode(stmt: &EncodeStmt, this: &str, builder: &str) -> Vec<Stmt> {
    match stmt {
        EncodeStmt::WriteAtomic { field, rule } => {
            let value = format!("{this}.{}", field.accessor);
            vec![Stmt::line(write_atomic(rule, &value, builder, field))]
        }
        EncodeStmt::WriteOptional { field, rule } => {
            let clear = format!("{builder}.clear{}()", field.capitalized);
            let line = match rule {
                AtomicRule::Message { .. } => format!(
                    "{this}.{accessor}?.toProto({builder}.{accessor}Builder) ?: {clear}",
                    accessor = field.accessor
                ),
                _ => format!(
                    "{this}.{}?.let {{ value -> {} }} ?: {clear}",
                    field.accessor,
                    write_atomic(rule, "value", builder, field)
                ),
            };
            vec![Stmt::line(line)]
        }
        EncodeStmt::ForEachRepeatedElement { field, rule } => {
            let capitalized = &field.capitalized;
            let append = match rule {
                AtomicRule::Primitive => format!("{builder}.add{capitalized}(elem)"),
                AtomicRule::Enum { .. } => format!("{builder}.add{capitalized}(elem.toProto())"),
                AtomicRule::Message { .. } => {
                    format!("elem.toProto({builder}.add{capitalized}Builder())")
                }
                AtomicRule::Union { .. } => format!("elem.toProto({builder})"),
            };
            vec![Stmt::block(
                format!("{this}.{}.forEach {{ elem ->", field.accessor),
                vec![Stmt::line(append)],
            )]
        }
        EncodeStmt::ForEachMapEntry { field, rule } => {
            let capitalized = &field.capitalized;
            let body = match rule {
                AtomicRule::Primitive => {
                    vec![Stmt::line(format!("{builder}.put{capitalized}(key, value)"))]
                }
                AtomicRule::Enum { .. } => vec![Stmt::line(format!(
                    "{builder}.put{capitalized}(key, value.toProto())"
                ))],
                AtomicRule::Message { wire_class, .. } => vec![
                    Stmt::line(format!("val valueBuilder = {wire_class}.newBuilder()")),
                    Stmt::line("value.toProto(valueBuilder)"),
                    Stmt::line(format!(
                        "{builder}.put{capitalized}(key, valueBuilder.build())"
                    )),
                ],
                AtomicRule::Union { .. } => vec![Stmt::line(format!("value.toProto({builder})"))],
            };
            vec![Stmt::block(
                format!("{this}.{}.forEach {{ (key, value) ->", field.accessor),
                body,
            )]
        }
    }
}
