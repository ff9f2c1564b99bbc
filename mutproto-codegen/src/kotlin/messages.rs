//! Mutable data class generation.

use super::convert;
use crate::emit::Stmt;
use crate::model::{FieldModel, MessageModel};

/// Generator for mutable message classes.
pub struct MessageGenerator<'a> {
    message: &'a MessageModel,
}

impl<'a> MessageGenerator<'a> {
    /// Creates a new message generator.
    #[must_use]
    pub fn new(message: &'a MessageModel) -> Self {
        Self { message }
    }

    /// Generates the class.
    #[must_use]
    pub fn generate(&self) -> Vec<Stmt> {
        let class = &self.message.class;
        let body = vec![
            self.generate_companion(),
            Stmt::Blank,
            self.generate_to_proto(),
            Stmt::Blank,
            self.generate_to_proto_builder(),
        ];

        if self.message.fields.is_empty() {
            return vec![Stmt::block(format!("class {class} {{"), body)];
        }

        let properties = self
            .message
            .fields
            .iter()
            .map(|field| {
                let repr = &field.descriptors.representation.descriptor;
                Stmt::line(format!(
                    "{} {}: {},",
                    repr.keyword(),
                    field.accessors.accessor,
                    repr.native_type
                ))
            })
            .collect();

        vec![
            Stmt::line(format!("data class {class}(")),
            Stmt::Indent(properties),
            Stmt::block(") {", body),
        ]
    }

    /// Builds a constructor call with one named argument per field.
    fn construct(&self, open: &str, value: impl Fn(&FieldModel) -> String) -> Stmt {
        let class = &self.message.class;
        if self.message.fields.is_empty() {
            return Stmt::line(format!("{open}{class}()"));
        }
        let args = self
            .message
            .fields
            .iter()
            .map(|field| Stmt::line(format!("{} = {},", field.accessors.accessor, value(field))))
            .collect();
        Stmt::block_with(format!("{open}{class}("), args, ")")
    }

    fn generate_companion(&self) -> Stmt {
        let class = &self.message.class;
        let wire = &self.message.wire_class;

        let create = self.construct(&format!("fun create(): {class} = "), |field| {
            field.descriptors.representation.descriptor.constructor_expr(None)
        });

        let mut from_proto = vec![self.construct("val instance = ", |field| {
            convert::decode_expr(&field.descriptors.conversion.decode, "proto")
        })];
        for field in &self.message.fields {
            if let Some(step) = &field.descriptors.conversion.post_process {
                from_proto.push(convert::post_process(step, "proto", "instance"));
            }
        }
        from_proto.push(Stmt::line("return instance"));

        Stmt::block(
            "companion object {",
            vec![
                create,
                Stmt::Blank,
                Stmt::block(format!("fun fromProto(proto: {wire}): {class} {{"), from_proto),
            ],
        )
    }

    fn generate_to_proto(&self) -> Stmt {
        let wire = &self.message.wire_class;
        Stmt::block(
            format!("fun toProto(): {wire} {{"),
            vec![
                Stmt::line(format!("val builder = {wire}.newBuilder()")),
                Stmt::line("toProto(builder)"),
                Stmt::line("return builder.build()"),
            ],
        )
    }

    fn generate_to_proto_builder(&self) -> Stmt {
        let wire = &self.message.wire_class;
        let body = self
            .message
            .fields
            .iter()
            .flat_map(|field| convert::encode(&field.descriptors.conversion.encode, "this", "builder"))
            .collect();
        Stmt::block(format!("fun toProto(builder: {wire}.Builder) {{"), body)
    }
}
