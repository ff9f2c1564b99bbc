//! Wire schema (`.proto`) generation.

use crate::emit::{self, Stmt};
use mutproto_schema::{
    Definition, EnumDef, EnumMember, FieldDef, FieldType, MessageDef, MessageMember, OneOfDef,
    OneOfMember, OptionDef, ReservedItem, RpcDef, SchemaIr, ServiceDef, ServiceMember, TypeExpr,
};

/// Generator for the proto3 wire schema.
pub struct ProtoGenerator<'a> {
    ir: &'a SchemaIr,
    package: &'a str,
    java_package: Option<&'a str>,
    outer_class: &'a str,
}

impl<'a> ProtoGenerator<'a> {
    /// Creates a new proto generator.
    #[must_use]
    pub fn new(ir: &'a SchemaIr, package: &'a str) -> Self {
        Self {
            ir,
            package,
            java_package: None,
            outer_class: "",
        }
    }

    /// Sets the `java_package` option.
    #[must_use]
    pub fn java_package(mut self, package: Option<&'a str>) -> Self {
        self.java_package = package;
        self
    }

    /// Sets the `java_outer_classname` option.
    #[must_use]
    pub fn outer_class(mut self, outer_class: &'a str) -> Self {
        self.outer_class = outer_class;
        self
    }

    /// Generates the complete `.proto` file.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str("// Generated by mutproto. Do not edit.\n\n");
        output.push_str("syntax = \"proto3\";\n\n");
        if !self.package.is_empty() {
            output.push_str(&format!("package {};\n\n", self.package));
        }

        let mut file_options = Vec::new();
        if let Some(java_package) = self.java_package {
            file_options.push(format!("option java_package = \"{java_package}\";"));
        }
        if !self.outer_class.is_empty() {
            file_options.push(format!(
                "option java_outer_classname = \"{}\";",
                self.outer_class
            ));
        }
        if !file_options.is_empty() {
            for option in file_options {
                output.push_str(&option);
                output.push('\n');
            }
            output.push('\n');
        }

        let mut tree = Vec::new();
        for (i, definition) in self.ir.definitions.iter().enumerate() {
            if i > 0 {
                tree.push(Stmt::Blank);
            }
            tree.push(match definition {
                Definition::Message(message) => generate_message(message),
                Definition::Enum(enum_def) => generate_enum(enum_def),
                Definition::Service(service) => generate_service(service),
            });
        }
        output.push_str(&emit::render(&tree));
        output
    }
}

fn generate_message(message: &MessageDef) -> Stmt {
    let mut body = Vec::new();
    for member in &message.members {
        match member {
            MessageMember::Field(field) => body.push(Stmt::line(field_line(field))),
            MessageMember::OneOf(one_of) => body.push(generate_one_of(one_of)),
            MessageMember::NestedEnum(enum_def) => body.push(generate_enum(enum_def)),
            MessageMember::NestedMessage(nested) => body.push(generate_message(nested)),
            MessageMember::Option(option) => body.push(Stmt::line(option_line(option))),
            MessageMember::Reserved(items) => body.extend(reserved_lines(items)),
        }
    }
    Stmt::block(format!("message {} {{", message.name), body)
}

fn generate_one_of(one_of: &OneOfDef) -> Stmt {
    let body = one_of
        .members
        .iter()
        .map(|member| match member {
            OneOfMember::Field(field) => Stmt::line(field_line(field)),
            OneOfMember::Option(option) => Stmt::line(option_line(option)),
        })
        .collect();
    Stmt::block(format!("oneof {} {{", one_of.name), body)
}

fn generate_enum(enum_def: &EnumDef) -> Stmt {
    let body = enum_def
        .members
        .iter()
        .map(|member| match member {
            EnumMember::Option(option) => Stmt::line(option_line(option)),
            EnumMember::Value(value) => Stmt::line(format!(
                "{} = {}{};",
                value.name,
                value.number(),
                options_suffix(&value.options)
            )),
        })
        .collect();
    Stmt::block(format!("enum {} {{", enum_def.name), body)
}

fn generate_service(service: &ServiceDef) -> Stmt {
    let body = service
        .members
        .iter()
        .map(|member| match member {
            ServiceMember::Option(option) => Stmt::line(option_line(option)),
            ServiceMember::Rpc(rpc) => generate_rpc(rpc),
        })
        .collect();
    Stmt::block(format!("service {} {{", service.name), body)
}

fn generate_rpc(rpc: &RpcDef) -> Stmt {
    let stream = |streamed: bool| if streamed { "stream " } else { "" };
    let signature = format!(
        "rpc {}({}{}) returns ({}{})",
        rpc.name,
        stream(rpc.in_stream),
        rpc.in_type,
        stream(rpc.out_stream),
        rpc.out_type
    );
    if rpc.options.is_empty() {
        Stmt::line(format!("{signature};"))
    } else {
        let options = rpc.options.iter().map(|o| Stmt::line(option_line(o))).collect();
        Stmt::block(format!("{signature} {{"), options)
    }
}

/// Renders a field type as written in proto3.
#[must_use]
pub fn type_text(field_type: &FieldType) -> String {
    let base = match &field_type.expr {
        TypeExpr::Named(name) => name.clone(),
        TypeExpr::Map { key, value } => format!("map<{key}, {value}>"),
    };
    if field_type.repeated {
        format!("repeated {base}")
    } else if field_type.optional {
        format!("optional {base}")
    } else {
        base
    }
}

fn field_line(field: &FieldDef) -> String {
    format!(
        "{} {} = {}{};",
        type_text(&field.field_type),
        field.name,
        field.tag,
        options_suffix(&field.options)
    )
}

fn option_line(option: &OptionDef) -> String {
    format!("option {} = {};", option.name, option.value)
}

fn options_suffix(options: &[OptionDef]) -> String {
    if options.is_empty() {
        return String::new();
    }
    let joined = options
        .iter()
        .map(|option| format!("{} = {}", option.name, option.value))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" [{joined}]")
}

/// Numbers and names cannot share a `reserved` statement.
fn reserved_lines(items: &[ReservedItem]) -> Vec<Stmt> {
    let mut numbers = Vec::new();
    let mut names = Vec::new();
    for item in items {
        match item {
            ReservedItem::Tag(tag) => numbers.push(tag.to_string()),
            ReservedItem::Range { start, end } => numbers.push(format!("{start} to {end}")),
            ReservedItem::Name(name) => names.push(format!("\"{name}\"")),
        }
    }
    [numbers, names]
        .into_iter()
        .filter(|group| !group.is_empty())
        .map(|group| Stmt::line(format!("reserved {};", group.join(", "))))
        .collect()
}
