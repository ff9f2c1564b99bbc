//! Kotlin mutable object model generation.

pub mod convert;
pub mod enums;
pub mod messages;
pub mod unions;

pub use enums::EnumGenerator;
pub use messages::MessageGenerator;
pub use unions::UnionGenerator;

use crate::emit::{self, Stmt};
use crate::model::{EnumModel, MessageModel, UnionModel};
use std::collections::BTreeSet;

/// Generator for the Kotlin source file.
pub struct KotlinGenerator<'a> {
    package: &'a str,
    imports: BTreeSet<String>,
    enums: &'a [EnumModel],
    unions: &'a [UnionModel],
    messages: &'a [MessageModel],
}

impl<'a> KotlinGenerator<'a> {
    /// Creates a new Kotlin generator.
    #[must_use]
    pub fn new(
        package: &'a str,
        enums: &'a [EnumModel],
        unions: &'a [UnionModel],
        messages: &'a [MessageModel],
    ) -> Self {
        let imports = messages
            .iter()
            .flat_map(MessageModel::imports)
            .map(|import| import.to_string())
            .collect();
        Self {
            package,
            imports,
            enums,
            unions,
            messages,
        }
    }

    /// Adds imports on top of those required by the representations.
    #[must_use]
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = String>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Generates the complete source file.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str("// Generated by mutproto. Do not edit.\n\n");
        if !self.package.is_empty() {
            output.push_str(&format!("package {}\n\n", self.package));
        }
        if !self.imports.is_empty() {
            for import in &self.imports {
                output.push_str(&format!("import {import}\n"));
            }
            output.push('\n');
        }

        let mut definitions: Vec<Vec<Stmt>> = Vec::new();
        for model in self.enums {
            definitions.push(vec![EnumGenerator::new(model).generate()]);
        }
        for message in self.messages {
            for union in self
                .unions
                .iter()
                .filter(|union| union.name.parent().as_ref() == Some(&message.name))
            {
                definitions.push(vec![UnionGenerator::new(union).generate()]);
            }
            definitions.push(MessageGenerator::new(message).generate());
        }

        let mut tree = Vec::new();
        for (i, definition) in definitions.into_iter().enumerate() {
            if i > 0 {
                tree.push(Stmt::Blank);
            }
            tree.extend(definition);
        }
        output.push_str(&emit::render(&tree));
        output
    }
}
