//! Main code generator.

use crate::config::GeneratorConfig;
use crate::context::CodegenContext;
use crate::conversion::{self, FieldAccessors, FieldSpec};
use crate::error::CodegenError;
use crate::kotlin::KotlinGenerator;
use crate::model::{AlternativeModel, EnumModel, FieldModel, MessageModel, UnionModel};
use crate::proto::ProtoGenerator;
use crate::repr;
use mutproto_schema::{
    FieldKind, MessageMember, SchemaError, SchemaIr, ScopedEnum, ScopedMessage, ScopedOneOf,
    ShapeKind, SymbolTable, TypeName, ValueShape, project_oneof, validate_schema,
};
use std::path::{Path, PathBuf};

/// Generator for the wire schema and the Kotlin object model.
pub struct Generator<'a> {
    ir: &'a SchemaIr,
    config: &'a GeneratorConfig,
    symbols: SymbolTable,
}

impl<'a> Generator<'a> {
    /// Creates a new generator, building the symbol table of the schema.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` on duplicate definitions, or on invalid
    /// field numbers when tag validation is enabled.
    pub fn new(ir: &'a SchemaIr, config: &'a GeneratorConfig) -> Result<Self, CodegenError> {
        let symbols = SymbolTable::build(ir)?;
        if config.validate_tags {
            validate_schema(ir)?;
        }
        Ok(Self {
            ir,
            config,
            symbols,
        })
    }

    /// Returns the representation and conversion context of this run.
    #[must_use]
    pub fn context(&self) -> CodegenContext<'_> {
        CodegenContext::new(
            self.config.naming.as_ref(),
            self.config.compact_collection_mode,
        )
        .outer_class(&self.config.outer_class_name)
    }

    fn proto_package(&self) -> &str {
        self.config
            .proto_package
            .as_deref()
            .unwrap_or(&self.ir.package)
    }

    fn java_package(&self) -> &str {
        self.config
            .java_package
            .as_deref()
            .unwrap_or_else(|| self.proto_package())
    }

    /// Derives every field descriptor of a message.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownMessage` if no message has this canonical
    /// name, or the first field error.
    pub fn describe_message(&self, name: &TypeName) -> Result<MessageModel, CodegenError> {
        let messages = self.ir.all_messages();
        let scoped = messages
            .iter()
            .find(|scoped| &scoped.name == name)
            .ok_or_else(|| CodegenError::UnknownMessage {
                name: name.to_string(),
            })?;
        self.describe_scoped(scoped)
    }

    fn describe_scoped(&self, scoped: &ScopedMessage<'_>) -> Result<MessageModel, CodegenError> {
        let ctx = self.context();
        let scope = &scoped.name;
        tracing::debug!("Describing message {}", scope);

        let mut fields = Vec::new();
        for member in &scoped.def.members {
            let spec = match member {
                MessageMember::Field(field) => {
                    let shape = self
                        .symbols
                        .resolve(&field.field_type, Some(scope), &field.name)?;
                    FieldSpec::new(field.name.clone(), shape, field.tag)
                }
                MessageMember::OneOf(one_of) => {
                    FieldSpec::union(one_of.name.clone(), project_oneof(scope, &one_of.name))
                }
                _ => continue,
            };

            let accessors = FieldAccessors::of(&spec.name, ctx.naming);
            let hint = self.size_hint(scope, &spec, &accessors);
            let descriptors = conversion::describe_field(&spec, &ctx, hint.as_deref())?;
            tracing::debug!("  field {}: {}", spec.name, spec.shape);
            fields.push(FieldModel {
                spec,
                accessors,
                descriptors,
            });
        }

        Ok(MessageModel {
            name: scope.clone(),
            class: ctx.naming.class_symbol(scope),
            wire_class: ctx.wire_class(scope),
            fields,
        })
    }

    fn size_hint(
        &self,
        message: &TypeName,
        spec: &FieldSpec,
        accessors: &FieldAccessors,
    ) -> Option<String> {
        if !spec.shape.is_collection() {
            return None;
        }
        if let Some(hint) = self.config.size_hint_for(message.as_str(), &spec.name) {
            return Some(hint.to_string());
        }
        self.config
            .wire_count_hints
            .then(|| format!("proto.{}Count", accessors.accessor))
    }

    fn describe_union(&self, scoped: &ScopedOneOf<'_>) -> Result<UnionModel, CodegenError> {
        let ctx = self.context();
        let mut alternatives = Vec::new();
        for field in scoped.def.fields() {
            let shape = self
                .symbols
                .resolve(&field.field_type, Some(&scoped.message), &field.name)?;
            let ValueShape::Atomic(kind) = &shape else {
                return Err(CodegenError::nesting(&field.name, &shape));
            };
            let rule = conversion::atomic_rule(&field.name, kind, &ctx)?;
            let selection = repr::select(&field.name, &shape, &ctx)?;
            alternatives.push(AlternativeModel {
                name: field.name.clone(),
                variant: ctx.naming.capitalized_accessor(&field.name),
                case_constant: ctx.naming.case_constant(&field.name),
                accessors: FieldAccessors::of(&field.name, ctx.naming),
                native_type: selection.descriptor.native_type,
                rule,
            });
        }

        Ok(UnionModel {
            name: scoped.name.clone(),
            class: ctx.naming.class_symbol(&scoped.name),
            message_wire_class: ctx.wire_class(&scoped.message),
            accessors: FieldAccessors::of(&scoped.def.name, ctx.naming),
            alternatives,
        })
    }

    fn describe_enum(&self, scoped: &ScopedEnum<'_>) -> Result<EnumModel, CodegenError> {
        let ctx = self.context();
        let zero = scoped.def.zero_value().ok_or_else(|| {
            SchemaError::validation(format!("enum '{}' has no values", scoped.name))
        })?;
        if zero.number() != 0 {
            tracing::warn!(
                "Enum {} has no zero value, defaulting to {}",
                scoped.name,
                zero.name
            );
        }
        Ok(EnumModel {
            name: scoped.name.clone(),
            class: ctx.naming.enum_class_symbol(&scoped.name),
            wire_class: ctx.wire_class(&scoped.name),
            values: scoped.def.values().map(|value| value.name.clone()).collect(),
            default_value: zero.name.clone(),
        })
    }

    /// Resolves both sides of every RPC from the root scope.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedFieldType` when a side names an
    /// unknown type or anything other than a message.
    pub fn check_services(&self) -> Result<(), CodegenError> {
        for service in self.ir.services() {
            for rpc in service.rpcs() {
                let label = format!("{}.{}", service.name, rpc.name);
                tracing::debug!("Checking rpc {}", label);
                let sides = [
                    (rpc.in_stream, rpc.in_type.as_str()),
                    (rpc.out_stream, rpc.out_type.as_str()),
                ];
                for (stream, type_name) in sides {
                    let shape = self.symbols.resolve_rpc(stream, type_name, None);
                    rpc_message(&label, &shape)?;
                }
            }
        }
        Ok(())
    }

    /// Generates both output files.
    ///
    /// Every message is fully described before any text is produced; the
    /// first error aborts the whole run.
    ///
    /// # Errors
    /// Returns the first `CodegenError` raised by any definition.
    pub fn generate(&self) -> Result<GeneratedFiles, CodegenError> {
        self.check_services()?;
        let enums = self
            .ir
            .all_enums()
            .iter()
            .map(|scoped| self.describe_enum(scoped))
            .collect::<Result<Vec<_>, _>>()?;
        let unions = self
            .ir
            .all_one_ofs()
            .iter()
            .map(|scoped| self.describe_union(scoped))
            .collect::<Result<Vec<_>, _>>()?;
        let messages = self
            .ir
            .all_messages()
            .iter()
            .map(|scoped| self.describe_scoped(scoped))
            .collect::<Result<Vec<_>, _>>()?;

        let proto = ProtoGenerator::new(self.ir, self.proto_package())
            .java_package(self.config.java_package.as_deref())
            .outer_class(&self.config.outer_class_name)
            .generate();

        let mut imports = self.config.imports.clone();
        let java_package = self.java_package();
        if !java_package.is_empty() && !self.config.outer_class_name.is_empty() {
            imports.push(format!("{java_package}.{}", self.config.outer_class_name));
        }
        let kotlin = KotlinGenerator::new(&self.config.kotlin_package, &enums, &unions, &messages)
            .with_imports(imports)
            .generate();

        Ok(GeneratedFiles {
            proto: GeneratedFile {
                path: PathBuf::from(&self.config.proto_file_name),
                contents: proto,
            },
            kotlin: GeneratedFile {
                path: package_dir(&self.config.kotlin_package).join(&self.config.kotlin_file_name),
                contents: kotlin,
            },
        })
    }
}

/// Payload of one RPC side; only messages travel over a method.
fn rpc_message<'s>(label: &str, shape: &'s ValueShape) -> Result<&'s TypeName, CodegenError> {
    let kind = match shape.wrapper() {
        ShapeKind::Atomic | ShapeKind::Stream => shape.element_kind(),
        _ => return Err(CodegenError::nesting(label, shape)),
    };
    match kind {
        FieldKind::MessageRef(name) => Ok(name),
        kind if kind.is_sentinel() => Err(CodegenError::unsupported(label, kind)),
        kind => Err(CodegenError::unsupported(
            label,
            format!("{kind} (rpc types must be messages)"),
        )),
    }
}

fn package_dir(package: &str) -> PathBuf {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// One generated file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative path.
    pub path: PathBuf,
    /// File contents.
    pub contents: String,
}

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Wire schema.
    pub proto: GeneratedFile,
    /// Kotlin object model.
    pub kotlin: GeneratedFile,
}

impl GeneratedFiles {
    /// Writes both files under `dir`, creating directories as needed.
    ///
    /// # Errors
    /// Returns `CodegenError::Io` if a directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let mut written = Vec::new();
        for file in [&self.proto, &self.kotlin] {
            let path = dir.join(&file.path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &file.contents)?;
            tracing::info!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
