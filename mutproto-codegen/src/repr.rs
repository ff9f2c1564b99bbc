//! Native representation selection.
//!
//! Maps a resolved [`ValueShape`] and the collection mode to the native type a
//! field is declared with, its default value and how its container is built.
//! Auxiliary imports the representation needs are returned with it.

use crate::context::CodegenContext;
use crate::error::CodegenError;
use mutproto_schema::{FieldKind, PrimitiveKind, ValueShape};
use std::collections::BTreeSet;
use std::fmt;

/// Import required by a selected representation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuxImport(String);

impl AuxImport {
    /// Creates an import of a fully qualified symbol.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    fn ktx(symbol: &str) -> Self {
        Self(format!("ktx.collections.{symbol}"))
    }

    fn gdx(symbol: &str) -> Self {
        Self(format!("com.badlogic.gdx.utils.{symbol}"))
    }

    /// Returns the fully qualified symbol.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuxImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a collection container is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorExpr {
    empty: String,
    sized: String,
}

impl ConstructorExpr {
    /// Constructor taking an optional capacity argument.
    #[must_use]
    pub fn uniform(callee: impl Into<String>) -> Self {
        let callee = callee.into();
        Self {
            empty: callee.clone(),
            sized: callee,
        }
    }

    /// Distinct callees for empty and pre-sized construction.
    #[must_use]
    pub fn split(empty: impl Into<String>, sized: impl Into<String>) -> Self {
        Self {
            empty: empty.into(),
            sized: sized.into(),
        }
    }

    /// Renders the construction call.
    #[must_use]
    pub fn render(&self, size_hint: Option<&str>) -> String {
        match size_hint {
            Some(hint) => format!("{}({})", self.sized, hint),
            None => format!("{}()", self.empty),
        }
    }
}

/// Native representation of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepresentationDescriptor {
    /// Declared native type.
    pub native_type: String,
    /// Reassignable (`var`) when true; collections and messages are mutated in place.
    pub has_value_semantics: bool,
    /// Expression of the zero value.
    pub default_expr: String,
    /// Container construction, for repeated and map fields.
    pub constructor: Option<ConstructorExpr>,
}

impl RepresentationDescriptor {
    fn value(native_type: impl Into<String>, default_expr: impl Into<String>) -> Self {
        Self {
            native_type: native_type.into(),
            has_value_semantics: true,
            default_expr: default_expr.into(),
            constructor: None,
        }
    }

    fn collection(native_type: impl Into<String>, constructor: ConstructorExpr) -> Self {
        Self {
            native_type: native_type.into(),
            has_value_semantics: false,
            default_expr: constructor.render(None),
            constructor: Some(constructor),
        }
    }

    /// Returns the initializer expression, pre-sizing containers when a hint
    /// is given.
    #[must_use]
    pub fn constructor_expr(&self, size_hint: Option<&str>) -> String {
        match &self.constructor {
            Some(constructor) => constructor.render(size_hint),
            None => self.default_expr.clone(),
        }
    }

    /// Returns the property keyword.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        if self.has_value_semantics { "var" } else { "val" }
    }
}

/// Selected representation with the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Representation.
    pub descriptor: RepresentationDescriptor,
    /// Imports to merge into the generated file.
    pub imports: BTreeSet<AuxImport>,
}

/// Returns the native type and zero value of a supported primitive.
#[must_use]
pub const fn primitive_type(kind: PrimitiveKind) -> Option<(&'static str, &'static str)> {
    match kind {
        PrimitiveKind::Bool => Some(("Boolean", "false")),
        PrimitiveKind::Int32 | PrimitiveKind::Sint32 => Some(("Int", "0")),
        PrimitiveKind::Int64 | PrimitiveKind::Sint64 => Some(("Long", "0L")),
        PrimitiveKind::Float => Some(("Float", "0f")),
        PrimitiveKind::Double => Some(("Double", "0.0")),
        PrimitiveKind::String => Some(("String", "\"\"")),
        PrimitiveKind::Uint32
        | PrimitiveKind::Uint64
        | PrimitiveKind::Fixed32
        | PrimitiveKind::Fixed64
        | PrimitiveKind::Sfixed32
        | PrimitiveKind::Sfixed64
        | PrimitiveKind::Bytes => None,
    }
}

/// Selects the native representation of a field.
///
/// # Errors
/// Returns `CodegenError::UnsupportedFieldType` for sentinel kinds and
/// primitives without a native mapping, and
/// `CodegenError::InvalidShapeNesting` for stream shapes and unions inside a
/// collection.
pub fn select(
    field: &str,
    shape: &ValueShape,
    ctx: &CodegenContext<'_>,
) -> Result<Selection, CodegenError> {
    let mut imports = BTreeSet::new();
    let descriptor = match shape {
        ValueShape::Atomic(kind) => atomic(field, kind, ctx)?,
        ValueShape::Optional(kind) => {
            let inner = atomic(field, kind, ctx)?;
            RepresentationDescriptor::value(format!("{}?", inner.native_type), "null")
        }
        ValueShape::Repeated(kind) => repeated(field, kind, ctx, &mut imports)?,
        ValueShape::Map { key, value } => map(field, *key, value, ctx, &mut imports)?,
        ValueShape::Stream(_) => return Err(CodegenError::nesting(field, shape)),
    };
    Ok(Selection {
        descriptor,
        imports,
    })
}

fn primitive(field: &str, kind: PrimitiveKind) -> Result<RepresentationDescriptor, CodegenError> {
    primitive_type(kind)
        .map(|(native, default)| RepresentationDescriptor::value(native, default))
        .ok_or_else(|| CodegenError::unsupported(field, kind))
}

fn atomic(
    field: &str,
    kind: &FieldKind,
    ctx: &CodegenContext<'_>,
) -> Result<RepresentationDescriptor, CodegenError> {
    match kind {
        FieldKind::Primitive(primitive_kind) => primitive(field, *primitive_kind),
        FieldKind::EnumRef(name) => {
            let class = ctx.naming.enum_class_symbol(name);
            let default = format!("{class}.defaultValue");
            Ok(RepresentationDescriptor::value(class, default))
        }
        FieldKind::MessageRef(name) => {
            let class = ctx.naming.class_symbol(name);
            Ok(RepresentationDescriptor {
                default_expr: format!("{class}.create()"),
                native_type: class,
                has_value_semantics: false,
                constructor: None,
            })
        }
        FieldKind::UnionRef(name) => {
            let class = ctx.naming.class_symbol(name);
            let default = format!("{class}.Unset");
            Ok(RepresentationDescriptor::value(class, default))
        }
        FieldKind::Unresolved(_) | FieldKind::Empty => Err(CodegenError::unsupported(field, kind)),
    }
}

/// Atomic representation of a collection element; unions never appear in collections.
fn element(
    field: &str,
    kind: &FieldKind,
    ctx: &CodegenContext<'_>,
) -> Result<RepresentationDescriptor, CodegenError> {
    if let FieldKind::UnionRef(_) = kind {
        return Err(CodegenError::nesting(field, kind));
    }
    atomic(field, kind, ctx)
}

fn repeated(
    field: &str,
    kind: &FieldKind,
    ctx: &CodegenContext<'_>,
    imports: &mut BTreeSet<AuxImport>,
) -> Result<RepresentationDescriptor, CodegenError> {
    let element = element(field, kind, ctx)?;
    if !ctx.compact {
        return Ok(RepresentationDescriptor::collection(
            format!("MutableList<{}>", element.native_type),
            ConstructorExpr::split("mutableListOf", "ArrayList"),
        ));
    }

    let specialized = if kind.is_int() {
        Some("GdxIntArray")
    } else if kind.is_long() {
        Some("GdxLongArray")
    } else if kind.is_float() {
        Some("GdxFloatArray")
    } else {
        None
    };
    let (container, native_type) = match specialized {
        Some(container) => (container, container.to_string()),
        None => ("GdxArray", format!("GdxArray<{}>", element.native_type)),
    };
    imports.insert(AuxImport::ktx(container));
    Ok(RepresentationDescriptor::collection(
        native_type,
        ConstructorExpr::uniform(container),
    ))
}

fn map(
    field: &str,
    key: PrimitiveKind,
    value: &FieldKind,
    ctx: &CodegenContext<'_>,
    imports: &mut BTreeSet<AuxImport>,
) -> Result<RepresentationDescriptor, CodegenError> {
    let key_repr = primitive(field, key)?;
    let value_repr = element(field, value, ctx)?;
    let (k, v) = (key_repr.native_type, value_repr.native_type);
    if !ctx.compact {
        return Ok(RepresentationDescriptor::collection(
            format!("MutableMap<{k}, {v}>"),
            ConstructorExpr::split("mutableMapOf", "LinkedHashMap"),
        ));
    }

    let (container, native_type) = if key.is_int() {
        if value.is_int() {
            ("IntIntMap", "IntIntMap".to_string())
        } else if value.is_float() {
            ("IntFloatMap", "IntFloatMap".to_string())
        } else {
            ("IntMap", format!("IntMap<{v}>"))
        }
    } else if key.is_long() {
        ("LongMap", format!("LongMap<{v}>"))
    } else if value.is_int() {
        ("ObjectIntMap", format!("ObjectIntMap<{k}>"))
    } else if value.is_long() {
        ("ObjectLongMap", format!("ObjectLongMap<{k}>"))
    } else if value.is_float() {
        ("ObjectFloatMap", format!("ObjectFloatMap<{k}>"))
    } else {
        ("ObjectMap", format!("ObjectMap<{k}, {v}>"))
    };
    imports.insert(AuxImport::gdx(container));
    imports.insert(AuxImport::ktx("component1"));
    imports.insert(AuxImport::ktx("component2"));
    Ok(RepresentationDescriptor::collection(
        native_type,
        ConstructorExpr::uniform(container),
    ))
}
