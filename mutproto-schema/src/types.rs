//! Semantic type model.
//!
//! This module contains the closed type lattice every schema field is
//! normalized into, the raw field-type syntax handed over by the upstream
//! parser, and enum definitions.

use crate::messages::OptionDef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protobuf primitive (scalar) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Boolean.
    Bool,
    /// Variable-length signed 32-bit integer.
    Int32,
    /// Variable-length signed 64-bit integer.
    Int64,
    /// Zigzag-encoded signed 32-bit integer.
    Sint32,
    /// Zigzag-encoded signed 64-bit integer.
    Sint64,
    /// Variable-length unsigned 32-bit integer.
    Uint32,
    /// Variable-length unsigned 64-bit integer.
    Uint64,
    /// Fixed-width unsigned 32-bit integer.
    Fixed32,
    /// Fixed-width unsigned 64-bit integer.
    Fixed64,
    /// Fixed-width signed 32-bit integer.
    Sfixed32,
    /// Fixed-width signed 64-bit integer.
    Sfixed64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
    /// Arbitrary byte string.
    Bytes,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; 15] = [
        Self::Bool,
        Self::Int32,
        Self::Int64,
        Self::Sint32,
        Self::Sint64,
        Self::Uint32,
        Self::Uint64,
        Self::Fixed32,
        Self::Fixed64,
        Self::Sfixed32,
        Self::Sfixed64,
        Self::Float,
        Self::Double,
        Self::String,
        Self::Bytes,
    ];

    /// Returns the keyword used for this type in `.proto` files.
    #[must_use]
    pub const fn proto_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }

    /// Parses a primitive type from its `.proto` keyword.
    #[must_use]
    pub fn from_proto_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.proto_name() == name)
    }

    /// Returns true for the 32-bit integer kinds that share a native `Int`.
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int32 | Self::Sint32 | Self::Uint32)
    }

    /// Returns true for the 64-bit integer kinds that share a native `Long`.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Int64 | Self::Sint64 | Self::Uint64)
    }

    /// Returns true for single-precision floats.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float)
    }

    /// Returns true for double-precision floats.
    #[must_use]
    pub const fn is_double(&self) -> bool {
        matches!(self, Self::Double)
    }

    /// Returns true if protobuf accepts this kind as a map key.
    #[must_use]
    pub const fn is_valid_map_key(&self) -> bool {
        !matches!(self, Self::Float | Self::Double | Self::Bytes)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proto_name())
    }
}

/// Canonical, dot-separated name of a type, starting at the root scope.
///
/// `Person.PhoneNumber` names the message `PhoneNumber` nested in `Person`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Creates a type name from its canonical form.
    #[must_use]
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    /// Returns the name of a type nested in this one.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// Returns the canonical name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates the scope segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Returns the enclosing scope, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rsplit_once('.').map(|(parent, _)| Self(parent.to_string()))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of a single, unwrapped field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Scalar value.
    Primitive(PrimitiveKind),
    /// Reference to an enum type.
    EnumRef(TypeName),
    /// Reference to a message type.
    MessageRef(TypeName),
    /// A oneof projected as a tagged union.
    UnionRef(TypeName),
    /// Name that did not resolve to any known type.
    Unresolved(String),
    /// Missing type.
    Empty,
}

impl FieldKind {
    /// Returns true for the error sentinels consumers must reject.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::Unresolved(_) | Self::Empty)
    }

    /// Returns the primitive kind, if this is a primitive.
    #[must_use]
    pub const fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns true for 32-bit integer primitives.
    #[must_use]
    pub fn is_int(&self) -> bool {
        self.as_primitive().is_some_and(|p| p.is_int())
    }

    /// Returns true for 64-bit integer primitives.
    #[must_use]
    pub fn is_long(&self) -> bool {
        self.as_primitive().is_some_and(|p| p.is_long())
    }

    /// Returns true for single-precision float primitives.
    #[must_use]
    pub fn is_float(&self) -> bool {
        self.as_primitive().is_some_and(|p| p.is_float())
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::EnumRef(name) | Self::MessageRef(name) | Self::UnionRef(name) => {
                write!(f, "{name}")
            }
            Self::Unresolved(name) => write!(f, "unresolved '{name}'"),
            Self::Empty => f.write_str("<empty>"),
        }
    }
}

/// Wrapper structure of a field's value.
///
/// Optional, repeated and map shapes carry a [`FieldKind`] directly, so
/// wrappers cannot nest inside one another and map keys are always
/// primitives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// A single value with implicit presence.
    Atomic(FieldKind),
    /// A single value with explicit presence.
    Optional(FieldKind),
    /// An ordered sequence of values.
    Repeated(FieldKind),
    /// An associative container.
    Map {
        /// Key kind.
        key: PrimitiveKind,
        /// Value kind.
        value: FieldKind,
    },
    /// A streamed value; only legal on service RPCs.
    Stream(Box<ValueShape>),
}

impl ValueShape {
    /// Returns the atomic kind wrapped by this shape.
    #[must_use]
    pub fn element_kind(&self) -> &FieldKind {
        match self {
            Self::Atomic(kind) | Self::Optional(kind) | Self::Repeated(kind) => kind,
            Self::Map { value, .. } => value,
            Self::Stream(inner) => inner.element_kind(),
        }
    }

    /// Returns the wrapper tag of this shape.
    #[must_use]
    pub const fn wrapper(&self) -> ShapeKind {
        match self {
            Self::Atomic(_) => ShapeKind::Atomic,
            Self::Optional(_) => ShapeKind::Optional,
            Self::Repeated(_) => ShapeKind::Repeated,
            Self::Map { .. } => ShapeKind::Map,
            Self::Stream(_) => ShapeKind::Stream,
        }
    }

    /// Returns true for repeated and map shapes.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Repeated(_) | Self::Map { .. })
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atomic(kind) => write!(f, "{kind}"),
            Self::Optional(kind) => write!(f, "optional {kind}"),
            Self::Repeated(kind) => write!(f, "repeated {kind}"),
            Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Self::Stream(inner) => write!(f, "stream {inner}"),
        }
    }
}

/// Wrapper tag of a [`ValueShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Unwrapped value.
    Atomic,
    /// Explicit-presence value.
    Optional,
    /// Sequence.
    Repeated,
    /// Associative container.
    Map,
    /// RPC stream.
    Stream,
}

/// Field type as written in the source, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    /// `optional` modifier.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// `repeated` modifier.
    #[serde(default, skip_serializing_if = "is_false")]
    pub repeated: bool,
    /// Type expression.
    #[serde(rename = "type", default = "TypeExpr::empty")]
    pub expr: TypeExpr,
}

impl FieldType {
    /// Creates a plain (implicit presence) field type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            optional: false,
            repeated: false,
            expr: TypeExpr::Named(name.into()),
        }
    }

    /// Creates an `optional` field type.
    #[must_use]
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::named(name)
        }
    }

    /// Creates a `repeated` field type.
    #[must_use]
    pub fn repeated(name: impl Into<String>) -> Self {
        Self {
            repeated: true,
            ..Self::named(name)
        }
    }

    /// Creates a `map<key, value>` field type.
    #[must_use]
    pub fn map(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            optional: false,
            repeated: false,
            expr: TypeExpr::Map {
                key: key.into(),
                value: value.into(),
            },
        }
    }
}

/// Type expression of a [`FieldType`].
///
/// In JSON a plain string names a type; an object with `key` and `value`
/// describes a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    /// Primitive keyword or type reference.
    Named(String),
    /// `map<key, value>`.
    Map {
        /// Key type name.
        key: String,
        /// Value type name.
        value: String,
    },
}

impl TypeExpr {
    fn empty() -> Self {
        Self::Named(String::new())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Enum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Values and options, in source order.
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a value to the enum.
    pub fn add_value(&mut self, value: EnumValueDef) {
        self.members.push(EnumMember::Value(value));
    }

    /// Iterates the enum values in source order.
    pub fn values(&self) -> impl Iterator<Item = &EnumValueDef> {
        self.members.iter().filter_map(|member| match member {
            EnumMember::Value(value) => Some(value),
            EnumMember::Option(_) => None,
        })
    }

    /// Iterates the enum-level options.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.members.iter().filter_map(|member| match member {
            EnumMember::Option(option) => Some(option),
            EnumMember::Value(_) => None,
        })
    }

    /// Returns the designated zero variant: the value numbered 0, else the first.
    #[must_use]
    pub fn zero_value(&self) -> Option<&EnumValueDef> {
        self.values()
            .find(|value| value.number() == 0)
            .or_else(|| self.values().next())
    }
}

/// Member of an enum definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumMember {
    /// `option name = value;`
    Option(OptionDef),
    /// Enum value.
    Value(EnumValueDef),
}

/// Enum value definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDef {
    /// Value name.
    pub name: String,
    /// Absolute value of the number.
    pub tag: u32,
    /// Whether the number is negative.
    #[serde(default)]
    pub is_negative: bool,
    /// Value options.
    #[serde(default)]
    pub options: Vec<OptionDef>,
}

impl EnumValueDef {
    /// Creates a non-negative enum value.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: u32) -> Self {
        Self {
            name: name.into(),
            tag,
            is_negative: false,
            options: Vec::new(),
        }
    }

    /// Returns the signed value number.
    #[must_use]
    pub fn number(&self) -> i64 {
        if self.is_negative {
            -i64::from(self.tag)
        } else {
            i64::from(self.tag)
        }
    }
}
