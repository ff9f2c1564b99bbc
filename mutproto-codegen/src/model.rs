//! Per-definition descriptor bundles handed to the emitters.

use crate::conversion::{AtomicRule, FieldAccessors, FieldDescriptors, FieldSpec};
use crate::repr::AuxImport;
use mutproto_schema::TypeName;
use std::collections::BTreeSet;

/// Every field descriptor of one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageModel {
    /// Canonical name.
    pub name: TypeName,
    /// Native class.
    pub class: String,
    /// Wire class.
    pub wire_class: String,
    /// Fields and projected oneofs, in declaration order.
    pub fields: Vec<FieldModel>,
}

impl MessageModel {
    /// Returns the union of the imports required by the field representations.
    #[must_use]
    pub fn imports(&self) -> BTreeSet<AuxImport> {
        self.fields
            .iter()
            .flat_map(|field| field.descriptors.representation.imports.iter().cloned())
            .collect()
    }

    /// Looks a field up by declared name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.spec.name == name)
    }
}

/// Descriptors of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldModel {
    /// Resolved field.
    pub spec: FieldSpec,
    /// Accessor names.
    pub accessors: FieldAccessors,
    /// Representation and conversion.
    pub descriptors: FieldDescriptors,
}

/// Native enum and its wire counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumModel {
    /// Canonical name.
    pub name: TypeName,
    /// Native enum class.
    pub class: String,
    /// Wire enum class.
    pub wire_class: String,
    /// Value names in declaration order.
    pub values: Vec<String>,
    /// Designated zero value.
    pub default_value: String,
}

/// A oneof projected as a sealed union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionModel {
    /// Canonical name (`Message.oneof`).
    pub name: TypeName,
    /// Native sealed class.
    pub class: String,
    /// Wire class of the containing message.
    pub message_wire_class: String,
    /// Accessors of the oneof itself (`contactCase`, `clearContact`).
    pub accessors: FieldAccessors,
    /// Alternatives in declaration order.
    pub alternatives: Vec<AlternativeModel>,
}

/// One alternative of a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternativeModel {
    /// Declared field name.
    pub name: String,
    /// Native variant class.
    pub variant: String,
    /// Wire case constant.
    pub case_constant: String,
    /// Wire accessors.
    pub accessors: FieldAccessors,
    /// Native type of the carried value.
    pub native_type: String,
    /// Conversion rule of the carried value.
    pub rule: AtomicRule,
}
