//! Message definitions.
//!
//! This module contains the data structures representing message definitions
//! including fields, oneofs, options, and reserved ranges.

use crate::types::{EnumDef, FieldType};
use serde::{Deserialize, Serialize};

/// Message definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Message name (unqualified).
    pub name: String,
    /// Members in source order.
    #[serde(default)]
    pub members: Vec<MessageMember>,
}

impl MessageDef {
    /// Creates a new empty message definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a field to the message.
    pub fn add_field(&mut self, field: FieldDef) {
        self.members.push(MessageMember::Field(field));
    }

    /// Adds a oneof to the message.
    pub fn add_one_of(&mut self, one_of: OneOfDef) {
        self.members.push(MessageMember::OneOf(one_of));
    }

    /// Adds a nested message.
    pub fn add_nested_message(&mut self, message: MessageDef) {
        self.members.push(MessageMember::NestedMessage(message));
    }

    /// Adds a nested enum.
    pub fn add_nested_enum(&mut self, enum_def: EnumDef) {
        self.members.push(MessageMember::NestedEnum(enum_def));
    }

    /// Iterates the plain fields (oneof members excluded).
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.members.iter().filter_map(|member| match member {
            MessageMember::Field(field) => Some(field),
            _ => None,
        })
    }

    /// Iterates the oneofs.
    pub fn one_ofs(&self) -> impl Iterator<Item = &OneOfDef> {
        self.members.iter().filter_map(|member| match member {
            MessageMember::OneOf(one_of) => Some(one_of),
            _ => None,
        })
    }

    /// Iterates the nested messages.
    pub fn nested_messages(&self) -> impl Iterator<Item = &MessageDef> {
        self.members.iter().filter_map(|member| match member {
            MessageMember::NestedMessage(message) => Some(message),
            _ => None,
        })
    }

    /// Iterates the nested enums.
    pub fn nested_enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.members.iter().filter_map(|member| match member {
            MessageMember::NestedEnum(enum_def) => Some(enum_def),
            _ => None,
        })
    }

    /// Iterates every reserved item of the message.
    pub fn reserved(&self) -> impl Iterator<Item = &ReservedItem> {
        self.members
            .iter()
            .filter_map(|member| match member {
                MessageMember::Reserved(items) => Some(items.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Returns true if the message declares no fields and no oneofs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().next().is_none() && self.one_ofs().next().is_none()
    }
}

/// Member of a message definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageMember {
    /// Field.
    Field(FieldDef),
    /// Oneof group.
    OneOf(OneOfDef),
    /// Nested enum.
    NestedEnum(EnumDef),
    /// Nested message.
    NestedMessage(MessageDef),
    /// `option name = value;`
    Option(OptionDef),
    /// `reserved ...;`
    Reserved(Vec<ReservedItem>),
}

/// Field definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field type as written.
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Field name.
    pub name: String,
    /// Field number; caller supplied, never assigned here.
    pub tag: u32,
    /// Field options.
    #[serde(default)]
    pub options: Vec<OptionDef>,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, tag: u32) -> Self {
        Self {
            field_type,
            name: name.into(),
            tag,
            options: Vec::new(),
        }
    }

    /// Adds an option to the field.
    #[must_use]
    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }
}

/// Oneof definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneOfDef {
    /// Oneof name.
    pub name: String,
    /// Members in source order.
    #[serde(default)]
    pub members: Vec<OneOfMember>,
}

impl OneOfDef {
    /// Creates a new empty oneof.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds an alternative to the oneof.
    pub fn add_field(&mut self, field: FieldDef) {
        self.members.push(OneOfMember::Field(field));
    }

    /// Iterates the alternatives.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.members.iter().filter_map(|member| match member {
            OneOfMember::Field(field) => Some(field),
            OneOfMember::Option(_) => None,
        })
    }

    /// Iterates the oneof-level options.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.members.iter().filter_map(|member| match member {
            OneOfMember::Option(option) => Some(option),
            OneOfMember::Field(_) => None,
        })
    }
}

/// Member of a oneof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OneOfMember {
    /// Alternative.
    Field(FieldDef),
    /// `option name = value;`
    Option(OptionDef),
}

/// Option assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDef {
    /// Option name, including parentheses for extensions.
    pub name: String,
    /// Value literal exactly as written (`true`, `"text"`, `3`).
    pub value: String,
}

impl OptionDef {
    /// Creates a new option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Item of a `reserved` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservedItem {
    /// Single field number.
    Tag(u32),
    /// Inclusive range of field numbers.
    Range {
        /// First reserved number.
        start: u32,
        /// Last reserved number.
        end: u32,
    },
    /// Field name.
    Name(String),
}

impl ReservedItem {
    /// Returns true if the item reserves the given field number.
    #[must_use]
    pub fn contains_tag(&self, tag: u32) -> bool {
        match self {
            Self::Tag(reserved) => *reserved == tag,
            Self::Range { start, end } => (*start..=*end).contains(&tag),
            Self::Name(_) => false,
        }
    }
}
