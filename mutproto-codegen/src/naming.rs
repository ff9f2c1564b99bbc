//! Identifier derivation.
//!
//! Generated sources refer to wire accessors and native classes through a
//! [`Naming`] implementation chosen per run. Implementations must be
//! deterministic; collisions are not detected.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use mutproto_schema::TypeName;
use std::fmt::Debug;

/// Identifier naming convention.
pub trait Naming: Debug + Send + Sync {
    /// Property name of a field on both the native class and the wire message
    /// (`phone_numbers` becomes `phoneNumbers`).
    fn field_accessor(&self, name: &str) -> String;

    /// Capitalized form used in wire accessor methods (`hasX`, `clearX`, `addX`).
    fn capitalized_accessor(&self, name: &str) -> String;

    /// Native class symbol of a message or union.
    fn class_symbol(&self, name: &TypeName) -> String;

    /// Native class symbol of an enum.
    fn enum_class_symbol(&self, name: &TypeName) -> String;

    /// Constant of the wire oneof case enum selecting this alternative.
    fn case_constant(&self, name: &str) -> String;
}

/// Default naming convention, matching protobuf-java accessors.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeckNaming;

impl HeckNaming {
    fn joined_segments(name: &TypeName) -> String {
        name.segments()
            .map(ToUpperCamelCase::to_upper_camel_case)
            .collect()
    }
}

impl Naming for HeckNaming {
    fn field_accessor(&self, name: &str) -> String {
        name.to_lower_camel_case()
    }

    fn capitalized_accessor(&self, name: &str) -> String {
        name.to_upper_camel_case()
    }

    fn class_symbol(&self, name: &TypeName) -> String {
        Self::joined_segments(name)
    }

    fn enum_class_symbol(&self, name: &TypeName) -> String {
        Self::joined_segments(name)
    }

    fn case_constant(&self, name: &str) -> String {
        name.to_shouty_snake_case()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessors() {
        let naming = HeckNaming;
        assert_eq!(naming.field_accessor("phone_numbers"), "phoneNumbers");
        assert_eq!(naming.field_accessor("id"), "id");
        assert_eq!(naming.capitalized_accessor("phone_numbers"), "PhoneNumbers");
        assert_eq!(naming.case_constant("home_address"), "HOME_ADDRESS");
    }

    #[test]
    fn test_class_symbols_flatten_nesting() {
        let naming = HeckNaming;
        let nested = TypeName::new("Person").child("PhoneNumber");
        assert_eq!(naming.class_symbol(&nested), "PersonPhoneNumber");
        assert_eq!(naming.class_symbol(&TypeName::new("Person.contact")), "PersonContact");
        assert_eq!(naming.enum_class_symbol(&TypeName::new("Person.PhoneType")), "PersonPhoneType");
    }

    #[test]
    fn test_naming_is_deterministic() {
        let naming = HeckNaming;
        let name = TypeName::new("a_b.c_d");
        assert_eq!(naming.class_symbol(&name), naming.class_symbol(&name));
        assert_eq!(naming.class_symbol(&name), "ABCD");
    }
}
