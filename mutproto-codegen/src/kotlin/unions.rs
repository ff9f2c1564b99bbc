//! Sealed union generation for oneofs.

use super::convert;
use crate::emit::Stmt;
use crate::model::UnionModel;

/// Generator for sealed union classes.
pub struct UnionGenerator<'a> {
    model: &'a UnionModel,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a new union generator.
    #[must_use]
    pub fn new(model: &'a UnionModel) -> Self {
        Self { model }
    }

    /// Generates the sealed class with one variant per alternative.
    #[must_use]
    pub fn generate(&self) -> Stmt {
        let class = &self.model.class;
        let mut body = vec![Stmt::line(format!("object Unset : {class}()"))];
        for alternative in &self.model.alternatives {
            body.push(Stmt::Blank);
            body.push(Stmt::line(format!(
                "data class {}(val value: {}) : {class}()",
                alternative.variant, alternative.native_type
            )));
        }
        body.push(Stmt::Blank);
        body.push(self.generate_to_proto());
        body.push(Stmt::Blank);
        body.push(Stmt::block(
            "companion object {",
            vec![self.generate_from_proto()],
        ));

        Stmt::block(format!("sealed class {class} {{"), body)
    }

    fn generate_to_proto(&self) -> Stmt {
        let mut arms = vec![Stmt::line(format!(
            "Unset -> builder.clear{}()",
            self.model.accessors.capitalized
        ))];
        for alternative in &self.model.alternatives {
            let write =
                convert::write_atomic(&alternative.rule, "this.value", "builder", &alternative.accessors);
            arms.push(Stmt::line(format!("is {} -> {write}", alternative.variant)));
        }
        Stmt::block(
            format!("fun toProto(builder: {}.Builder) {{", self.model.message_wire_class),
            vec![Stmt::block("when (this) {", arms)],
        )
    }

    fn generate_from_proto(&self) -> Stmt {
        let wire = &self.model.message_wire_class;
        let case_enum = format!("{wire}.{}Case", self.model.accessors.capitalized);
        let mut arms: Vec<Stmt> = self
            .model
            .alternatives
            .iter()
            .map(|alternative| {
                let raw = format!("proto.{}", alternative.accessors.accessor);
                Stmt::line(format!(
                    "{case_enum}.{} -> {}({})",
                    alternative.case_constant,
                    alternative.variant,
                    convert::read_atomic(&alternative.rule, &raw)
                ))
            })
            .collect();
        arms.push(Stmt::line("else -> Unset"));

        Stmt::block(
            format!(
                "fun fromProto(proto: {wire}): {} = when (proto.{}Case) {{",
                self.model.class, self.model.accessors.accessor
            ),
            arms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::{AtomicRule, FieldAccessors};
    use crate::emit::emit;
    use crate::model::AlternativeModel;
    use mutproto_schema::TypeName;

    fn accessors(accessor: &str, capitalized: &str) -> FieldAccessors {
        FieldAccessors {
            accessor: accessor.to_string(),
            capitalized: capitalized.to_string(),
        }
    }

    #[test]
    fn test_generate_union() {
        let model = UnionModel {
            name: TypeName::new("Person.contact"),
            class: "PersonContact".to_string(),
            message_wire_class: "Book.Person".to_string(),
            accessors: accessors("contact", "Contact"),
            alternatives: vec![
                AlternativeModel {
                    name: "email".to_string(),
                    variant: "Email".to_string(),
                    case_constant: "EMAIL".to_string(),
                    accessors: accessors("email", "Email"),
                    native_type: "String".to_string(),
                    rule: AtomicRule::Primitive,
                },
                AlternativeModel {
                    name: "home".to_string(),
                    variant: "Home".to_string(),
                    case_constant: "HOME".to_string(),
                    accessors: accessors("home", "Home"),
                    native_type: "Address".to_string(),
                    rule: AtomicRule::Message {
                        class: "Address".to_string(),
                        wire_class: "Book.Address".to_string(),
                    },
                },
            ],
        };
        let lines = emit(&[UnionGenerator::new(&model).generate()], 0);
        let has = |line: &str| lines.iter().any(|l| l == line);
        assert_eq!(lines[0], "sealed class PersonContact {");
        assert!(has("  object Unset : PersonContact()"));
        assert!(has("  data class Email(val value: String) : PersonContact()"));
        assert!(has("      Unset -> builder.clearContact()"));
        assert!(has("      is Email -> builder.email = this.value"));
        assert!(has("      is Home -> this.value.toProto(builder.homeBuilder)"));
        assert!(has("    fun fromProto(proto: Book.Person): PersonContact = when (proto.contactCase) {"));
        assert!(has("      Book.Person.ContactCase.HOME -> Home(Address.fromProto(proto.home))"));
        assert!(has("      else -> Unset"));
    }
}
