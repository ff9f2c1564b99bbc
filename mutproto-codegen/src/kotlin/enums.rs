//! Enum class generation.

use crate::emit::Stmt;
use crate::model::EnumModel;

/// Generator for native enum classes.
pub struct EnumGenerator<'a> {
    model: &'a EnumModel,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(model: &'a EnumModel) -> Self {
        Self { model }
    }

    /// Generates the enum class.
    #[must_use]
    pub fn generate(&self) -> Stmt {
        let class = &self.model.class;
        let wire = &self.model.wire_class;

        let last = self.model.values.len().saturating_sub(1);
        let mut body: Vec<Stmt> = self
            .model
            .values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let terminator = if i == last { ";" } else { "," };
                Stmt::line(format!("{value}({wire}.{value}){terminator}"))
            })
            .collect();

        let mut cases: Vec<Stmt> = self
            .model
            .values
            .iter()
            .map(|value| Stmt::line(format!("{wire}.{value} -> {value}")))
            .collect();
        cases.push(Stmt::line("else -> defaultValue"));

        body.push(Stmt::Blank);
        body.push(Stmt::line(format!("fun toProto(): {wire} = proto")));
        body.push(Stmt::Blank);
        body.push(Stmt::block(
            "companion object {",
            vec![
                Stmt::line(format!("val defaultValue = {}", self.model.default_value)),
                Stmt::Blank,
                Stmt::block(
                    format!("fun fromProto(proto: {wire}): {class} = when (proto) {{"),
                    cases,
                ),
            ],
        ));

        Stmt::block(format!("enum class {class}(val proto: {wire}) {{"), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit;
    use mutproto_schema::TypeName;

    #[test]
    fn test_generate_enum() {
        let model = EnumModel {
            name: TypeName::new("Color"),
            class: "Color".to_string(),
            wire_class: "Paint.Color".to_string(),
            values: vec!["RED".to_string(), "GREEN".to_string()],
            default_value: "RED".to_string(),
        };
        let lines = emit(&[EnumGenerator::new(&model).generate()], 0);
        assert_eq!(lines[0], "enum class Color(val proto: Paint.Color) {");
        assert_eq!(lines[1], "  RED(Paint.Color.RED),");
        assert_eq!(lines[2], "  GREEN(Paint.Color.GREEN);");
        assert!(lines.contains(&"  fun toProto(): Paint.Color = proto".to_string()));
        assert!(lines.contains(&"    val defaultValue = RED".to_string()));
        assert!(lines.contains(&"      Paint.Color.GREEN -> GREEN".to_string()));
        assert!(lines.contains(&"      else -> defaultValue".to_string()));
    }
}
