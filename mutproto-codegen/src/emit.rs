//! Statement trees and scoped-indentation line emission.

/// Indentation unit of generated sources.
pub const INDENT: &str = "  ";

/// Node of a statement tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// A single line.
    Line(String),
    /// An empty line.
    Blank,
    /// Opening line, indented body, closing line.
    Block {
        /// Opening line.
        open: String,
        /// Body, one level deeper.
        body: Vec<Stmt>,
        /// Closing line.
        close: String,
    },
    /// Statements one level deeper, without delimiting lines.
    Indent(Vec<Stmt>),
}

impl Stmt {
    /// Creates a line.
    pub fn line(text: impl Into<String>) -> Self {
        Self::Line(text.into())
    }

    /// Creates a block closed by `}`.
    pub fn block(open: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self::Block {
            open: open.into(),
            body,
            close: "}".to_string(),
        }
    }

    /// Creates a block with a custom closing line.
    pub fn block_with(open: impl Into<String>, body: Vec<Stmt>, close: impl Into<String>) -> Self {
        Self::Block {
            open: open.into(),
            body,
            close: close.into(),
        }
    }
}

/// Flattens a statement tree into lines, starting at `base_indent` levels.
#[must_use]
pub fn emit(stmts: &[Stmt], base_indent: usize) -> Vec<String> {
    let mut lines = Vec::new();
    emit_into(stmts, base_indent, &mut lines);
    lines
}

fn emit_into(stmts: &[Stmt], level: usize, lines: &mut Vec<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Line(text) => lines.push(format!("{}{}", INDENT.repeat(level), text)),
            Stmt::Blank => lines.push(String::new()),
            Stmt::Block { open, body, close } => {
                lines.push(format!("{}{}", INDENT.repeat(level), open));
                emit_into(body, level + 1, lines);
                lines.push(format!("{}{}", INDENT.repeat(level), close));
            }
            Stmt::Indent(body) => emit_into(body, level + 1, lines),
        }
    }
}

/// Renders a statement tree as newline-terminated text.
#[must_use]
pub fn render(stmts: &[Stmt]) -> String {
    let mut output = String::new();
    for line in emit(stmts, 0) {
        output.push_str(&line);
        output.push('\n');
    }
    output
}
