//! Renders a syntax tree back into canonical uCyan source text.
//!
//! Produces tab-indented blocks, one statement per line, and only the
//! parentheses needed to reproduce the tree's grouping.

use std::fmt::{self, Write as _};

use crate::ast::{Expression, Program, Statement, Type};
use crate::parser::{Assoc, UNARY_LEVEL, infix_precedence};
use crate::token::TokenKind;

/// Format a `Program` as uCyan source.
///
/// Parsing the output yields a tree with the same shape, operators and
/// literal values as the input.
#[must_use]
pub fn format(program: &Program) -> String {
    let mut out = String::new();
    format_statements(&mut out, &program.statements, 0);

    // Trailing newline
    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

fn format_statements(out: &mut String, statements: &[Statement], indent: usize) {
    for statement in statements {
        format_statement(out, statement, indent);
    }
}

fn format_block(out: &mut String, body: &[Statement], indent: usize) {
    out.push_str(" {\n");
    format_statements(out, body, indent + 1);
    out.push_str(&"\t".repeat(indent));
    out.push('}');
}

fn format_declaration(
    out: &mut String,
    keyword: &str,
    name: &str,
    dtype: Option<&Type>,
    expression: Option<&Expression>,
) {
    out.push_str(keyword);
    if let Some(dtype) = dtype {
        out.push(' ');
        out.push_str(&dtype.name);
    }
    out.push(' ');
    out.push_str(name);
    if let Some(expression) = expression {
        let _ = write!(out, " = {expression}");
    }
    out.push(';');
}

fn format_statement(out: &mut String, statement: &Statement, indent: usize) {
    out.push_str(&"\t".repeat(indent));

    match statement {
        Statement::Print(s) => {
            let _ = write!(out, "print {};", s.expression);
        }
        Statement::Assignment(s) => {
            let _ = write!(out, "{} = {};", s.location.name, s.expression);
        }
        Statement::VarDefinition(s) => format_declaration(
            out,
            "var",
            &s.name,
            s.dtype.as_ref(),
            s.expression.as_ref(),
        ),
        Statement::ConstDefinition(s) => format_declaration(
            out,
            "let",
            &s.name,
            s.dtype.as_ref(),
            s.expression.as_ref(),
        ),
        Statement::If(s) => {
            let _ = write!(out, "if {}", s.condition);
            format_block(out, &s.then_body, indent);
            if let Some(else_body) = &s.else_body {
                out.push_str(" else");
                format_block(out, else_body, indent);
            }
        }
        Statement::While(s) => {
            let _ = write!(out, "while {}", s.condition);
            format_block(out, &s.body, indent);
        }
        Statement::Break(_) => out.push_str("break;"),
        Statement::Continue(_) => out.push_str("continue;"),
        Statement::Expression(s) => {
            let _ = write!(out, "{};", s.expression);
        }
    }

    out.push('\n');
}

/// Binding level of a binary operator lexeme. Unknown operators get
/// the loosest level so their operands are always grouped.
fn binary_level(op: &str) -> (usize, Assoc) {
    TokenKind::operator(op)
        .and_then(infix_precedence)
        .unwrap_or((0, Assoc::Left))
}

fn level_of(expression: &Expression) -> usize {
    match expression {
        Expression::Binary(b) => binary_level(&b.op).0,
        Expression::Unary(_) => UNARY_LEVEL,
        Expression::Literal(_) | Expression::Location(_) => usize::MAX,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expression, grouped: bool) -> fmt::Result {
    if grouped {
        write!(f, "({operand})")
    } else {
        write!(f, "{operand}")
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(&literal.value),
            Self::Location(location) => f.write_str(&location.name),
            Self::Unary(unary) => {
                f.write_str(&unary.op)?;
                let grouped = level_of(&unary.expression) < UNARY_LEVEL;
                write_operand(f, &unary.expression, grouped)
            }
            Self::Binary(binary) => {
                let (level, assoc) = binary_level(&binary.op);
                let left = level_of(&binary.left);
                let right = level_of(&binary.right);
                let (group_left, group_right) = match assoc {
                    Assoc::Left => (left < level, right <= level),
                    Assoc::Right => (left <= level, right < level),
                };
                write_operand(f, &binary.left, group_left)?;
                write!(f, " {} ", binary.op)?;
                write_operand(f, &binary.right, group_right)
            }
        }
    }
}
