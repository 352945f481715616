//! Fluent constructors for building syntax trees in code.
//!
//! Every node made here carries `Coord::UNKNOWN`.

use crate::ast::{
    AssignmentStatement, BinaryOp, BreakStatement, ConstDefinition, ContinueStatement, Expression,
    ExpressionAsStatement, IfStatement, Literal, LiteralKind, Location, PrintStatement, Program,
    Statement, Type, UnaryOp, VarDefinition, WhileStatement,
};
use crate::token::Coord;

impl Program {
    /// Create a new empty program.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: Vec::new(),
            coord: Coord::UNKNOWN,
        }
    }

    /// Append a statement.
    #[must_use]
    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Type {
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            coord: Coord::UNKNOWN,
        }
    }
}

impl Statement {
    /// `print expression;`
    #[must_use]
    pub const fn print(expression: Expression) -> Self {
        Self::Print(PrintStatement {
            expression,
            coord: Coord::UNKNOWN,
        })
    }

    /// `name = expression;`
    #[must_use]
    pub fn assign(name: &str, expression: Expression) -> Self {
        Self::Assignment(AssignmentStatement {
            location: Location {
                name: name.to_string(),
                coord: Coord::UNKNOWN,
            },
            expression,
            coord: Coord::UNKNOWN,
        })
    }

    /// `var [dtype] name [= init];`
    #[must_use]
    pub fn var(name: &str, dtype: Option<&str>, init: Option<Expression>) -> Self {
        Self::VarDefinition(VarDefinition {
            name: name.to_string(),
            dtype: dtype.map(Type::named),
            expression: init,
            coord: Coord::UNKNOWN,
        })
    }

    /// `let [dtype] name = init;`
    #[must_use]
    pub fn constant(name: &str, dtype: Option<&str>, init: Expression) -> Self {
        Self::ConstDefinition(ConstDefinition {
            name: name.to_string(),
            dtype: dtype.map(Type::named),
            expression: Some(init),
            coord: Coord::UNKNOWN,
        })
    }

    /// `if condition { then }` with no else branch.
    #[must_use]
    pub const fn if_then(condition: Expression, then_body: Vec<Self>) -> Self {
        Self::If(IfStatement {
            condition,
            then_body,
            else_body: None,
            coord: Coord::UNKNOWN,
        })
    }

    /// `if condition { then } else { otherwise }`
    #[must_use]
    pub const fn if_else(condition: Expression, then_body: Vec<Self>, otherwise: Vec<Self>) -> Self {
        Self::If(IfStatement {
            condition,
            then_body,
            else_body: Some(otherwise),
            coord: Coord::UNKNOWN,
        })
    }

    #[must_use]
    pub const fn while_loop(condition: Expression, body: Vec<Self>) -> Self {
        Self::While(WhileStatement {
            condition,
            body,
            coord: Coord::UNKNOWN,
        })
    }

    #[must_use]
    pub const fn break_loop() -> Self {
        Self::Break(BreakStatement {
            coord: Coord::UNKNOWN,
        })
    }

    #[must_use]
    pub const fn continue_loop() -> Self {
        Self::Continue(ContinueStatement {
            coord: Coord::UNKNOWN,
        })
    }

    /// An expression evaluated for its effect: `expression;`
    #[must_use]
    pub const fn expression(expression: Expression) -> Self {
        Self::Expression(ExpressionAsStatement {
            expression,
            coord: Coord::UNKNOWN,
        })
    }
}

impl Expression {
    fn literal(kind: LiteralKind, value: &str) -> Self {
        Self::Literal(Literal {
            kind,
            value: value.to_string(),
            coord: Coord::UNKNOWN,
        })
    }

    /// Integer literal with its source spelling, e.g. `"42"`.
    #[must_use]
    pub fn int(value: &str) -> Self {
        Self::literal(LiteralKind::Int, value)
    }

    #[must_use]
    pub fn float(value: &str) -> Self {
        Self::literal(LiteralKind::Float, value)
    }

    /// Character literal, quotes included: `"'a'"`.
    #[must_use]
    pub fn char(value: &str) -> Self {
        Self::literal(LiteralKind::Char, value)
    }

    #[must_use]
    pub fn bool(value: bool) -> Self {
        Self::literal(LiteralKind::Bool, if value { "true" } else { "false" })
    }

    /// Reference to a named storage location.
    #[must_use]
    pub fn location(name: &str) -> Self {
        Self::Location(Location {
            name: name.to_string(),
            coord: Coord::UNKNOWN,
        })
    }

    #[must_use]
    pub fn binary(op: &str, left: Self, right: Self) -> Self {
        Self::Binary(BinaryOp {
            op: op.to_string(),
            left: Box::new(left),
            right: Box::new(right),
            coord: Coord::UNKNOWN,
        })
    }

    #[must_use]
    pub fn unary(op: &str, operand: Self) -> Self {
        Self::Unary(UnaryOp {
            op: op.to_string(),
            expression: Box::new(operand),
            coord: Coord::UNKNOWN,
        })
    }
}
