//! Typed uCyan syntax tree.
//!
//! Owned node structs hold their children directly, so dropping a parent
//! drops its subtree. [`Node`] is a borrowed view over every node kind;
//! it carries the uniform `children()` contract that the visitor and
//! the printer walk.

use std::fmt;

use crate::token::Coord;

/// Root of a parsed compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub coord: Coord,
}

/// Any statement form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Print(PrintStatement),
    Assignment(AssignmentStatement),
    VarDefinition(VarDefinition),
    ConstDefinition(ConstDefinition),
    If(IfStatement),
    While(WhileStatement),
    Break(BreakStatement),
    Continue(ContinueStatement),
    Expression(ExpressionAsStatement),
}

/// Any expression form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Binary(BinaryOp),
    Unary(UnaryOp),
    Literal(Literal),
    Location(Location),
}

/// `print expr;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintStatement {
    pub expression: Expression,
    pub coord: Coord,
}

/// `location = expr;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentStatement {
    pub location: Location,
    pub expression: Expression,
    pub coord: Coord,
}

/// `var [type] name [= expr];`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDefinition {
    pub name: String,
    pub dtype: Option<Type>,
    pub expression: Option<Expression>,
    pub coord: Coord,
}

/// `let [type] name = expr;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstDefinition {
    pub name: String,
    pub dtype: Option<Type>,
    pub expression: Option<Expression>,
    pub coord: Coord,
}

/// `if cond { ... } [else { ... }]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_body: Vec<Statement>,
    /// `None` when no `else` branch was written.
    pub else_body: Option<Vec<Statement>>,
    pub coord: Coord,
}

/// `while cond { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub coord: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakStatement {
    pub coord: Coord,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinueStatement {
    pub coord: Coord,
}

/// An expression followed by `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionAsStatement {
    pub expression: Expression,
    pub coord: Coord,
}

/// Binary operation; `op` is the operator lexeme (`"+"`, `"<="`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOp {
    pub op: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub coord: Coord,
}

/// Prefix operation; `op` is `"!"`, `"-"` or `"+"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOp {
    pub op: String,
    pub expression: Box<Expression>,
    pub coord: Coord,
}

/// Semantic tag of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Float,
    Char,
    Bool,
}

impl LiteralKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Char => "char",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constant kept as its raw lexeme; conversion happens in later passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    pub value: String,
    pub coord: Coord,
}

/// Reference to a named variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub name: String,
    pub coord: Coord,
}

/// Declared type: a bare identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub name: String,
    pub coord: Coord,
}

impl Statement {
    #[must_use]
    pub const fn coord(&self) -> Coord {
        match self {
            Self::Print(s) => s.coord,
            Self::Assignment(s) => s.coord,
            Self::VarDefinition(s) => s.coord,
            Self::ConstDefinition(s) => s.coord,
            Self::If(s) => s.coord,
            Self::While(s) => s.coord,
            Self::Break(s) => s.coord,
            Self::Continue(s) => s.coord,
            Self::Expression(s) => s.coord,
        }
    }
}

impl Expression {
    #[must_use]
    pub const fn coord(&self) -> Coord {
        match self {
            Self::Binary(e) => e.coord,
            Self::Unary(e) => e.coord,
            Self::Literal(e) => e.coord,
            Self::Location(e) => e.coord,
        }
    }
}

/// Label of a child within its parent, e.g. `left` or `statements[2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Role {
    pub name: &'static str,
    pub index: Option<usize>,
}

impl Role {
    #[must_use]
    pub const fn field(name: &'static str) -> Self {
        Self { name, index: None }
    }

    #[must_use]
    pub const fn item(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index: Some(index),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}[{i}]", self.name),
            None => f.write_str(self.name),
        }
    }
}

/// Borrowed view of any node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node<'a> {
    Program(&'a Program),
    PrintStatement(&'a PrintStatement),
    AssignmentStatement(&'a AssignmentStatement),
    VarDefinition(&'a VarDefinition),
    ConstDefinition(&'a ConstDefinition),
    IfStatement(&'a IfStatement),
    WhileStatement(&'a WhileStatement),
    BreakStatement(&'a BreakStatement),
    ContinueStatement(&'a ContinueStatement),
    ExpressionAsStatement(&'a ExpressionAsStatement),
    BinaryOp(&'a BinaryOp),
    UnaryOp(&'a UnaryOp),
    Literal(&'a Literal),
    Location(&'a Location),
    Type(&'a Type),
}

impl<'a> Node<'a> {
    /// Node kind name as shown by the printer.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Program(_) => "Program",
            Self::PrintStatement(_) => "PrintStatement",
            Self::AssignmentStatement(_) => "AssignmentStatement",
            Self::VarDefinition(_) => "VarDefinition",
            Self::ConstDefinition(_) => "ConstDefinition",
            Self::IfStatement(_) => "IfStatement",
            Self::WhileStatement(_) => "WhileStatement",
            Self::BreakStatement(_) => "BreakStatement",
            Self::ContinueStatement(_) => "ContinueStatement",
            Self::ExpressionAsStatement(_) => "ExpressionAsStatement",
            Self::BinaryOp(_) => "BinaryOp",
            Self::UnaryOp(_) => "UnaryOp",
            Self::Literal(_) => "Literal",
            Self::Location(_) => "Location",
            Self::Type(_) => "Type",
        }
    }

    #[must_use]
    pub const fn coord(self) -> Coord {
        match self {
            Self::Program(n) => n.coord,
            Self::PrintStatement(n) => n.coord,
            Self::AssignmentStatement(n) => n.coord,
            Self::VarDefinition(n) => n.coord,
            Self::ConstDefinition(n) => n.coord,
            Self::IfStatement(n) => n.coord,
            Self::WhileStatement(n) => n.coord,
            Self::BreakStatement(n) => n.coord,
            Self::ContinueStatement(n) => n.coord,
            Self::ExpressionAsStatement(n) => n.coord,
            Self::BinaryOp(n) => n.coord,
            Self::UnaryOp(n) => n.coord,
            Self::Literal(n) => n.coord,
            Self::Location(n) => n.coord,
            Self::Type(n) => n.coord,
        }
    }

    /// The node's own attributes as `(name, value)` pairs, in
    /// declaration order.
    #[must_use]
    pub fn attributes(self) -> Vec<(&'static str, String)> {
        match self {
            Self::VarDefinition(n) => vec![("name", n.name.clone())],
            Self::ConstDefinition(n) => vec![("name", n.name.clone())],
            Self::BinaryOp(n) => vec![("op", n.op.clone())],
            Self::UnaryOp(n) => vec![("op", n.op.clone())],
            Self::Literal(n) => vec![
                ("type", n.kind.as_str().to_string()),
                ("value", n.value.clone()),
            ],
            Self::Location(n) => vec![("name", n.name.clone())],
            Self::Type(n) => vec![("name", n.name.clone())],
            Self::Program(_)
            | Self::PrintStatement(_)
            | Self::AssignmentStatement(_)
            | Self::IfStatement(_)
            | Self::WhileStatement(_)
            | Self::BreakStatement(_)
            | Self::ContinueStatement(_)
            | Self::ExpressionAsStatement(_) => Vec::new(),
        }
    }

    /// Direct children in source order, each labelled with its role.
    #[must_use]
    pub fn children(self) -> Vec<(Role, Node<'a>)> {
        let mut nodes = Vec::new();
        match self {
            Self::Program(n) => push_block(&mut nodes, "statements", &n.statements),
            Self::PrintStatement(n) => {
                nodes.push((Role::field("expression"), (&n.expression).into()));
            }
            Self::AssignmentStatement(n) => {
                nodes.push((Role::field("location"), Node::Location(&n.location)));
                nodes.push((Role::field("expression"), (&n.expression).into()));
            }
            Self::VarDefinition(VarDefinition {
                dtype, expression, ..
            })
            | Self::ConstDefinition(ConstDefinition {
                dtype, expression, ..
            }) => {
                if let Some(dtype) = dtype {
                    nodes.push((Role::field("dtype"), Node::Type(dtype)));
                }
                if let Some(expression) = expression {
                    nodes.push((Role::field("expression"), expression.into()));
                }
            }
            Self::IfStatement(n) => {
                nodes.push((Role::field("condition"), (&n.condition).into()));
                push_block(&mut nodes, "then", &n.then_body);
                if let Some(else_body) = &n.else_body {
                    push_block(&mut nodes, "else", else_body);
                }
            }
            Self::WhileStatement(n) => {
                nodes.push((Role::field("condition"), (&n.condition).into()));
                push_block(&mut nodes, "body", &n.body);
            }
            Self::ExpressionAsStatement(n) => {
                nodes.push((Role::field("expression"), (&n.expression).into()));
            }
            Self::BinaryOp(n) => {
                nodes.push((Role::field("left"), n.left.as_ref().into()));
                nodes.push((Role::field("right"), n.right.as_ref().into()));
            }
            Self::UnaryOp(n) => {
                nodes.push((Role::field("expression"), n.expression.as_ref().into()));
            }
            Self::BreakStatement(_)
            | Self::ContinueStatement(_)
            | Self::Literal(_)
            | Self::Location(_)
            | Self::Type(_) => {}
        }
        nodes
    }

    /// Number of nodes in the subtree rooted here, this node included.
    #[must_use]
    pub fn subtree_size(self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(|(_, child)| child.subtree_size())
            .sum::<usize>()
    }
}

fn push_block<'a>(nodes: &mut Vec<(Role, Node<'a>)>, role: &'static str, block: &'a [Statement]) {
    for (i, statement) in block.iter().enumerate() {
        nodes.push((Role::item(role, i), statement.into()));
    }
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Self::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        match statement {
            Statement::Print(s) => Self::PrintStatement(s),
            Statement::Assignment(s) => Self::AssignmentStatement(s),
            Statement::VarDefinition(s) => Self::VarDefinition(s),
            Statement::ConstDefinition(s) => Self::ConstDefinition(s),
            Statement::If(s) => Self::IfStatement(s),
            Statement::While(s) => Self::WhileStatement(s),
            Statement::Break(s) => Self::BreakStatement(s),
            Statement::Continue(s) => Self::ContinueStatement(s),
            Statement::Expression(s) => Self::ExpressionAsStatement(s),
        }
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        match expression {
            Expression::Binary(e) => Self::BinaryOp(e),
            Expression::Unary(e) => Self::UnaryOp(e),
            Expression::Literal(e) => Self::Literal(e),
            Expression::Location(e) => Self::Location(e),
        }
    }
}
