//! Pre-order tree traversal with per-kind hooks.
//!
//! Implement [`Visitor`] and override only the hooks you care about.
//! Every hook defaults to [`Visitor::generic_visit`], which walks the
//! node's `children()` in order, so an override that wants to keep
//! descending calls `generic_visit` itself.

use crate::ast::{
    AssignmentStatement, BinaryOp, BreakStatement, ConstDefinition, ContinueStatement,
    ExpressionAsStatement, IfStatement, Literal, Location, Node, PrintStatement, Program, Type,
    UnaryOp, VarDefinition, WhileStatement,
};

pub trait Visitor<'ast> {
    /// Dispatch `node` to the hook for its kind.
    fn visit(&mut self, node: Node<'ast>) {
        match node {
            Node::Program(n) => self.visit_program(n),
            Node::PrintStatement(n) => self.visit_print_statement(n),
            Node::AssignmentStatement(n) => self.visit_assignment_statement(n),
            Node::VarDefinition(n) => self.visit_var_definition(n),
            Node::ConstDefinition(n) => self.visit_const_definition(n),
            Node::IfStatement(n) => self.visit_if_statement(n),
            Node::WhileStatement(n) => self.visit_while_statement(n),
            Node::BreakStatement(n) => self.visit_break_statement(n),
            Node::ContinueStatement(n) => self.visit_continue_statement(n),
            Node::ExpressionAsStatement(n) => self.visit_expression_as_statement(n),
            Node::BinaryOp(n) => self.visit_binary_op(n),
            Node::UnaryOp(n) => self.visit_unary_op(n),
            Node::Literal(n) => self.visit_literal(n),
            Node::Location(n) => self.visit_location(n),
            Node::Type(n) => self.visit_type(n),
        }
    }

    /// Visit every child of `node` in order.
    fn generic_visit(&mut self, node: Node<'ast>) {
        for (_, child) in node.children() {
            self.visit(child);
        }
    }

    fn visit_program(&mut self, node: &'ast Program) {
        self.generic_visit(Node::Program(node));
    }
    fn visit_print_statement(&mut self, node: &'ast PrintStatement) {
        self.generic_visit(Node::PrintStatement(node));
    }
    fn visit_assignment_statement(&mut self, node: &'ast AssignmentStatement) {
        self.generic_visit(Node::AssignmentStatement(node));
    }
    fn visit_var_definition(&mut self, node: &'ast VarDefinition) {
        self.generic_visit(Node::VarDefinition(node));
    }
    fn visit_const_definition(&mut self, node: &'ast ConstDefinition) {
        self.generic_visit(Node::ConstDefinition(node));
    }
    fn visit_if_statement(&mut self, node: &'ast IfStatement) {
        self.generic_visit(Node::IfStatement(node));
    }
    fn visit_while_statement(&mut self, node: &'ast WhileStatement) {
        self.generic_visit(Node::WhileStatement(node));
    }
    fn visit_break_statement(&mut self, node: &'ast BreakStatement) {
        self.generic_visit(Node::BreakStatement(node));
    }
    fn visit_continue_statement(&mut self, node: &'ast ContinueStatement) {
        self.generic_visit(Node::ContinueStatement(node));
    }
    fn visit_expression_as_statement(&mut self, node: &'ast ExpressionAsStatement) {
        self.generic_visit(Node::ExpressionAsStatement(node));
    }
    fn visit_binary_op(&mut self, node: &'ast BinaryOp) {
        self.generic_visit(Node::BinaryOp(node));
    }
    fn visit_unary_op(&mut self, node: &'ast UnaryOp) {
        self.generic_visit(Node::UnaryOp(node));
    }
    fn visit_literal(&mut self, node: &'ast Literal) {
        self.generic_visit(Node::Literal(node));
    }
    fn visit_location(&mut self, node: &'ast Location) {
        self.generic_visit(Node::Location(node));
    }
    fn visit_type(&mut self, node: &'ast Type) {
        self.generic_visit(Node::Type(node));
    }
}

/// Collect every node of the tree in pre-order.
#[must_use]
pub fn preorder<'ast>(root: impl Into<Node<'ast>>) -> Vec<Node<'ast>> {
    struct Collect<'ast>(Vec<Node<'ast>>);

    impl<'ast> Visitor<'ast> for Collect<'ast> {
        fn visit(&mut self, node: Node<'ast>) {
            self.0.push(node);
            self.generic_visit(node);
        }
    }

    let mut collect = Collect(Vec::new());
    collect.visit(root.into());
    collect.0
}
