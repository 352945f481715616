//! Per-node annotations kept outside the tree.
//!
//! Later passes attach facts (resolved types, scopes, ...) to nodes
//! without mutating the tree. The table borrows the tree for its whole
//! lifetime, so node identities stay valid while annotations exist.

use std::collections::{BTreeMap, HashMap};

use crate::ast::Node;

/// Error produced when writing an annotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttrError {
    /// Annotations are write-once per key.
    #[error("attribute '{key}' is already set on {class} at {line}:{column}")]
    AlreadySet {
        key: String,
        class: &'static str,
        line: usize,
        column: usize,
    },
}

/// Identity of a node: its kind plus its address in the borrowed tree.
///
/// The kind is part of the key because a node and its first field can
/// share an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    class: &'static str,
    addr: usize,
}

impl NodeKey {
    #[must_use]
    pub fn of(node: Node<'_>) -> Self {
        let addr = match node {
            Node::Program(n) => std::ptr::from_ref(n).addr(),
            Node::PrintStatement(n) => std::ptr::from_ref(n).addr(),
            Node::AssignmentStatement(n) => std::ptr::from_ref(n).addr(),
            Node::VarDefinition(n) => std::ptr::from_ref(n).addr(),
            Node::ConstDefinition(n) => std::ptr::from_ref(n).addr(),
            Node::IfStatement(n) => std::ptr::from_ref(n).addr(),
            Node::WhileStatement(n) => std::ptr::from_ref(n).addr(),
            Node::BreakStatement(n) => std::ptr::from_ref(n).addr(),
            Node::ContinueStatement(n) => std::ptr::from_ref(n).addr(),
            Node::ExpressionAsStatement(n) => std::ptr::from_ref(n).addr(),
            Node::BinaryOp(n) => std::ptr::from_ref(n).addr(),
            Node::UnaryOp(n) => std::ptr::from_ref(n).addr(),
            Node::Literal(n) => std::ptr::from_ref(n).addr(),
            Node::Location(n) => std::ptr::from_ref(n).addr(),
            Node::Type(n) => std::ptr::from_ref(n).addr(),
        };
        Self {
            class: node.class_name(),
            addr,
        }
    }
}

/// Side table mapping nodes of one tree to keyed annotations.
#[derive(Debug, Clone)]
pub struct Attributes<'ast, V> {
    entries: HashMap<NodeKey, BTreeMap<String, V>>,
    _tree: std::marker::PhantomData<Node<'ast>>,
}

impl<'ast, V> Attributes<'ast, V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            _tree: std::marker::PhantomData,
        }
    }

    /// Attach `value` under `key`. Fails if `key` was already set on
    /// this node.
    pub fn set(
        &mut self,
        node: impl Into<Node<'ast>>,
        key: &str,
        value: V,
    ) -> Result<(), AttrError> {
        let node = node.into();
        let slot = self.entries.entry(NodeKey::of(node)).or_default();
        if slot.contains_key(key) {
            let coord = node.coord();
            return Err(AttrError::AlreadySet {
                key: key.to_string(),
                class: node.class_name(),
                line: coord.line,
                column: coord.column,
            });
        }
        slot.insert(key.to_string(), value);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, node: impl Into<Node<'ast>>, key: &str) -> Option<&V> {
        self.entries
            .get(&NodeKey::of(node.into()))
            .and_then(|slot| slot.get(key))
    }

    #[must_use]
    pub fn contains(&self, node: impl Into<Node<'ast>>, key: &str) -> bool {
        self.get(node, key).is_some()
    }

    /// All annotations of a node, ordered by key.
    #[must_use]
    pub fn annotations(&self, node: impl Into<Node<'ast>>) -> Option<&BTreeMap<String, V>> {
        self.entries.get(&NodeKey::of(node.into()))
    }

    /// Number of annotated nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for Attributes<'_, V> {
    fn default() -> Self {
        Self::new()
    }
}
