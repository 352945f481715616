//! Indented tree dump of a syntax tree.
//!
//! One line per node: class name, then its attributes, then optionally
//! its coordinate. Children are indented four spaces below their parent.

use std::fmt;

use crate::ast::{Node, Program, Role};

const INDENT: usize = 4;

/// Printer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowOptions {
    /// Print attributes as `name=value` instead of bare values.
    pub attr_names: bool,
    /// Label each subtree with the role it fills in its parent.
    pub node_names: bool,
    /// Append `@ line:column` to nodes with a known coordinate.
    pub show_coord: bool,
    /// Leading spaces before the root line.
    pub offset: usize,
}

impl ShowOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn attr_names(mut self, on: bool) -> Self {
        self.attr_names = on;
        self
    }

    #[must_use]
    pub const fn node_names(mut self, on: bool) -> Self {
        self.node_names = on;
        self
    }

    #[must_use]
    pub const fn show_coord(mut self, on: bool) -> Self {
        self.show_coord = on;
        self
    }

    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Every optional decoration switched on.
    #[must_use]
    pub const fn verbose() -> Self {
        Self {
            attr_names: true,
            node_names: true,
            show_coord: true,
            offset: 0,
        }
    }
}

/// Render the subtree rooted at `node`.
#[must_use]
pub fn show<'a>(node: impl Into<Node<'a>>, options: &ShowOptions) -> String {
    let mut out = String::new();
    let _ = write_show(&mut out, node, options);
    out
}

/// Render the subtree rooted at `node` into `out`.
pub fn write_show<'a, W: fmt::Write>(
    out: &mut W,
    node: impl Into<Node<'a>>,
    options: &ShowOptions,
) -> fmt::Result {
    write_node(out, node.into(), None, options.offset, options)
}

fn write_node<W: fmt::Write>(
    out: &mut W,
    node: Node<'_>,
    role: Option<Role>,
    offset: usize,
    options: &ShowOptions,
) -> fmt::Result {
    write!(out, "{:offset$}{}", "", node.class_name())?;
    match role {
        Some(role) if options.node_names => write!(out, " <{role}>:")?,
        _ => out.write_char(':')?,
    }

    let attributes = node.attributes();
    if !attributes.is_empty() {
        let rendered: Vec<String> = attributes
            .into_iter()
            .map(|(name, value)| {
                if options.attr_names {
                    format!("{name}={value}")
                } else {
                    value
                }
            })
            .collect();
        write!(out, " {}", rendered.join(", "))?;
    }

    let coord = node.coord();
    if options.show_coord && coord.is_known() {
        write!(out, " @ {coord}")?;
    }
    out.write_char('\n')?;

    for (child_role, child) in node.children() {
        write_node(out, child, Some(child_role), offset + INDENT, options)?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_show(f, self, &ShowOptions::default())
    }
}
