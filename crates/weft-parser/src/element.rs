//! Parse tree nodes.
//!
//! Every node borrows the exact slice of input it consumed, so
//! [`Element::source_text`] reconstructs the original text without copying
//! or normalization. Nodes exclusively own their children and are immutable
//! once built.
//!
//! The set of node shapes is closed: [`Leaf`], [`Composite`], [`Block`] and
//! [`List`], unified by the [`Node`] enum. New grammars are new
//! [`ElementKind`] data, never new node types.

use std::fmt;

use crate::kind::{ElementKind, Rule};

/// The capability shared by every parse tree node.
pub trait Element<'src> {
    /// The grammar kind that produced this node.
    fn kind(&self) -> &'static ElementKind;

    /// The exact text consumed by this node.
    fn source_text(&self) -> &'src str;

    /// Child nodes in source order; empty for leaves.
    fn children(&self) -> &[Node<'src>];

    /// Number of bytes consumed.
    fn len(&self) -> usize {
        self.source_text().len()
    }

    /// Returns `true` if the node consumed nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write a tab-indented dump of this node and its descendants.
    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "\t".repeat(depth);
        let children = self.children();
        write!(f, "{indent}{}: {{", self.kind().name())?;
        if children.is_empty() {
            f.write_str(" ")?;
        } else {
            f.write_str("\n")?;
            for child in children {
                child.write_tree(f, depth + 1)?;
                f.write_str("\n")?;
            }
            f.write_str(&indent)?;
        }
        f.write_str("}")
    }
}

/// An atomic node whose text is exactly one pattern match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'src> {
    kind: &'static ElementKind,
    text: &'src str,
}

impl<'src> Leaf<'src> {
    pub(crate) fn new(kind: &'static ElementKind, text: &'src str) -> Self {
        Self { kind, text }
    }
}

impl<'src> Element<'src> for Leaf<'src> {
    fn kind(&self) -> &'static ElementKind {
        self.kind
    }

    fn source_text(&self) -> &'src str {
        self.text
    }

    fn children(&self) -> &[Node<'src>] {
        &[]
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(
            f,
            "{}{}: {{ \"{}\" }}",
            "\t".repeat(depth),
            self.kind.name(),
            self.text.escape_debug()
        )
    }
}

/// A node built from an ordered list of definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composite<'src> {
    kind: &'static ElementKind,
    text: &'src str,
    children: Vec<Node<'src>>,
}

impl<'src> Composite<'src> {
    pub(crate) fn new(kind: &'static ElementKind, text: &'src str, children: Vec<Node<'src>>) -> Self {
        Self {
            kind,
            text,
            children,
        }
    }
}

impl<'src> Element<'src> for Composite<'src> {
    fn kind(&self) -> &'static ElementKind {
        self.kind
    }

    fn source_text(&self) -> &'src str {
        self.text
    }

    fn children(&self) -> &[Node<'src>] {
        &self.children
    }
}

/// A composite enclosed in a start and an end delimiter.
///
/// `source_text() == start_delimiter() + content() + end_delimiter()`, and
/// the children cover `content()` exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'src> {
    kind: &'static ElementKind,
    text: &'src str,
    children: Vec<Node<'src>>,
}

impl<'src> Block<'src> {
    pub(crate) fn new(kind: &'static ElementKind, text: &'src str, children: Vec<Node<'src>>) -> Self {
        Self {
            kind,
            text,
            children,
        }
    }

    /// The opening delimiter literal.
    pub fn start_delimiter(&self) -> &'static str {
        match self.kind.rule() {
            Rule::Block(rule) => rule.start(),
            _ => "",
        }
    }

    /// The closing delimiter literal.
    pub fn end_delimiter(&self) -> &'static str {
        match self.kind.rule() {
            Rule::Block(rule) => rule.end(),
            _ => "",
        }
    }

    /// The interior text between the delimiters.
    pub fn content(&self) -> &'src str {
        let start = self.start_delimiter().len();
        let end = self.text.len() - self.end_delimiter().len();
        &self.text[start..end]
    }
}

impl<'src> Element<'src> for Block<'src> {
    fn kind(&self) -> &'static ElementKind {
        self.kind
    }

    fn source_text(&self) -> &'src str {
        self.text
    }

    fn children(&self) -> &[Node<'src>] {
        &self.children
    }
}

/// Items of one kind separated by a delimiter literal.
///
/// Delimiters are part of [`source_text`](Element::source_text) but are not
/// items. `delimiter_positions` holds, for every delimiter consumed, the
/// number of items that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<'src> {
    kind: &'static ElementKind,
    text: &'src str,
    items: Vec<Node<'src>>,
    delimiter_positions: Vec<usize>,
}

impl<'src> List<'src> {
    pub(crate) fn new(
        kind: &'static ElementKind,
        text: &'src str,
        items: Vec<Node<'src>>,
        delimiter_positions: Vec<usize>,
    ) -> Self {
        Self {
            kind,
            text,
            items,
            delimiter_positions,
        }
    }

    /// The list items, never including delimiters.
    pub fn items(&self) -> &[Node<'src>] {
        &self.items
    }

    /// Item counts at which each delimiter occurred, in order.
    pub fn delimiter_positions(&self) -> &[usize] {
        &self.delimiter_positions
    }

    /// The delimiter literal.
    pub fn delimiter(&self) -> &'static str {
        match self.kind.rule() {
            Rule::List(rule) => rule.delimiter(),
            _ => "",
        }
    }

    /// Returns `true` if item `index` is followed by a delimiter.
    pub fn is_terminated(&self, index: usize) -> bool {
        self.delimiter_positions.contains(&(index + 1))
    }
}

impl<'src> Element<'src> for List<'src> {
    fn kind(&self) -> &'static ElementKind {
        self.kind
    }

    fn source_text(&self) -> &'src str {
        self.text
    }

    fn children(&self) -> &[Node<'src>] {
        &self.items
    }
}

/// Any parse tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<'src> {
    Leaf(Leaf<'src>),
    Composite(Composite<'src>),
    Block(Block<'src>),
    List(List<'src>),
}

impl<'src> Node<'src> {
    fn as_element(&self) -> &dyn Element<'src> {
        match self {
            Node::Leaf(leaf) => leaf,
            Node::Composite(composite) => composite,
            Node::Block(block) => block,
            Node::List(list) => list,
        }
    }

    /// Returns `true` if this node was produced by `kind`.
    pub fn is(&self, kind: &ElementKind) -> bool {
        self.kind().is(kind)
    }

    /// The block view of this node, if it is one.
    pub fn as_block(&self) -> Option<&Block<'src>> {
        match self {
            Node::Block(block) => Some(block),
            _ => None,
        }
    }

    /// The list view of this node, if it is one.
    pub fn as_list(&self) -> Option<&List<'src>> {
        match self {
            Node::List(list) => Some(list),
            _ => None,
        }
    }

    /// Direct children of the given kind.
    pub fn children_of<'a>(&'a self, kind: &'a ElementKind) -> impl Iterator<Item = &'a Node<'src>> + 'a {
        self.children().iter().filter(move |child| child.is(kind))
    }

    /// The first direct child of the given kind.
    pub fn child(&self, kind: &ElementKind) -> Option<&Node<'src>> {
        self.children().iter().find(|child| child.is(kind))
    }

    /// All descendants in pre-order, excluding this node.
    pub fn descendants(&self) -> Descendants<'_, 'src> {
        Descendants {
            stack: self.children().iter().rev().collect(),
        }
    }

    /// All descendants of the given kind, in source order.
    pub fn find_all<'a>(&'a self, kind: &ElementKind) -> Vec<&'a Node<'src>> {
        self.descendants().filter(|node| node.is(kind)).collect()
    }

    /// The first descendant of the given kind, in source order.
    pub fn find(&self, kind: &ElementKind) -> Option<&Node<'src>> {
        self.descendants().find(|node| node.is(kind))
    }
}

impl<'src> Element<'src> for Node<'src> {
    fn kind(&self) -> &'static ElementKind {
        self.as_element().kind()
    }

    fn source_text(&self) -> &'src str {
        self.as_element().source_text()
    }

    fn children(&self) -> &[Node<'src>] {
        self.as_element().children()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        self.as_element().write_tree(f, depth)
    }
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

/// Pre-order iterator over the descendants of a node.
pub struct Descendants<'a, 'src> {
    stack: Vec<&'a Node<'src>>,
}

impl<'a, 'src> Iterator for Descendants<'a, 'src> {
    type Item = &'a Node<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
