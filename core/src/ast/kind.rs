//! file: core/src/ast/kind.rs
//! description: input template node kinds.
//!
//! Defines `NodeKind` and `Attribute`, the closed vocabulary the external
//! parser hands to the compiler. Nested content is always an ordered
//! `Vec<Node>`; an empty vector is a meaningful state (for instance an
//! output expression without a block).
//!
use super::node::Node;

/// A single tag attribute as produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    /// When set, `value` is host code whose result becomes the attribute
    /// value. Otherwise `value` is literal text that may still contain
    /// `#{...}` interpolation.
    pub dynamic: bool,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, dynamic: bool, value: impl Into<String>) -> Self {
        Attribute { key: key.into(), dynamic, value: value.into() }
    }

    pub fn literal(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, false, value)
    }

    pub fn code(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, true, value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Text { value: String },
    Control { code: String, content: Vec<Node> },
    Output { escape: bool, code: String, content: Vec<Node> },
    Directive { kind: String },
    Tag { name: String, attributes: Vec<Attribute>, content: Vec<Node> },
    Embedded { engine: String, body: Vec<Node> },
    Newline,
}

impl NodeKind {
    /// Short name used in log output and error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            NodeKind::Text { .. } => "text",
            NodeKind::Control { .. } => "control",
            NodeKind::Output { .. } => "output",
            NodeKind::Directive { .. } => "directive",
            NodeKind::Tag { .. } => "tag",
            NodeKind::Embedded { .. } => "embedded",
            NodeKind::Newline => "newline",
        }
    }

    /// Nested content of the node, if its kind has any.
    pub fn content(&self) -> Option<&[Node]> {
        match self {
            NodeKind::Control { content, .. }
            | NodeKind::Output { content, .. }
            | NodeKind::Tag { content, .. } => Some(content),
            NodeKind::Embedded { body, .. } => Some(body),
            NodeKind::Text { .. } | NodeKind::Directive { .. } | NodeKind::Newline => None,
        }
    }
}
