use crate::location;

use super::kind::{Attribute, NodeKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub location: Option<location::Location>,
}

impl Node {
    pub fn new(kind: NodeKind, location: Option<location::Location>) -> Self {
        Node { kind, location }
    }

    pub fn with_location(mut self, location: location::Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn get_kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn get_location(&self) -> Option<&location::Location> {
        self.location.as_ref()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Text { value: value.into() }, None)
    }

    pub fn control(code: impl Into<String>, content: Vec<Node>) -> Self {
        Self::new(NodeKind::Control { code: code.into(), content }, None)
    }

    pub fn output(escape: bool, code: impl Into<String>, content: Vec<Node>) -> Self {
        Self::new(NodeKind::Output { escape, code: code.into(), content }, None)
    }

    pub fn directive(kind: impl Into<String>) -> Self {
        Self::new(NodeKind::Directive { kind: kind.into() }, None)
    }

    pub fn tag(name: impl Into<String>, attributes: Vec<Attribute>, content: Vec<Node>) -> Self {
        Self::new(NodeKind::Tag { name: name.into(), attributes, content }, None)
    }

    pub fn embedded(engine: impl Into<String>, body: Vec<Node>) -> Self {
        Self::new(NodeKind::Embedded { engine: engine.into(), body }, None)
    }

    pub fn newline() -> Self {
        Self::new(NodeKind::Newline, None)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} node at {}", self.kind.tag(), loc),
            None => write!(f, "{} node", self.kind.tag()),
        }
    }
}
