//! file: core/src/ir/node.rs
//! description: IR vocabulary handed to the code-generation backend.
//!
//! The backend recognizes exactly these node kinds. Nodes are plain values;
//! lowering builds new trees and never patches existing ones.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrNode {
    Sequence(Vec<IrNode>),
    StaticText(String),
    DynamicExpr(String),
    CodeStatement(String),
    Capture { var: String, body: Box<IrNode> },
    Doctype(String),
    HtmlTag { name: String, attrs: Box<IrNode>, content: Box<IrNode> },
    /// Children are always `HtmlBasicAttr` nodes.
    HtmlAttrs(Vec<IrNode>),
    HtmlBasicAttr { key: Box<IrNode>, value: Box<IrNode> },
}

impl IrNode {
    pub fn empty() -> Self {
        IrNode::Sequence(Vec::new())
    }

    pub fn static_text(text: impl Into<String>) -> Self {
        IrNode::StaticText(text.into())
    }

    pub fn dynamic(code: impl Into<String>) -> Self {
        IrNode::DynamicExpr(code.into())
    }

    pub fn code(code: impl Into<String>) -> Self {
        IrNode::CodeStatement(code.into())
    }

    pub fn capture(var: impl Into<String>, body: IrNode) -> Self {
        IrNode::Capture { var: var.into(), body: Box::new(body) }
    }

    pub fn html_tag(name: impl Into<String>, attrs: IrNode, content: IrNode) -> Self {
        IrNode::HtmlTag { name: name.into(), attrs: Box::new(attrs), content: Box::new(content) }
    }

    pub fn basic_attr(key: IrNode, value: IrNode) -> Self {
        IrNode::HtmlBasicAttr { key: Box::new(key), value: Box::new(value) }
    }

    /// Backend tag of this node kind.
    pub fn tag(&self) -> &'static str {
        match self {
            IrNode::Sequence(_) => "sequence",
            IrNode::StaticText(_) => "static",
            IrNode::DynamicExpr(_) => "dynamic",
            IrNode::CodeStatement(_) => "code",
            IrNode::Capture { .. } => "capture",
            IrNode::Doctype(_) => "doctype",
            IrNode::HtmlTag { .. } => "html:tag",
            IrNode::HtmlAttrs(_) => "html:attrs",
            IrNode::HtmlBasicAttr { .. } => "html:basicattr",
        }
    }

    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, IrNode::Sequence(children) if children.is_empty())
    }

    /// Collect every variable name bound by a `Capture` in this subtree,
    /// in pre-order.
    pub fn capture_vars(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk(&mut |node| {
            if let IrNode::Capture { var, .. } = node {
                out.push(var.as_str());
            }
        });
        out
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a IrNode)) {
        visit(self);
        match self {
            IrNode::Sequence(children) | IrNode::HtmlAttrs(children) => {
                for child in children {
                    child.walk(visit);
                }
            }
            IrNode::Capture { body, .. } => body.walk(visit),
            IrNode::HtmlTag { attrs, content, .. } => {
                attrs.walk(visit);
                content.walk(visit);
            }
            IrNode::HtmlBasicAttr { key, value } => {
                key.walk(visit);
                value.walk(visit);
            }
            IrNode::StaticText(_)
            | IrNode::DynamicExpr(_)
            | IrNode::CodeStatement(_)
            | IrNode::Doctype(_) => {}
        }
    }
}

impl std::fmt::Display for IrNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn write_children(f: &mut std::fmt::Formatter<'_>, children: &[IrNode]) -> std::fmt::Result {
            for child in children {
                write!(f, " {}", child)?;
            }
            Ok(())
        }

        match self {
            IrNode::Sequence(children) | IrNode::HtmlAttrs(children) => {
                write!(f, "({}", self.tag())?;
                write_children(f, children)?;
                write!(f, ")")
            }
            IrNode::StaticText(s)
            | IrNode::DynamicExpr(s)
            | IrNode::CodeStatement(s)
            | IrNode::Doctype(s) => write!(f, "({} {:?})", self.tag(), s),
            IrNode::Capture { var, body } => write!(f, "(capture {} {})", var, body),
            IrNode::HtmlTag { name, attrs, content } => {
                write!(f, "(html:tag {:?} {} {})", name, attrs, content)
            }
            IrNode::HtmlBasicAttr { key, value } => write!(f, "(html:basicattr {} {})", key, value),
        }
    }
}
