//! file: core/src/ir/encode.rs
//! description: JSON encoding of IR trees for out-of-process backends.
//!
//! Every node becomes an array whose first element is the backend tag,
//! e.g. `["html:basicattr", ["static", "id"], ["dynamic", "x"]]`.

use serde_json::{Value, json};

use super::node::IrNode;

impl IrNode {
    pub fn to_json(&self) -> Value {
        match self {
            IrNode::Sequence(children) | IrNode::HtmlAttrs(children) => {
                let mut out = Vec::with_capacity(children.len() + 1);
                out.push(json!(self.tag()));
                out.extend(children.iter().map(IrNode::to_json));
                Value::Array(out)
            }
            IrNode::StaticText(s)
            | IrNode::DynamicExpr(s)
            | IrNode::CodeStatement(s)
            | IrNode::Doctype(s) => json!([self.tag(), s]),
            IrNode::Capture { var, body } => json!(["capture", var, body.to_json()]),
            IrNode::HtmlTag { name, attrs, content } => {
                json!(["html:tag", name, attrs.to_json(), content.to_json()])
            }
            IrNode::HtmlBasicAttr { key, value } => {
                json!(["html:basicattr", key.to_json(), value.to_json()])
            }
        }
    }

    pub fn to_json_string(&self, pretty: bool) -> String {
        let value = self.to_json();
        let rendered = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        };
        rendered.unwrap_or_else(|_| "null".to_string())
    }
}
