//! file: core/src/ast/decode.rs
//! description: JSON decoding of parser output into `Node` trees.
//!
//! The parser is an external process; it hands templates over as nested
//! JSON arrays shaped like `["tmpl", "text", "hello"]`. A template is an
//! array of such nodes, and so is every `content` operand.

use serde_json::Value;

use super::err::MalformedTreeError;
use super::kind::{Attribute, NodeKind};
use super::node::Node;

type DecodeResult<T> = Result<T, MalformedTreeError>;

/// Decode a whole template (a JSON array of nodes).
pub fn decode_template(value: &Value) -> DecodeResult<Vec<Node>> {
    decode_content(value, "$")
}

/// Parse `raw` as JSON and decode it as a template.
pub fn decode_template_str(raw: &str) -> DecodeResult<Vec<Node>> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| MalformedTreeError::new("$", format!("invalid JSON: {}", e)))?;
    decode_template(&value)
}

fn decode_content(value: &Value, path: &str) -> DecodeResult<Vec<Node>> {
    let items = value
        .as_array()
        .ok_or_else(|| MalformedTreeError::new(path, "expected an array of nodes"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode_node(item, &format!("{}[{}]", path, i)))
        .collect()
}

/// Decode a single node.
pub fn decode_node(value: &Value, path: &str) -> DecodeResult<Node> {
    let parts = value
        .as_array()
        .ok_or_else(|| MalformedTreeError::new(path, "expected a node array"))?;

    let head = str_at(parts, 0, path)?;
    if head == "newline" {
        return Ok(Node::newline());
    }
    if head != "tmpl" {
        return Err(MalformedTreeError::new(path, format!("unknown node namespace '{}'", head)));
    }

    let op = str_at(parts, 1, path)?;
    let kind = match op {
        "text" => {
            expect_len(parts, 3, path)?;
            NodeKind::Text { value: str_at(parts, 2, path)?.to_string() }
        }
        "control" => {
            expect_len(parts, 4, path)?;
            NodeKind::Control {
                code: str_at(parts, 2, path)?.to_string(),
                content: decode_content(&parts[3], &format!("{}[3]", path))?,
            }
        }
        "output" => {
            expect_len(parts, 5, path)?;
            NodeKind::Output {
                escape: bool_at(parts, 2, path)?,
                code: str_at(parts, 3, path)?.to_string(),
                content: decode_content(&parts[4], &format!("{}[4]", path))?,
            }
        }
        "directive" => {
            expect_len(parts, 3, path)?;
            NodeKind::Directive { kind: str_at(parts, 2, path)?.to_string() }
        }
        "tag" => {
            expect_len(parts, 5, path)?;
            NodeKind::Tag {
                name: str_at(parts, 2, path)?.to_string(),
                attributes: decode_attributes(&parts[3], &format!("{}[3]", path))?,
                content: decode_content(&parts[4], &format!("{}[4]", path))?,
            }
        }
        "embedded" => {
            let engine = str_at(parts, 2, path)?.to_string();
            let body = parts[3..]
                .iter()
                .enumerate()
                .map(|(i, item)| decode_node(item, &format!("{}[{}]", path, i + 3)))
                .collect::<DecodeResult<Vec<_>>>()?;
            NodeKind::Embedded { engine, body }
        }
        other => {
            return Err(MalformedTreeError::new(path, format!("unknown operation '{}'", other)));
        }
    };

    Ok(Node::new(kind, None))
}

fn decode_attributes(value: &Value, path: &str) -> DecodeResult<Vec<Attribute>> {
    let items = value
        .as_array()
        .ok_or_else(|| MalformedTreeError::new(path, "expected an array of attributes"))?;
    let mut attrs = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let attr_path = format!("{}[{}]", path, i);
        let triple = item
            .as_array()
            .ok_or_else(|| MalformedTreeError::new(&attr_path, "expected [key, dynamic, value]"))?;
        expect_len(triple, 3, &attr_path)?;
        attrs.push(Attribute::new(
            str_at(triple, 0, &attr_path)?,
            bool_at(triple, 1, &attr_path)?,
            str_at(triple, 2, &attr_path)?,
        ));
    }
    Ok(attrs)
}

fn expect_len(parts: &[Value], len: usize, path: &str) -> DecodeResult<()> {
    if parts.len() != len {
        return Err(MalformedTreeError::new(
            path,
            format!("expected {} elements, found {}", len, parts.len()),
        ));
    }
    Ok(())
}

fn str_at<'a>(parts: &'a [Value], idx: usize, path: &str) -> DecodeResult<&'a str> {
    parts
        .get(idx)
        .and_then(Value::as_str)
        .ok_or_else(|| MalformedTreeError::new(format!("{}[{}]", path, idx), "expected a string"))
}

fn bool_at(parts: &[Value], idx: usize, path: &str) -> DecodeResult<bool> {
    parts
        .get(idx)
        .and_then(Value::as_bool)
        .ok_or_else(|| MalformedTreeError::new(format!("{}[{}]", path, idx), "expected a boolean"))
}
