//! file: core/src/engine/collect.rs
//! description: reconstruction of embedded sub-language source text.

use log::warn;

use crate::ast::{Node, NodeKind};

/// Append the raw source of an embedded body to `buffer`: text leaves
/// verbatim, newline markers as `"\n"`. Any other node (an interpolated
/// output, a nested tag) has no literal source and is dropped.
pub fn collect_text_into(buffer: &mut String, body: &[Node]) {
    for node in body {
        match &node.kind {
            NodeKind::Text { value } => buffer.push_str(value),
            NodeKind::Newline => buffer.push('\n'),
            other => warn!("dropping {} node from embedded body; only literal text is kept", other.tag()),
        }
    }
}

pub fn collect_text(body: &[Node]) -> String {
    let mut buffer = String::new();
    collect_text_into(&mut buffer, body);
    buffer
}
