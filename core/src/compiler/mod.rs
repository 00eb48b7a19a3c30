//! file: core/src/compiler/mod.rs
//! description: lowering of input template trees into backend IR.
//!
//! `Compiler` walks a `Node` tree and produces an `IrNode` tree. Every
//! input kind has exactly one lowering rule. Embedded sub-language blocks
//! are handed to the `EngineRegistry`; everything else is lowered here.
//!
//! A `Compiler` owns the counter used to name block-capture temporaries.
//! Use one instance per template (or call `reset` in between) so that
//! temporaries stay unique within the generated routine.

pub mod host;
pub mod options;
pub mod text;

use log::{debug, trace};

use crate::ast::{Attribute, Node, NodeKind};
use crate::engine::EngineRegistry;
use crate::error::Result;
use crate::ir::IrNode;

pub use self::options::{CompilerOptions, ConfigError};

const DOCTYPE_PREFIX: &str = "doctype";

pub struct Compiler<'r> {
    registry: &'r EngineRegistry,
    options: CompilerOptions,
    /// Distinguishes temporaries of independent compile calls.
    session: usize,
    tmp_counter: usize,
}

fn next_session() -> usize {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static SESSIONS: AtomicUsize = AtomicUsize::new(1);
    SESSIONS.fetch_add(1, Ordering::Relaxed)
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r EngineRegistry, options: CompilerOptions) -> Self {
        Compiler { registry, options, session: next_session(), tmp_counter: 0 }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn registry(&self) -> &'r EngineRegistry {
        self.registry
    }

    /// Start a new compile session: numbering restarts under a fresh
    /// session id, so names never repeat those handed out before.
    pub fn reset(&mut self) {
        self.session = next_session();
        self.tmp_counter = 0;
    }

    /// Lower a single node. Returns `None` for nodes that produce nothing
    /// (directives other than doctype).
    pub fn compile(&mut self, node: &Node) -> Result<Option<IrNode>> {
        trace!("lowering {}", node);
        let ir = match &node.kind {
            NodeKind::Text { value } => self.compile_text(value),
            NodeKind::Control { code, content } => {
                IrNode::Sequence(vec![IrNode::code(code.as_str()), self.compile_content(content)?])
            }
            NodeKind::Output { escape, code, content } => self.compile_output(*escape, code, content)?,
            NodeKind::Directive { kind } => return Ok(self.compile_directive(kind)),
            NodeKind::Tag { name, attributes, content } => self.compile_tag(name, attributes, content)?,
            NodeKind::Embedded { engine, body } => {
                debug!("dispatching embedded engine '{}'", engine);
                let registry = self.registry;
                registry
                    .dispatch(self, engine, body)
                    .map_err(|err| attach_location(err, node))?
            }
            NodeKind::Newline => IrNode::empty(),
        };
        Ok(Some(ir))
    }

    /// Lower an ordered list of nodes into a `Sequence`, preserving order.
    pub fn compile_content(&mut self, content: &[Node]) -> Result<IrNode> {
        let mut children = Vec::with_capacity(content.len());
        for node in content {
            if let Some(ir) = self.compile(node)? {
                children.push(ir);
            }
        }
        Ok(IrNode::Sequence(children))
    }

    /// Split `text` into static runs and escaped `#{...}` interpolations.
    pub fn compile_text(&self, value: &str) -> IrNode {
        let pieces = text::coalesce(text::split(value));
        IrNode::Sequence(
            pieces
                .into_iter()
                .map(|piece| match piece {
                    text::Piece::Static(s) => IrNode::StaticText(s),
                    text::Piece::Interpolation(code) => IrNode::DynamicExpr(self.escape_code(code)),
                })
                .collect(),
        )
    }

    /// Host code that html-escapes the value of `code`.
    pub fn escape_code(&self, code: &str) -> String {
        host::escape_call(&self.options.escape_helper, self.options.use_html_safe, code)
    }

    fn compile_output(&mut self, escape: bool, code: &str, content: &[Node]) -> Result<IrNode> {
        if content.is_empty() {
            let expr = if escape { self.escape_code(code) } else { code.to_string() };
            return Ok(IrNode::Sequence(vec![IrNode::DynamicExpr(expr), IrNode::empty()]));
        }
        self.compile_output_block(escape, code, content)
    }

    /// The call in `code` takes the block formed by `content`. The block's
    /// output is captured into a temporary and returned from the block, so
    /// a `yield` inside the call receives it as a string instead of the
    /// content being written straight to the buffer.
    fn compile_output_block(&mut self, escape: bool, code: &str, content: &[Node]) -> Result<IrNode> {
        let result_var = self.tmp_var();
        let capture_var = self.tmp_var();

        let captured = self.compile_content(content)?;
        let output = self.compile_output(escape, &result_var, &[])?;

        Ok(IrNode::Sequence(vec![
            IrNode::code(host::assign(&result_var, code)),
            IrNode::capture(capture_var.as_str(), captured),
            IrNode::code(capture_var),
            IrNode::code(host::BLOCK_END),
            output,
        ]))
    }

    fn compile_directive(&self, kind: &str) -> Option<IrNode> {
        let rest = kind.strip_prefix(DOCTYPE_PREFIX)?;
        Some(IrNode::Doctype(rest.trim().to_string()))
    }

    fn compile_tag(&mut self, name: &str, attributes: &[Attribute], content: &[Node]) -> Result<IrNode> {
        let attrs = attributes
            .iter()
            .map(|attr| {
                let value = if attr.dynamic {
                    IrNode::DynamicExpr(self.escape_code(&attr.value))
                } else {
                    self.compile_text(&attr.value)
                };
                IrNode::basic_attr(IrNode::static_text(attr.key.as_str()), value)
            })
            .collect();
        let content = self.compile_content(content)?;
        Ok(IrNode::html_tag(name, IrNode::HtmlAttrs(attrs), content))
    }

    fn tmp_var(&mut self) -> String {
        self.tmp_counter += 1;
        let name = format!("{}{}_{}", self.options.tmp_prefix, self.session, self.tmp_counter);
        debug!("allocated temporary {}", name);
        name
    }
}

/// Add the node position to errors raised without one.
fn attach_location(
    err: Box<dyn crate::error::SlateErrorExt>,
    node: &Node,
) -> Box<dyn crate::error::SlateErrorExt> {
    match (err.location(), node.get_location()) {
        (None, Some(loc)) => Box::new(crate::engine::err::Located::new(err, loc.clone())),
        _ => err,
    }
}

/// Lower a whole template with a fresh `Compiler`.
pub fn compile_template(
    nodes: &[Node],
    registry: &EngineRegistry,
    options: CompilerOptions,
) -> Result<IrNode> {
    Compiler::new(registry, options).compile_content(nodes)
}

/// Lower a whole template against the process-wide registry with default
/// options.
pub fn compile_with_defaults(nodes: &[Node]) -> Result<IrNode> {
    let registry = crate::engine::global();
    compile_template(nodes, &registry, CompilerOptions::default())
}
