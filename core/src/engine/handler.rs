//! file: core/src/engine/handler.rs
//! description: embedded engine strategies and the handler that runs them.
//!
//! A strategy is picked once, when an engine is registered, from an
//! `EngineKind` and its `EngineOptions`. `EmbeddedHandler` is the working
//! copy handed out by each registry lookup; it owns the scratch buffer the
//! strategies collect source text into.

use serde_json::Map;

use crate::ast::Node;
use crate::compiler::{Compiler, host};
use crate::error::{Result, SlateErrorExt};
use crate::ir::IrNode;

use super::collect::collect_text_into;
use super::err::InvalidEngineError;

/// The family an engine is registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Rendered by a sub-language renderer; the options choose when.
    Render,
    /// Output wrapped in a fixed markup element.
    Tag,
    /// Body is host code, emitted as a statement.
    Raw,
}

/// Registration options. Only the subset relevant to the kind is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub precompiled: bool,
    pub dynamic: bool,
    pub interpolate: bool,
    pub tag: Option<String>,
    /// Literal attributes of the wrapping element, in output order.
    pub attributes: Vec<(String, String)>,
    /// Strategy run over the body before wrapping it.
    pub nested: Option<Box<Strategy>>,
}

impl EngineOptions {
    pub fn precompiled() -> Self {
        EngineOptions { precompiled: true, ..Default::default() }
    }

    pub fn dynamic() -> Self {
        EngineOptions { dynamic: true, ..Default::default() }
    }

    pub fn interpolate() -> Self {
        EngineOptions { interpolate: true, ..Default::default() }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        EngineOptions { tag: Some(name.into()), ..Default::default() }
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn nested(mut self, strategy: Strategy) -> Self {
        self.nested = Some(Box::new(strategy));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Rendered once at compile time, emitted as static text.
    Static,
    /// Rendered at compile time, then interpolated like template text.
    Interpolated,
    /// The renderer's host-code lowering, run inline in an invoked block.
    Precompiled,
    /// Constructed and rendered at every render call, with the locals.
    Dynamic,
    TagWrap {
        tag: String,
        attributes: Vec<(String, String)>,
        nested: Option<Box<Strategy>>,
    },
    /// The body is emitted as a host-code statement.
    RawCode,
}

impl Strategy {
    /// Resolve registration arguments into a strategy. For `Render`,
    /// `precompiled` wins over `dynamic`, which wins over `interpolate`.
    pub fn from_options(name: &str, kind: EngineKind, options: EngineOptions) -> std::result::Result<Strategy, InvalidEngineError> {
        match kind {
            EngineKind::Render => Ok(if options.precompiled {
                Strategy::Precompiled
            } else if options.dynamic {
                Strategy::Dynamic
            } else if options.interpolate {
                Strategy::Interpolated
            } else {
                Strategy::Static
            }),
            EngineKind::Tag => {
                let tag = options
                    .tag
                    .filter(|t| !t.trim().is_empty())
                    .ok_or_else(|| InvalidEngineError::new(name, "tag engines need a `tag` option"))?;
                if matches!(options.nested.as_deref(), Some(Strategy::TagWrap { .. })) {
                    return Err(InvalidEngineError::new(name, "a tag engine cannot nest another tag engine"));
                }
                Ok(Strategy::TagWrap { tag, attributes: options.attributes, nested: options.nested })
            }
            EngineKind::Raw => Ok(Strategy::RawCode),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Static => "static",
            Strategy::Interpolated => "interpolated",
            Strategy::Precompiled => "precompiled",
            Strategy::Dynamic => "dynamic",
            Strategy::TagWrap { .. } => "tag",
            Strategy::RawCode => "raw",
        }
    }

    /// One-line description for listings.
    pub fn describe(&self) -> String {
        match self {
            Strategy::TagWrap { tag, attributes, nested } => {
                let mut out = format!("<{}", tag);
                for (k, v) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", k, v));
                }
                out.push('>');
                if let Some(inner) = nested {
                    out.push_str(&format!(" around {}", inner.label()));
                }
                out
            }
            other => other.label().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddedHandler {
    strategy: Strategy,
    buffer: String,
}

impl EmbeddedHandler {
    pub fn new(strategy: Strategy) -> Self {
        EmbeddedHandler { strategy, buffer: String::new() }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Adjust the strategy of this working copy only.
    pub fn strategy_mut(&mut self) -> &mut Strategy {
        &mut self.strategy
    }

    /// Source text collected by the last `collect_text` or `embed` call.
    pub fn last_source(&self) -> &str {
        &self.buffer
    }

    pub fn collect_text(&mut self, body: &[Node]) -> &str {
        self.buffer.clear();
        collect_text_into(&mut self.buffer, body);
        &self.buffer
    }

    /// Lower an embedded block of `engine` with this handler's strategy.
    pub fn embed(&mut self, compiler: &mut Compiler<'_>, engine: &str, body: &[Node]) -> Result<IrNode> {
        embed_with(&self.strategy, &mut self.buffer, compiler, engine, body)
    }
}

fn boxed<E: SlateErrorExt + 'static>(err: E) -> Box<dyn SlateErrorExt> {
    Box::new(err)
}

fn source<'b>(buffer: &'b mut String, body: &[Node]) -> &'b str {
    buffer.clear();
    collect_text_into(buffer, body);
    buffer
}

fn embed_with(
    strategy: &Strategy,
    buffer: &mut String,
    compiler: &mut Compiler<'_>,
    engine: &str,
    body: &[Node],
) -> Result<IrNode> {
    match strategy {
        Strategy::Static | Strategy::Interpolated => {
            let renderer = compiler.registry().renderer(engine)?;
            let text = source(buffer, body);
            let rendered = renderer.render(text, None, &Map::new()).map_err(boxed)?;
            if *strategy == Strategy::Static {
                Ok(IrNode::StaticText(rendered))
            } else {
                Ok(compiler.compile_text(&rendered))
            }
        }
        Strategy::Precompiled => {
            let renderer = compiler.registry().renderer(engine)?;
            let fragment = renderer.precompiled_fragment(source(buffer, body)).map_err(boxed)?;
            Ok(IrNode::DynamicExpr(host::invoke_block(&fragment)))
        }
        Strategy::Dynamic => {
            let renderer = compiler.registry().renderer(engine)?;
            Ok(IrNode::DynamicExpr(host::render_call(renderer.host_name(), source(buffer, body))))
        }
        Strategy::TagWrap { tag, attributes, nested } => {
            let content = match nested {
                Some(inner) => embed_with(inner, buffer, compiler, engine, body)?,
                None => compiler.compile_content(body)?,
            };
            let attrs = attributes
                .iter()
                .map(|(key, value)| {
                    IrNode::basic_attr(IrNode::static_text(key.as_str()), compiler.compile_text(value))
                })
                .collect();
            Ok(IrNode::html_tag(tag.as_str(), IrNode::HtmlAttrs(attrs), content))
        }
        Strategy::RawCode => Ok(IrNode::CodeStatement(source(buffer, body).to_string())),
    }
}
