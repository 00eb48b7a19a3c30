//! file: core/src/engine/renderer.rs
//! description: sub-language renderer interface.
//!
//! Renderers are supplied by the host application (one per sub-language,
//! e.g. markdown or sass). The lowering stage only calls them through this
//! trait and never looks at their syntax.

use serde_json::{Map, Value};

use super::err::RenderError;

pub trait Renderer: Send + Sync {
    /// Host-code expression naming the renderer at runtime. Used by the
    /// dynamic strategy, which constructs the renderer in generated code.
    fn host_name(&self) -> &str;

    /// Render `source`. `scope` is the rendering context object and
    /// `locals` the visible local variables; compile-time renders pass
    /// `None` and an empty map.
    fn render(
        &self,
        source: &str,
        scope: Option<&Value>,
        locals: &Map<String, Value>,
    ) -> Result<String, RenderError>;

    /// The renderer's own lowering of `source` into host code. Renderers
    /// that cannot precompile keep the default.
    fn precompiled_fragment(&self, source: &str) -> Result<String, RenderError> {
        let _ = source;
        Err(RenderError::unsupported(self.host_name(), "precompiled_fragment"))
    }
}

/// Renders its source unchanged. Useful for sub-languages that are already
/// the target format, and for tests.
#[derive(Debug, Clone)]
pub struct PassthroughRenderer {
    host_name: String,
}

impl PassthroughRenderer {
    pub fn new(host_name: impl Into<String>) -> Self {
        PassthroughRenderer { host_name: host_name.into() }
    }
}

impl Renderer for PassthroughRenderer {
    fn host_name(&self) -> &str {
        &self.host_name
    }

    fn render(
        &self,
        source: &str,
        _scope: Option<&Value>,
        _locals: &Map<String, Value>,
    ) -> Result<String, RenderError> {
        Ok(source.to_string())
    }

    fn precompiled_fragment(&self, source: &str) -> Result<String, RenderError> {
        Ok(crate::compiler::host::string_literal(source))
    }
}
