//! file: core/src/engine/mod.rs
//! description: embedded engine registry.
//!
//! Maps sub-language names to the strategy used to lower their blocks,
//! and holds the renderers those strategies call. A registry is built
//! mutably during setup and then only read: the `Compiler` borrows it
//! immutably, and the process-wide instance is shared behind an `Arc`.
//! Lookups return a clone of the registered handler, so scratch state of
//! one compile call never reaches another.

pub mod builtin;
pub mod collect;
pub mod err;
pub mod handler;
pub mod renderer;

use lazy_static::lazy_static;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ast::Node;
use crate::compiler::Compiler;
use crate::error::{Result, SlateErrorExt};
use crate::ir::IrNode;

pub use self::collect::collect_text;
pub use self::err::{InvalidEngineError, MissingRendererError, RenderError, UnknownEngineError};
pub use self::handler::{EmbeddedHandler, EngineKind, EngineOptions, Strategy};
pub use self::renderer::{PassthroughRenderer, Renderer};

#[derive(Default)]
pub struct EngineRegistry {
    handlers: HashMap<String, EmbeddedHandler>,
    renderers: HashMap<String, Arc<dyn Renderer>>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in engine table.
    pub fn with_builtin_engines() -> Self {
        let mut registry = Self::new();
        builtin::register_builtin_engines(&mut registry);
        registry
    }

    /// Register an engine of `kind` configured by `options`. Replaces any
    /// engine already registered under `name`.
    pub fn register(&mut self, name: &str, kind: EngineKind, options: EngineOptions) -> Result<()> {
        let strategy = Strategy::from_options(name, kind, options)
            .map_err(|e| Box::new(e) as Box<dyn SlateErrorExt>)?;
        self.register_strategy(name, strategy);
        Ok(())
    }

    pub fn register_strategy(&mut self, name: &str, strategy: Strategy) {
        info!("registered embedded engine '{}' ({})", name, strategy.describe());
        if let Some(previous) = self.handlers.insert(name.to_string(), EmbeddedHandler::new(strategy)) {
            warn!(
                "embedded engine '{}' re-registered, replacing {}",
                name,
                previous.strategy().describe()
            );
        }
    }

    /// Register the renderer used by the engine of the same name.
    pub fn register_renderer(&mut self, name: &str, renderer: Arc<dyn Renderer>) {
        info!("registered renderer '{}' ({})", name, renderer.host_name());
        self.renderers.insert(name.to_string(), renderer);
    }

    /// Working copy of the handler registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<EmbeddedHandler> {
        match self.handlers.get(name) {
            Some(handler) => Ok(handler.clone()),
            None => Err(Box::new(UnknownEngineError::new(name))),
        }
    }

    pub fn renderer(&self, name: &str) -> Result<&Arc<dyn Renderer>> {
        self.renderers
            .get(name)
            .ok_or_else(|| Box::new(MissingRendererError::new(name)) as Box<dyn SlateErrorExt>)
    }

    /// Lower an embedded block through the handler registered for `engine`.
    pub fn dispatch(&self, compiler: &mut Compiler<'_>, engine: &str, body: &[Node]) -> Result<IrNode> {
        let mut handler = self.lookup(engine)?;
        debug!("embedding {} body nodes with '{}' as {}", body.len(), engine, handler.strategy().label());
        handler.embed(compiler, engine, body)
    }

    /// Raw source text of an embedded body.
    pub fn collect_text(body: &[Node]) -> String {
        collect::collect_text(body)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn has_renderer(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Registered engine names, sorted.
    pub fn engine_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// `(name, strategy)` for every registered engine, sorted by name.
    pub fn entries(&self) -> Vec<(&str, &Strategy)> {
        let mut entries: Vec<(&str, &Strategy)> = self
            .handlers
            .iter()
            .map(|(name, handler)| (name.as_str(), handler.strategy()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut renderers: Vec<&String> = self.renderers.keys().collect();
        renderers.sort();
        f.debug_struct("EngineRegistry")
            .field("engines", &self.engine_names())
            .field("renderers", &renderers)
            .finish()
    }
}

lazy_static! {
    static ref GLOBAL: RwLock<Arc<EngineRegistry>> =
        RwLock::new(Arc::new(EngineRegistry::with_builtin_engines()));
}

/// Snapshot of the process-wide registry. Holds the built-in table until
/// `install` replaces it.
pub fn global() -> Arc<EngineRegistry> {
    let slot = GLOBAL.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(&*slot)
}

/// Replace the process-wide registry with a fully built one. Compile calls
/// already holding a snapshot keep using the previous registry.
pub fn install(registry: EngineRegistry) {
    info!("installing process-wide engine registry with {} engines", registry.handlers.len());
    let mut slot = GLOBAL.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *slot = Arc::new(registry);
}
