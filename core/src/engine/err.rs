use crate::error::{Level, SlateErrorExt};
use crate::location::{Location, Span};

/// Lookup of an engine name nothing was registered under.
#[derive(Debug, Clone)]
pub struct UnknownEngineError {
    engine: String,
    location: Option<Location>,
}

impl UnknownEngineError {
    pub fn new(engine: impl Into<String>) -> Self {
        UnknownEngineError { engine: engine.into(), location: None }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }
}

impl std::fmt::Display for UnknownEngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown embedded engine '{}'", self.engine)
    }
}

impl std::error::Error for UnknownEngineError {}

impl SlateErrorExt for UnknownEngineError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "slate.engine.lookup".to_string()
    }

    fn span(&self) -> Option<Span> {
        self.location.clone().map(Span::point)
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}

/// An engine strategy needs a renderer nobody registered.
#[derive(Debug, Clone)]
pub struct MissingRendererError {
    engine: String,
}

impl MissingRendererError {
    pub fn new(engine: impl Into<String>) -> Self {
        MissingRendererError { engine: engine.into() }
    }
}

impl std::fmt::Display for MissingRendererError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no renderer registered for embedded engine '{}'", self.engine)
    }
}

impl std::error::Error for MissingRendererError {}

impl SlateErrorExt for MissingRendererError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "slate.engine.renderer".to_string()
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

/// Failure reported by a sub-language renderer.
#[derive(Debug, Clone)]
pub struct RenderError {
    renderer: String,
    message: String,
}

impl RenderError {
    pub fn new(renderer: impl Into<String>, message: impl Into<String>) -> Self {
        RenderError { renderer: renderer.into(), message: message.into() }
    }

    pub fn unsupported(renderer: &str, operation: &str) -> Self {
        RenderError::new(renderer, format!("{} is not supported", operation))
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "renderer {} failed: {}", self.renderer, self.message)
    }
}

impl std::error::Error for RenderError {}

impl SlateErrorExt for RenderError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "slate.engine.render".to_string()
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

/// Wraps an error raised while lowering a node with that node's position.
pub struct Located {
    inner: Box<dyn SlateErrorExt>,
    location: Location,
}

impl Located {
    pub fn new(inner: Box<dyn SlateErrorExt>, location: Location) -> Self {
        Located { inner, location }
    }
}

impl SlateErrorExt for Located {
    fn level(&self) -> Level {
        self.inner.level()
    }

    fn message(&self) -> String {
        self.inner.message()
    }

    fn issuer(&self) -> String {
        self.inner.issuer()
    }

    fn span(&self) -> Option<Span> {
        self.inner.span().or_else(|| Some(Span::point(self.location.clone())))
    }

    fn location(&self) -> Option<Location> {
        Some(self.location.clone())
    }
}

/// Registration arguments that do not describe a usable strategy.
#[derive(Debug, Clone)]
pub struct InvalidEngineError {
    engine: String,
    reason: String,
}

impl InvalidEngineError {
    pub fn new(engine: impl Into<String>, reason: impl Into<String>) -> Self {
        InvalidEngineError { engine: engine.into(), reason: reason.into() }
    }
}

impl std::fmt::Display for InvalidEngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot register embedded engine '{}': {}", self.engine, self.reason)
    }
}

impl std::error::Error for InvalidEngineError {}

impl SlateErrorExt for InvalidEngineError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "slate.engine.register".to_string()
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        None
    }
}
