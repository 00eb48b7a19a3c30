use crate::error::{Level, SlateErrorExt};
use crate::location::{Location, Span};

/// Raised when a JSON-encoded template tree does not follow the
/// `["tmpl", <operation>, <operand>...]` layout.
#[derive(Debug, Clone)]
pub struct MalformedTreeError {
    level: Level,
    message: String,
    issuer: String,
    /// JSON path of the offending value, e.g. `$[2][4][0]`.
    path: String,
}

impl MalformedTreeError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        MalformedTreeError {
            level: Level::Error,
            message: message.into(),
            issuer: "slate.ast.decode".to_string(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for MalformedTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed template tree at {}: {}", self.path, self.message)
    }
}

impl std::error::Error for MalformedTreeError {}

impl SlateErrorExt for MalformedTreeError {
    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        None
    }
}
