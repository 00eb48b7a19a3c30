use std::fmt;

/// Severity attached to every error raised by the lowering stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

pub trait SlateErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn span(&self) -> Option<crate::location::Span>;
    fn location(&self) -> Option<crate::location::Location>;
}

/// Result type used by every fallible operation of the crate.
pub type Result<T> = std::result::Result<T, Box<dyn SlateErrorExt>>;

impl fmt::Debug for dyn SlateErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown".to_string(),
        };
        let span_str = match self.span() {
            Some(span) => span.to_string(),
            None => "span:none".to_string(),
        };

        write!(
            f,
            "SLATE | {} | {} | {} | {} | {}",
            self.level(),
            loc_str,
            self.issuer(),
            span_str,
            self.message()
        )
    }
}

impl fmt::Display for dyn SlateErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
