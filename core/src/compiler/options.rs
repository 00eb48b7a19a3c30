//! file: core/src/compiler/options.rs
//! description: compiler configuration.
//!
//! `CompilerOptions` is deserialized from JSON config files (every field
//! is optional) or built in code via `Default` and the `with_*` setters.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Level, SlateErrorExt};
use crate::location::{Location, Span};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Select the escaper variant that leaves already-trusted (html safe)
    /// strings untouched.
    #[serde(default)]
    pub use_html_safe: bool,
    /// Host-code path of the escaping helper.
    #[serde(default = "default_escape_helper")]
    pub escape_helper: String,
    /// Prefix of the temporaries introduced by block capture.
    #[serde(default = "default_tmp_prefix")]
    pub tmp_prefix: String,
}

fn default_escape_helper() -> String {
    "Slate::Helpers.escape_html".to_string()
}

fn default_tmp_prefix() -> String {
    "_slatetmp".to_string()
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            use_html_safe: false,
            escape_helper: default_escape_helper(),
            tmp_prefix: default_tmp_prefix(),
        }
    }
}

impl CompilerOptions {
    pub fn with_html_safe(mut self, enabled: bool) -> Self {
        self.use_html_safe = enabled;
        self
    }

    pub fn with_escape_helper(mut self, helper: impl Into<String>) -> Self {
        self.escape_helper = helper.into();
        self
    }

    pub fn with_tmp_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.tmp_prefix = prefix.into();
        self
    }

    /// Load options from a JSON file and validate them.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<CompilerOptions, Box<dyn SlateErrorExt>> {
        let shown = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Box::new(ConfigError::new(&shown, format!("read config: {}", e))) as Box<dyn SlateErrorExt>)?;
        let options: CompilerOptions = serde_json::from_str(&raw)
            .map_err(|e| Box::new(ConfigError::new(&shown, format!("parse config: {}", e))) as Box<dyn SlateErrorExt>)?;
        options
            .validate()
            .map_err(|msg| Box::new(ConfigError::new(&shown, msg)) as Box<dyn SlateErrorExt>)?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.escape_helper.trim().is_empty() {
            return Err("escape_helper is empty".to_string());
        }
        if self.tmp_prefix.trim().is_empty() {
            return Err("tmp_prefix is empty".to_string());
        }
        if !self
            .tmp_prefix
            .chars()
            .all(|c| c == '_' || c.is_ascii_alphanumeric())
        {
            return Err(format!("tmp_prefix '{}' is not a plain identifier", self.tmp_prefix));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    source: String,
    message: String,
}

impl ConfigError {
    pub fn new(source: &str, message: impl Into<String>) -> Self {
        ConfigError { source: source.to_string(), message: message.into() }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid compiler config {}: {}", self.source, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl SlateErrorExt for ConfigError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "slate.compiler.options".to_string()
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        None
    }
}
