use std::path::PathBuf;

use crate::SlateErrorExt;
use crate::ast::{Node, decode_template_str};

/// A parsed template tree stored as JSON on disk, as written by the
/// external parser.
#[derive(Debug, Clone)]
pub struct TemplateTree {
    pub name: String,
    pub path: PathBuf,
    pub nodes: Vec<Node>,
}

impl TemplateTree {
    pub fn new(path: PathBuf) -> Result<Self, Box<dyn SlateErrorExt>> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = std::fs::read_to_string(&path).map_err(|_| {
            Box::new(MissingTemplateError { path: path.clone() }) as Box<dyn SlateErrorExt>
        })?;
        let nodes = decode_template_str(&content).map_err(|e| Box::new(e) as Box<dyn SlateErrorExt>)?;
        Ok(TemplateTree { name, path, nodes })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::fmt::Display for TemplateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template: {} at {:?} ({} nodes)", self.name, self.path, self.nodes.len())
    }
}

#[derive(Debug, Clone)]
pub struct MissingTemplateError {
    pub path: PathBuf,
}

impl std::fmt::Display for MissingTemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Missing template tree at {:?}", self.path)
    }
}

impl std::error::Error for MissingTemplateError {}

impl SlateErrorExt for MissingTemplateError {
    fn level(&self) -> crate::Level {
        crate::Level::Error
    }

    fn message(&self) -> String {
        format!("Missing template tree at {:?}", self.path)
    }

    fn issuer(&self) -> String {
        "slate.template".to_string()
    }

    fn span(&self) -> Option<crate::location::Span> {
        None
    }

    fn location(&self) -> Option<crate::location::Location> {
        None
    }
}
