/// cli/src/report.rs
/// Output helpers for the CLI: input expansion, the engine listing and
/// write failures.
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use slate_core::engine::{EngineRegistry, Strategy};
use slate_core::{Level, SlateErrorExt};
use std::path::PathBuf;

/// Expand glob patterns; arguments matching nothing are kept verbatim so
/// the missing file is reported by the loader.
pub fn expand_patterns(patterns: &[&String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for pattern in patterns {
        let mut matched = false;
        if let Ok(paths) = glob::glob(pattern) {
            for path in paths.flatten() {
                matched = true;
                files.push(path);
            }
        }
        if !matched {
            files.push(PathBuf::from(pattern.as_str()));
        }
    }
    files
}

fn when(strategy: &Strategy) -> &'static str {
    match strategy {
        Strategy::Static | Strategy::Interpolated => "compile time",
        Strategy::Precompiled | Strategy::RawCode => "inline code",
        Strategy::Dynamic => "every render",
        Strategy::TagWrap { nested: Some(inner), .. } => when(inner),
        Strategy::TagWrap { nested: None, .. } => "template body",
    }
}

pub fn engines_table(registry: &EngineRegistry) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Engine", "Strategy", "Evaluated", "Renderer"]);
    for (name, strategy) in registry.entries() {
        let renderer = if registry.has_renderer(name) { "yes" } else { "-" };
        table.add_row(vec![
            name.to_string(),
            strategy.describe(),
            when(strategy).to_string(),
            renderer.to_string(),
        ]);
    }
    table
}

#[derive(Debug, Clone)]
pub struct OutputError {
    path: String,
    reason: String,
}

impl OutputError {
    pub fn new(path: &str, reason: String) -> Self {
        OutputError { path: path.to_string(), reason }
    }
}

impl SlateErrorExt for OutputError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        format!("cannot write {}: {}", self.path, self.reason)
    }

    fn issuer(&self) -> String {
        "slate.cli".to_string()
    }

    fn span(&self) -> Option<slate_core::Span> {
        None
    }

    fn location(&self) -> Option<slate_core::Location> {
        None
    }
}
