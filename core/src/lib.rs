pub mod ast;
pub mod compiler;
pub mod engine;
pub mod error;
pub mod ir;
pub mod location;
pub mod template;

pub use ast::{Attribute, Node, NodeKind};
pub use compiler::{Compiler, CompilerOptions, compile_template, compile_with_defaults};
pub use engine::{EngineKind, EngineOptions, EngineRegistry, Renderer, Strategy};
pub use error::{Level, SlateErrorExt};
pub use ir::IrNode;
pub use location::{Location, Span};
pub use template::TemplateTree;

pub fn generate_error_report(error: &dyn SlateErrorExt) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("SLATE | {} | {} | {}", level, location, message)
}

/// Load a JSON template tree from disk and lower it with the process-wide
/// registry.
pub fn compile_file(
    path: impl Into<std::path::PathBuf>,
    options: CompilerOptions,
) -> Result<IrNode, Box<dyn SlateErrorExt>> {
    let tree = TemplateTree::new(path.into())?;
    let registry = engine::global();
    compile_template(&tree.nodes, &registry, options)
}
