use std::sync::Arc;

use serde_json::{Map, Value};
use slate_core::ast::Node;
use slate_core::compiler::{Compiler, CompilerOptions, compile_template};
use slate_core::engine::{
    EngineKind, EngineOptions, EngineRegistry, RenderError, Renderer, Strategy, collect_text,
};
use slate_core::ir::IrNode;
use slate_core::location::Location;
use slate_core::SlateErrorExt;

/// Upper-cases its source; precompiles to a buffer append.
struct Shout;

impl Renderer for Shout {
    fn host_name(&self) -> &str {
        "Shout::Template"
    }

    fn render(&self, source: &str, scope: Option<&Value>, locals: &Map<String, Value>) -> Result<String, RenderError> {
        assert!(scope.is_none() && locals.is_empty(), "compile-time renders get no context");
        Ok(source.to_uppercase())
    }

    fn precompiled_fragment(&self, source: &str) -> Result<String, RenderError> {
        Ok(format!("_buf << {:?}", source))
    }
}

/// Always fails.
struct Broken;

impl Renderer for Broken {
    fn host_name(&self) -> &str {
        "Broken"
    }

    fn render(&self, _source: &str, _scope: Option<&Value>, _locals: &Map<String, Value>) -> Result<String, RenderError> {
        Err(RenderError::new("Broken", "syntax error on line 1"))
    }
}

fn body(lines: &[&str]) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            nodes.push(Node::newline());
        }
        nodes.push(Node::text(*line));
    }
    nodes
}

fn registry_with(name: &str, kind: EngineKind, options: EngineOptions) -> EngineRegistry {
    let mut registry = EngineRegistry::new();
    registry.register(name, kind, options).expect("valid registration");
    registry.register_renderer(name, Arc::new(Shout));
    registry
}

fn embed(registry: &EngineRegistry, name: &str, lines: &[&str]) -> IrNode {
    let mut compiler = Compiler::new(registry, CompilerOptions::default());
    compiler
        .compile(&Node::embedded(name, body(lines)))
        .expect("embedding should succeed")
        .expect("embedded blocks always produce a node")
}

#[test]
fn collect_text_keeps_text_and_newlines_only() {
    let nodes = vec![
        Node::text("a"),
        Node::newline(),
        Node::output(true, "secret", vec![]),
        Node::text("b"),
        Node::tag("i", vec![], vec![Node::text("lost")]),
    ];
    assert_eq!(collect_text(&nodes), "a\nb");
    assert_eq!(EngineRegistry::collect_text(&nodes), "a\nb");
}

#[test]
fn static_strategy_renders_at_compile_time() {
    let registry = registry_with("shout", EngineKind::Render, EngineOptions::default());
    assert_eq!(embed(&registry, "shout", &["hi #{x}", "there"]), IrNode::static_text("HI #{X}\nTHERE"));
}

#[test]
fn static_strategy_is_deterministic() {
    let registry = registry_with("shout", EngineKind::Render, EngineOptions::default());
    let first = embed(&registry, "shout", &["same", "body"]);
    let second = embed(&registry, "shout", &["same", "body"]);
    assert_eq!(first, second);
}

#[test]
fn interpolated_strategy_feeds_output_through_text_rule() {
    let mut registry = EngineRegistry::new();
    registry
        .register("md", EngineKind::Render, EngineOptions::interpolate())
        .unwrap();
    registry.register_renderer("md", Arc::new(slate_core::engine::PassthroughRenderer::new("Md")));
    assert_eq!(
        embed(&registry, "md", &["a #{b} c"]),
        IrNode::Sequence(vec![
            IrNode::static_text("a "),
            IrNode::dynamic("Slate::Helpers.escape_html((b))"),
            IrNode::static_text(" c"),
        ])
    );
}

#[test]
fn precompiled_strategy_wraps_fragment_in_invoked_block() {
    let registry = registry_with("erb", EngineKind::Render, EngineOptions::precompiled());
    assert_eq!(
        embed(&registry, "erb", &["x"]),
        IrNode::dynamic("proc { _buf << \"x\" }.call")
    );
}

#[test]
fn precompiled_strategy_reports_unsupported_renderers() {
    let mut registry = EngineRegistry::new();
    registry.register_strategy("bad", Strategy::Precompiled);
    registry.register_renderer("bad", Arc::new(Broken));
    let mut compiler = Compiler::new(&registry, CompilerOptions::default());
    let err = compiler.compile(&Node::embedded("bad", body(&["x"]))).unwrap_err();
    assert!(err.message().contains("precompiled_fragment"), "got {}", err.message());
}

#[test]
fn dynamic_strategy_defers_rendering() {
    let registry = registry_with("liquid", EngineKind::Render, EngineOptions::dynamic());
    let ir = embed(&registry, "liquid", &["{{ name }}", "#{x}"]);
    let IrNode::DynamicExpr(code) = ir else { panic!("expected dynamic expression") };
    assert!(code.starts_with("Shout::Template.new { \"{{ name }}\\n\\#{x}\" }.render(self, "), "got {}", code);
    assert!(code.contains("local_variables"));
}

#[test]
fn tag_strategy_wraps_compiled_body() {
    let registry = registry_with(
        "javascript",
        EngineKind::Tag,
        EngineOptions::tag("script").attribute("type", "text/javascript"),
    );
    assert_eq!(
        embed(&registry, "javascript", &["alert(#{msg})"]),
        IrNode::html_tag(
            "script",
            IrNode::HtmlAttrs(vec![IrNode::basic_attr(
                IrNode::static_text("type"),
                IrNode::Sequence(vec![IrNode::static_text("text/javascript")]),
            )]),
            IrNode::Sequence(vec![IrNode::Sequence(vec![
                IrNode::static_text("alert("),
                IrNode::dynamic("Slate::Helpers.escape_html((msg))"),
                IrNode::static_text(")"),
            ])]),
        )
    );
}

#[test]
fn tag_strategy_runs_nested_strategy_first() {
    let registry = registry_with(
        "sass",
        EngineKind::Tag,
        EngineOptions::tag("style").attribute("type", "text/css").nested(Strategy::Static),
    );
    let ir = embed(&registry, "sass", &["a { b: c }"]);
    let IrNode::HtmlTag { name, content, .. } = ir else { panic!("expected tag") };
    assert_eq!(name, "style");
    assert_eq!(*content, IrNode::static_text("A { B: C }"));
}

#[test]
fn raw_strategy_emits_code_statement() {
    let mut registry = EngineRegistry::new();
    registry.register("ruby", EngineKind::Raw, EngineOptions::default()).unwrap();
    assert_eq!(embed(&registry, "ruby", &["x = 1", "y = 2"]), IrNode::code("x = 1\ny = 2"));
}

#[test]
fn missing_renderer_is_an_error() {
    let mut registry = EngineRegistry::new();
    registry.register_strategy("markdown", Strategy::Interpolated);
    let mut compiler = Compiler::new(&registry, CompilerOptions::default());
    let err = compiler.compile(&Node::embedded("markdown", vec![])).unwrap_err();
    assert!(err.message().contains("no renderer"), "got {}", err.message());
}

#[test]
fn renderer_failures_propagate() {
    let mut registry = EngineRegistry::new();
    registry.register_strategy("broken", Strategy::Static);
    registry.register_renderer("broken", Arc::new(Broken));
    let err = compile_template(&[Node::embedded("broken", body(&["x"]))], &registry, CompilerOptions::default())
        .unwrap_err();
    assert!(err.message().contains("syntax error on line 1"));
}

#[test]
fn unknown_engine_propagates_out_of_compile_with_location() {
    let registry = EngineRegistry::with_builtin_engines();
    let node = Node::embedded("nope", vec![]).with_location(Location::new("page.tmpl", 3, 1));
    let template = vec![Node::tag("div", vec![], vec![node])];
    let err = compile_template(&template, &registry, CompilerOptions::default()).unwrap_err();
    assert!(err.message().contains("'nope'"), "got {}", err.message());
    assert_eq!(err.location(), Some(Location::new("page.tmpl", 3, 1)));
    assert!(slate_core::generate_error_report(&*err).contains("page.tmpl:3:1"));
}
