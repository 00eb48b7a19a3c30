use slate_core::compiler::{Compiler, CompilerOptions};
use slate_core::engine::EngineRegistry;
use slate_core::ir::IrNode;

fn text(value: &str) -> IrNode {
    let registry = EngineRegistry::new();
    let compiler = Compiler::new(&registry, CompilerOptions::default());
    compiler.compile_text(value)
}

fn escaped(code: &str) -> IrNode {
    IrNode::DynamicExpr(format!("Slate::Helpers.escape_html(({}))", code))
}

#[test]
fn plain_text_is_a_single_static_part() {
    for s in ["hello", "a # b", "50% #off", "trailing #", "{braces}"] {
        assert_eq!(text(s), IrNode::Sequence(vec![IrNode::static_text(s)]), "input {:?}", s);
    }
}

#[test]
fn empty_text_is_an_empty_sequence() {
    assert_eq!(text(""), IrNode::empty());
}

#[test]
fn interpolation_splits_static_runs() {
    assert_eq!(
        text("a#{x}b"),
        IrNode::Sequence(vec![IrNode::static_text("a"), escaped("x"), IrNode::static_text("b")])
    );
}

#[test]
fn escaped_interpolation_stays_literal() {
    assert_eq!(text(r"a\#{x}b"), IrNode::Sequence(vec![IrNode::static_text("a#{x}b")]));
}

#[test]
fn adjacent_interpolations_have_no_static_between() {
    assert_eq!(
        text("#{a}#{b}"),
        IrNode::Sequence(vec![escaped("a"), escaped("b")])
    );
}

#[test]
fn unterminated_interpolation_degrades_to_static_text() {
    assert_eq!(text("x #{y"), IrNode::Sequence(vec![IrNode::static_text("x #{y")]));
}

#[test]
fn interpolation_code_is_not_brace_balanced() {
    assert_eq!(
        text("#{h[:a]}#{ {k: 1}[:k] }"),
        IrNode::Sequence(vec![
            escaped("h[:a]"),
            escaped(" {k: 1"),
            IrNode::static_text("[:k] }"),
        ])
    );
}

#[test]
fn html_safe_option_selects_safe_escaper() {
    let registry = EngineRegistry::new();
    let options = CompilerOptions::default()
        .with_html_safe(true)
        .with_escape_helper("H.esc");
    let compiler = Compiler::new(&registry, options);
    assert_eq!(
        compiler.compile_text("#{name}"),
        IrNode::Sequence(vec![IrNode::DynamicExpr("H.esc_safe((name))".to_string())])
    );
    assert_eq!(compiler.escape_code("1+1"), "H.esc_safe((1+1))");
}
