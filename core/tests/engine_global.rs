use std::sync::Arc;

use slate_core::ast::Node;
use slate_core::engine::{self, EngineRegistry, PassthroughRenderer, Strategy};
use slate_core::ir::IrNode;

// Single test: the process-wide registry is shared by every test in this
// binary.
#[test]
fn install_swaps_the_process_wide_registry() {
    let before = engine::global();
    assert!(before.contains("markdown"));
    assert!(!before.contains("shout"));

    let mut registry = EngineRegistry::with_builtin_engines();
    registry.register_strategy("shout", Strategy::Static);
    registry.register_renderer("shout", Arc::new(PassthroughRenderer::new("Shout")));
    engine::install(registry);

    // Snapshots taken earlier are never mutated.
    assert!(!before.contains("shout"));

    let ir = slate_core::compile_with_defaults(&[Node::embedded("shout", vec![Node::text("hey")])])
        .expect("installed engine resolves");
    assert_eq!(ir, IrNode::Sequence(vec![IrNode::static_text("hey")]));

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| engine::global().lookup("shout").is_ok()))
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
