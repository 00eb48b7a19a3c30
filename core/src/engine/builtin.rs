//! file: core/src/engine/builtin.rs
//! description: the engine table every registry starts from.
//!
//! Only strategies are registered here. Renderers for the sub-languages
//! are provided by the host through `EngineRegistry::register_renderer`.

use super::EngineRegistry;
use super::handler::Strategy;

fn wrap(tag: &str, mime: &str, nested: Option<Strategy>) -> Strategy {
    Strategy::TagWrap {
        tag: tag.to_string(),
        attributes: vec![("type".to_string(), mime.to_string())],
        nested: nested.map(Box::new),
    }
}

pub(crate) fn register_builtin_engines(registry: &mut EngineRegistry) {
    // Rendered at compile time, template interpolation still applies.
    for name in ["markdown", "textile", "rdoc"] {
        registry.register_strategy(name, Strategy::Interpolated);
    }

    // Compiled to script/style at compile time.
    registry.register_strategy("coffee", wrap("script", "text/javascript", Some(Strategy::Static)));
    for name in ["sass", "scss", "less"] {
        registry.register_strategy(name, wrap("style", "text/css", Some(Strategy::Static)));
    }

    for name in ["erb", "haml", "nokogiri", "builder"] {
        registry.register_strategy(name, Strategy::Precompiled);
    }

    // Re-parsed on every render, no caching.
    for name in ["liquid", "radius", "markaby"] {
        registry.register_strategy(name, Strategy::Dynamic);
    }

    registry.register_strategy("javascript", wrap("script", "text/javascript", None));
    registry.register_strategy("css", wrap("style", "text/css", None));

    registry.register_strategy("ruby", Strategy::RawCode);
}
