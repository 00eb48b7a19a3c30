//! file: core/src/compiler/host.rs
//! description: host-code fragment builders.
//!
//! Every fragment the lowering stage synthesizes is built here. None of
//! these functions evaluate or validate the code they are given.

/// Expression that snapshots the visible locals whose names do not start
/// with an underscore into a hash, so temporaries stay hidden.
pub const COLLECT_LOCALS: &str = r#"eval('{' + local_variables.select {|v| v[0] != ?_ }.map {|v| ":#{v}=>#{v}" }.join(',') + '}')"#;

/// `helper((code))`, or the `_safe` variant of the helper.
pub fn escape_call(helper: &str, safe: bool, code: &str) -> String {
    format!("{}{}(({}))", helper, if safe { "_safe" } else { "" }, code)
}

/// `tmp = code`, binding the value of a block-taking call.
pub fn assign(var: &str, code: &str) -> String {
    format!("{} = {}", var, code)
}

/// Closes the block opened by the call in `assign`.
pub const BLOCK_END: &str = "end";

/// Wraps a fragment in a zero-argument block invoked in place. The block
/// shares the enclosing scope, so surrounding locals stay visible.
pub fn invoke_block(fragment: &str) -> String {
    format!("proc {{ {} }}.call", fragment)
}

/// Render-time construction and rendering of a sub-language template.
pub fn render_call(renderer: &str, source: &str) -> String {
    format!("{}.new {{ {} }}.render(self, {})", renderer, string_literal(source), COLLECT_LOCALS)
}

/// Double-quoted host string literal for `text`.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{1b}' => out.push_str("\\e"),
            '#' => {
                // `#{`, `#$` and `#@` would interpolate inside double quotes.
                if matches!(chars.peek(), Some('{') | Some('$') | Some('@')) {
                    out.push('\\');
                }
                out.push('#');
            }
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_call_selects_safe_variant() {
        assert_eq!(escape_call("H.escape", false, "x"), "H.escape((x))");
        assert_eq!(escape_call("H.escape", true, "x"), "H.escape_safe((x))");
    }

    #[test]
    fn string_literal_escapes_interpolation_and_quotes() {
        assert_eq!(string_literal("a \"b\"\n#{c} #d"), r#""a \"b\"\n\#{c} #d""#);
    }
}
