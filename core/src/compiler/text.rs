//! file: core/src/compiler/text.rs
//! description: splitting of text runs into static and interpolated parts.

/// One piece of a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPart<'a> {
    /// Literal text, including un-escaped `#{...}` markers.
    Static(&'a str),
    /// The code between `#{` and the first following `}`.
    Interpolation(&'a str),
}

/// `#{code}` at the start of `s`: returns the code and the marker length.
fn interpolation_at(s: &str) -> Option<(&str, usize)> {
    let rest = s.strip_prefix("#{")?;
    let close = rest.find('}')?;
    Some((&rest[..close], close + 3))
}

/// `\#{code}` at the start of `s`: returns the literal marker (without the
/// backslash) and the total length consumed.
fn escaped_at(s: &str) -> Option<(&str, usize)> {
    let rest = s.strip_prefix('\\')?;
    let (_, len) = interpolation_at(rest)?;
    Some((&rest[..len], len + 1))
}

fn starts_marker(s: &str) -> bool {
    interpolation_at(s).is_some() || escaped_at(s).is_some()
}

/// Split `text` left to right. Unterminated markers and lone `#`
/// characters stay in the static runs. Adjacent static pieces are not
/// merged here; see `coalesce`.
pub fn split(text: &str) -> Vec<TextPart<'_>> {
    let mut parts = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        if let Some((literal, len)) = escaped_at(rest) {
            parts.push(TextPart::Static(literal));
            pos += len;
        } else if let Some((code, len)) = interpolation_at(rest) {
            parts.push(TextPart::Interpolation(code));
            pos += len;
        } else {
            let end = rest
                .char_indices()
                .skip(1)
                .find(|&(i, _)| starts_marker(&rest[i..]))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            parts.push(TextPart::Static(&rest[..end]));
            pos += end;
        }
    }
    parts
}

/// Either a merged static run or an interpolation, ready for lowering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece<'a> {
    Static(String),
    Interpolation(&'a str),
}

/// Merge consecutive static parts so an escaped marker never splits the
/// text around it.
pub fn coalesce(parts: Vec<TextPart<'_>>) -> Vec<Piece<'_>> {
    let mut out: Vec<Piece<'_>> = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            TextPart::Static(s) => match out.last_mut() {
                Some(Piece::Static(prev)) => prev.push_str(s),
                _ => out.push(Piece::Static(s.to_string())),
            },
            TextPart::Interpolation(code) => out.push(Piece::Interpolation(code)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_lone_hash_and_unterminated_marker() {
        assert_eq!(split("a#b"), vec![TextPart::Static("a#b")]);
        assert_eq!(split("x #{oops"), vec![TextPart::Static("x #{oops")]);
    }

    #[test]
    fn split_reads_code_up_to_first_brace() {
        assert_eq!(
            split("#{a{b}c}"),
            vec![TextPart::Interpolation("a{b"), TextPart::Static("c}")]
        );
    }

    #[test]
    fn split_unescapes_marker() {
        assert_eq!(
            split(r"a\#{x}b"),
            vec![TextPart::Static("a"), TextPart::Static("#{x}"), TextPart::Static("b")]
        );
    }

    #[test]
    fn split_keeps_multibyte_characters_intact() {
        assert_eq!(
            split("é#{x}ü"),
            vec![TextPart::Static("é"), TextPart::Interpolation("x"), TextPart::Static("ü")]
        );
    }
}
