//! Documentation reformatting for annotation comments.
//!
//! Meta-model documentation is Markdown with a few protocol quirks: zero-width
//! spaces used to break up `*/` sequences, and `@sample` tags that LuaLS would
//! otherwise read as an annotation.

const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Strip characters that must not reach the comment text.
pub fn sanitize(raw: &str) -> String {
    raw.replace(ZERO_WIDTH_SPACE, "")
        .replace("@sample", "\\@sample")
}

/// Turn a raw doc string into `--- ` prefixed lines, each ending in `\n`.
///
/// Blank documentation yields an empty string.
pub fn reformat(raw: &str) -> String {
    reformat_indented(raw, "")
}

/// Same as [`reformat`], with every line preceded by `indent`.
pub fn reformat_indented(raw: &str, indent: &str) -> String {
    let text = sanitize(raw);
    if text.trim().is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len() + 8);
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        out.push_str(indent);
        if line.trim().is_empty() {
            out.push_str("---");
        } else {
            out.push_str("--- ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reformat_multiline() {
        let docs = reformat("The hover request.\n\nSee `Hover`.");
        assert_eq!(docs, "--- The hover request.\n---\n--- See `Hover`.\n");
    }

    #[test]
    fn test_reformat_drops_carriage_returns() {
        assert_eq!(reformat("a\r\nb\r\n"), "--- a\n--- b\n---\n");
    }

    #[test]
    fn test_reformat_sanitizes() {
        let docs = reformat("Use /*\u{200B}*/ here.\n@sample `foo`");
        assert_eq!(docs, "--- Use /**/ here.\n--- \\@sample `foo`\n");
    }

    #[test]
    fn test_reformat_blank_is_empty() {
        assert_eq!(reformat(""), "");
        assert_eq!(reformat("  \n "), "");
    }

    #[test]
    fn test_reformat_indented() {
        assert_eq!(
            reformat_indented("First.\n\nSecond.", "  "),
            "  --- First.\n  ---\n  --- Second.\n"
        );
    }

    #[test]
    fn test_blank_lines_have_no_trailing_whitespace() {
        let docs = reformat("first\n   \n\t\nlast");
        assert_eq!(docs, "--- first\n---\n---\n--- last\n");
    }

    #[test]
    fn test_markdown_hard_breaks_are_kept() {
        let docs = reformat("line one  \r\nline two\n  indented");
        assert_eq!(docs, "--- line one  \n--- line two\n---   indented\n");
    }
}
