//! Plain-text excerpt derivation.
//!
//! Turns a Markdown body into a single collapsed line of prose, then cuts it
//! at a word boundary. Code blocks and inline code are dropped outright
//! since fragments of code read poorly in a preview line.

use crate::fence;
use crate::markdown;

/// Derives a plain-text excerpt of at most `max_length` characters from a
/// Markdown body. Longer text is cut back to the last space inside the
/// window and an ellipsis is appended.
pub fn excerpt(body: &str, max_length: usize) -> String {
    let text = strip_markdown(body);
    if text.chars().count() <= max_length {
        return text;
    }

    let mut cut: String = text.chars().take(max_length).collect();
    if let Some(space) = cut.rfind(' ') {
        cut.truncate(space);
    }
    let mut out = cut.trim_end().to_string();
    out.push('…');
    out
}

/// Reduces a Markdown body to plain text: fenced code and inline code are
/// removed, heading and list markers stripped, emphasis unwrapped, links
/// replaced by their label, and all whitespace collapsed to single spaces.
pub fn strip_markdown(body: &str) -> String {
    let text = strip_code_fences(body);
    let text = strip_inline_code(&text);
    let text = strip_line_markers(&text);
    let text = markdown::rewrite_bold_spans(&text, "", "");
    let text = markdown::rewrite_italic_spans(&text, "", "");
    let text = unwrap_links(&text);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops fenced blocks including their fence lines. An unterminated fence
/// swallows everything after it.
fn strip_code_fences(body: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in body.split('\n') {
        if in_fence {
            if fence::is_closing_fence(line) {
                in_fence = false;
            }
        } else if fence::fence_info(line).is_some() {
            in_fence = true;
        } else {
            kept.push(line);
        }
    }

    kept.join("\n")
}

/// Drops `` `span` `` contents entirely, using the same pairing rules as the
/// renderer so both agree on what counts as a span.
fn strip_inline_code(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(close) if close > 0 => {
                rest = &after[close + 1..];
            }
            _ => {
                out.push('`');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn strip_line_markers(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let line = line.trim_end_matches('\r');
            for marker in ["### ", "## ", "# ", "- ", "* "] {
                if let Some(rest) = line.strip_prefix(marker) {
                    return rest;
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites `[label](url)` to `label`. Both label and url must be
/// non-empty; anything else stays literal.
fn unwrap_links(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        let candidate = &rest[open..];
        if let Some(label_end) = candidate.find(']')
            && label_end > 1
            && candidate[label_end + 1..].starts_with('(')
            && let Some(url_len) = candidate[label_end + 2..].find(')')
            && url_len > 0
        {
            out.push_str(&rest[..open]);
            out.push_str(&candidate[1..label_end]);
            rest = &candidate[label_end + 2 + url_len + 1..];
        } else {
            out.push_str(&rest[..=open]);
            rest = &rest[open + 1..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_comes_back_unchanged() {
        assert_eq!(excerpt("Hello world", 50), "Hello world");
        assert_eq!(excerpt("Hello", 5), "Hello");
    }

    #[test]
    fn cuts_at_word_boundary_with_ellipsis() {
        assert_eq!(
            excerpt("This is a long sentence that exceeds the limit", 10),
            "This is a…"
        );
    }

    #[test]
    fn hard_cut_when_window_has_no_space() {
        assert_eq!(excerpt("Supercalifragilistic", 5), "Super…");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(excerpt("こんにちは世界 こんにちは", 8), "こんにちは世界…");
    }

    #[test]
    fn strips_fenced_code_and_contents() {
        assert_eq!(
            strip_markdown("Intro.\n\n```js\nlet x = 1;\n```\n\nOutro."),
            "Intro. Outro."
        );
    }

    #[test]
    fn unterminated_fence_swallows_the_rest() {
        assert_eq!(strip_markdown("Text.\n```js\nnever closed"), "Text.");
    }

    #[test]
    fn drops_inline_code_spans() {
        assert_eq!(strip_markdown("run `cargo doc` today"), "run today");
    }

    #[test]
    fn unpaired_backtick_stays() {
        assert_eq!(strip_markdown("a ` b"), "a ` b");
    }

    #[test]
    fn strips_heading_and_list_markers() {
        assert_eq!(
            strip_markdown("# Title\n## Sub\n- one\n* two"),
            "Title Sub one two"
        );
    }

    #[test]
    fn unwraps_emphasis() {
        assert_eq!(
            strip_markdown("Some **bold** and *italic* text"),
            "Some bold and italic text"
        );
    }

    #[test]
    fn links_reduce_to_their_label() {
        assert_eq!(
            strip_markdown("See [the docs](https://example.com) now"),
            "See the docs now"
        );
    }

    #[test]
    fn malformed_links_stay_literal() {
        assert_eq!(strip_markdown("a [b] c"), "a [b] c");
        assert_eq!(strip_markdown("[](x)"), "[](x)");
        assert_eq!(strip_markdown("[a]()"), "[a]()");
    }

    #[test]
    fn collapses_all_whitespace_runs() {
        assert_eq!(strip_markdown("one\n\ntwo   three\t four"), "one two three four");
    }

    #[test]
    fn empty_body_gives_empty_excerpt() {
        assert_eq!(excerpt("", 160), "");
    }

    #[test]
    fn full_document_excerpt() {
        let body = "# Post\n\nFirst paragraph with **weight**.\n\n```\ncode\n```\n\nSecond [link](https://x.dev) paragraph.";
        assert_eq!(
            strip_markdown(body),
            "Post First paragraph with weight. Second link paragraph."
        );
        assert_eq!(excerpt(body, 22), "Post First paragraph…");
    }
}
