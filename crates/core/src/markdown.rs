//! Markdown-subset to HTML rendering.
//!
//! [`render_markdown`] chains nine whole-string rewrites in a fixed order:
//! fenced code blocks, inline code, headings, bold, italics, lists, then a
//! mask / paragraph-wrap / unmask sequence that keeps `<pre>` blocks out of
//! paragraph handling. Each pass is a pure `&str -> String` function, so the
//! pipeline is just function composition and every step can be tested alone.
//!
//! Passes after the first treat already-emitted `<pre>...</pre>` regions as
//! opaque so heading, list, and emphasis markers inside rendered code
//! survive untouched.

use crate::fence;

/// Renders the supported Markdown subset to an HTML fragment.
pub fn render_markdown(input: &str) -> String {
    let html = fence::rewrite_code_fences(input);
    let html = rewrite_inline_code(&html);
    let html = rewrite_headings(&html);
    let html = rewrite_bold(&html);
    let html = rewrite_italics(&html);
    let html = rewrite_lists(&html);
    let (html, pre_blocks) = set_aside_pre_blocks(&html);
    let html = wrap_paragraphs(&html);
    restore_pre_blocks(html, &pre_blocks)
}

/// Applies `rewrite` to every stretch of `input` that is not inside a
/// `<pre>...</pre>` region, passing those regions through verbatim.
fn rewrite_outside_pre(input: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;

    while let Some(rel) = input[cursor..].find("<pre") {
        let open = cursor + rel;
        let Some(end_rel) = input[open..].find("</pre>") else {
            break;
        };
        let close = open + end_rel + "</pre>".len();
        out.push_str(&rewrite(&input[cursor..open]));
        out.push_str(&input[open..close]);
        cursor = close;
    }

    out.push_str(&rewrite(&input[cursor..]));
    out
}

/// Escapes `&`, `<`, `>`, `"`, `'` for inline code contents.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn rewrite_inline_code(input: &str) -> String {
    if !input.contains('`') {
        return input.to_string();
    }
    rewrite_outside_pre(input, |text| {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find('`') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('`') {
                Some(close) if close > 0 => {
                    out.push_str("<code>");
                    out.push_str(&escape_html(&after[..close]));
                    out.push_str("</code>");
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
    })
}

fn rewrite_headings(input: &str) -> String {
    if !input.contains('#') {
        return input.to_string();
    }
    rewrite_outside_pre(input, |text| {
        text.split('\n')
            .map(heading_line)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Longest marker first so `###` is not read as `#` + `##`.
fn heading_line(line: &str) -> String {
    let content = line.trim_end_matches('\r');
    for (marker, tag) in [("### ", "h3"), ("## ", "h2"), ("# ", "h1")] {
        if let Some(rest) = content.strip_prefix(marker)
            && !rest.is_empty()
        {
            return format!("<{tag}>{rest}</{tag}>");
        }
    }
    line.to_string()
}

fn rewrite_bold(input: &str) -> String {
    if !input.contains("**") {
        return input.to_string();
    }
    rewrite_outside_pre(input, |text| {
        rewrite_bold_spans(text, "<strong>", "</strong>")
    })
}

/// Replaces `**text**` spans with `open_tag` text `close_tag`. Spans never
/// cross a line and never wrap an empty string; an unpaired `**` stays
/// literal. The excerpt stripper reuses this with empty tags.
pub(crate) fn rewrite_bold_spans(text: &str, open_tag: &str, close_tag: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("**") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let line_end = after.find('\n').unwrap_or(after.len());
        match after[..line_end].find("**") {
            Some(close) if close > 0 => {
                out.push_str(open_tag);
                out.push_str(&after[..close]);
                out.push_str(close_tag);
                rest = &after[close + 2..];
            }
            _ => {
                out.push_str("**");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

fn rewrite_italics(input: &str) -> String {
    if !input.contains('*') {
        return input.to_string();
    }
    rewrite_outside_pre(input, |text| rewrite_italic_spans(text, "<em>", "</em>"))
}

/// Replaces `*text*` spans with `open_tag` text `close_tag`.
///
/// A `*` only opens when not adjacent to another `*`, the span content must
/// be non-empty and free of `*` and newlines, and the closing `*` must not
/// be followed by `*`. Bold runs first, so any `**` still present here is an
/// unpaired leftover that must stay literal.
pub(crate) fn rewrite_italic_spans(text: &str, open_tag: &str, close_tag: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut flushed = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        let adjacent =
            (i > 0 && bytes[i - 1] == b'*') || (i + 1 < bytes.len() && bytes[i + 1] == b'*');
        if adjacent {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < bytes.len() && bytes[j] != b'*' && bytes[j] != b'\n' {
            j += 1;
        }
        let closes = j > i + 1
            && j < bytes.len()
            && bytes[j] == b'*'
            && (j + 1 >= bytes.len() || bytes[j + 1] != b'*');
        if closes {
            out.push_str(&text[flushed..i]);
            out.push_str(open_tag);
            out.push_str(&text[i + 1..j]);
            out.push_str(close_tag);
            flushed = j + 1;
            i = j + 1;
        } else {
            i += 1;
        }
    }

    out.push_str(&text[flushed..]);
    out
}

fn rewrite_lists(input: &str) -> String {
    rewrite_outside_pre(input, |text| {
        let mut out: Vec<String> = Vec::new();
        let mut items: Vec<String> = Vec::new();
        for line in text.split('\n') {
            if let Some(item) = list_item_text(line) {
                items.push(format!("<li>{item}</li>"));
            } else {
                flush_list(&mut items, &mut out);
                out.push(line.to_string());
            }
        }
        flush_list(&mut items, &mut out);
        out.join("\n")
    })
}

fn flush_list(items: &mut Vec<String>, out: &mut Vec<String>) {
    if !items.is_empty() {
        out.push(format!("<ul>{}</ul>", items.join("")));
        items.clear();
    }
}

fn list_item_text(line: &str) -> Option<&str> {
    let line = line.trim_end_matches('\r');
    let rest = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))?;
    (!rest.is_empty()).then_some(rest)
}

struct PreBlock {
    token: String,
    html: String,
}

/// Swaps every `<pre>...</pre>` region for a `<codefence:N>` placeholder so
/// paragraph wrapping never sees multi-line HTML. Numbering is local to the
/// call and starts past any literal `<codefence:` text, so the tokens never
/// collide with body text that spells one out.
fn set_aside_pre_blocks(input: &str) -> (String, Vec<PreBlock>) {
    let mut out = String::with_capacity(input.len());
    let mut blocks: Vec<PreBlock> = Vec::new();
    let base = placeholder_base(input);
    let mut cursor = 0;

    while let Some(rel) = input[cursor..].find("<pre") {
        let open = cursor + rel;
        let Some(end_rel) = input[open..].find("</pre>") else {
            break;
        };
        let close = open + end_rel + "</pre>".len();
        out.push_str(&input[cursor..open]);
        let token = format!("<codefence:{}>", base + blocks.len());
        out.push_str(&token);
        blocks.push(PreBlock {
            token,
            html: input[open..close].to_string(),
        });
        cursor = close;
    }

    out.push_str(&input[cursor..]);
    (out, blocks)
}

/// Smallest starting number whose generated tokens cannot already appear in
/// `input`. Fence contents are HTML-escaped by the time this runs, so only
/// plain body text can carry a literal `<codefence:` prefix.
fn placeholder_base(input: &str) -> usize {
    let mut base = 0;
    for (idx, marker) in input.match_indices("<codefence:") {
        let digits: String = input[idx + marker.len()..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if let Ok(n) = digits.parse::<usize>() {
            base = base.max(n + 1);
        }
    }
    base
}

fn restore_pre_blocks(html: String, blocks: &[PreBlock]) -> String {
    let mut html = html;
    for block in blocks {
        html = html.replacen(&block.token, &block.html, 1);
    }
    html
}

/// Prefixes that mark a block as already block-level. `<img` and `<code`
/// are left open so both bare tags and attribute forms match; placeholder
/// tokens start with `<code` and pass through here.
const BLOCK_LEVEL_PREFIXES: [&str; 9] = [
    "<h1>",
    "<h2>",
    "<h3>",
    "<ul>",
    "<p>",
    "<blockquote>",
    "<table>",
    "<img",
    "<code",
];

fn wrap_paragraphs(input: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in input.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
        .iter()
        .map(|block| {
            let block = block.trim();
            if is_block_level(block) {
                block.to_string()
            } else {
                format!("<p>{}</p>", block.replace('\n', "<br>"))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_block_level(block: &str) -> bool {
    BLOCK_LEVEL_PREFIXES
        .iter()
        .any(|prefix| block.starts_with(prefix))
}
