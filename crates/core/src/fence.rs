//! Fenced code block detection and rewriting.
//!
//! The dialect recognizes one fence form: a line starting with three
//! backticks, optionally carrying a language id, closed by a line that is
//! exactly three backticks. Fences must run first in the render pipeline so
//! their contents are emitted escaped before any inline pass can touch them.

/// Returns the trimmed info string when `line` opens (or closes) a fence.
///
/// `Some("")` means a bare fence line, `Some("js")` a tagged opener,
/// `None` a regular content line.
pub fn fence_info(line: &str) -> Option<&str> {
    line.trim_end_matches('\r')
        .strip_prefix("```")
        .map(str::trim)
}

/// True when `line` is a bare closing fence. Info strings and trailing
/// whitespace never close; only a trailing `\r` is tolerated.
pub fn is_closing_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "```"
}

/// Rewrites every fenced code block to `<pre><code>` markup, escaping `&`,
/// `<`, `>` in the contents. A fence that never closes passes through as
/// literal text, opener included.
pub fn rewrite_code_fences(input: &str) -> String {
    let lines: Vec<&str> = input.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        if let Some(info) = fence_info(line)
            && let Some(close) = find_closing_fence(&lines, index + 1)
        {
            let content = lines[index + 1..close].join("\n");
            out.push(render_fence_block(language_id(info), &content));
            index = close + 1;
        } else {
            out.push(line.to_string());
            index += 1;
        }
    }

    out.join("\n")
}

fn find_closing_fence(lines: &[&str], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&candidate| is_closing_fence(lines[candidate]))
}

/// First whitespace-separated token of the info string, if any.
fn language_id(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

fn render_fence_block(language: Option<&str>, content: &str) -> String {
    let escaped = html_escape::encode_text(content);
    match language {
        Some(lang) => format!(
            "<pre class=\"language-{lang}\"><code class=\"language-{lang}\">{escaped}</code></pre>"
        ),
        None => format!("<pre><code>{escaped}</code></pre>"),
    }
}
