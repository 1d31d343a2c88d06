//! Frontmatter header splitting and the restricted key/value dialect used by
//! the site's documents.
//!
//! The header is not YAML. It supports exactly what the content needs: scalar
//! strings, inline `[a, b, c]` lists, and block lists written as `- item`
//! lines under a key with an empty value. Everything else (nesting, anchors,
//! typed scalars) is out; numbers and booleans stay strings and coercion is
//! the caller's job.

/// A single frontmatter value: either a scalar string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// A plain string value, surrounding quotes already stripped.
    Scalar(String),
    /// An ordered list of strings.
    List(Vec<String>),
}

impl FrontmatterValue {
    /// Returns the scalar string, or `None` for lists.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            FrontmatterValue::Scalar(value) => Some(value),
            FrontmatterValue::List(_) => None,
        }
    }

    /// Returns the list items, or `None` for scalars.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FrontmatterValue::List(items) => Some(items),
            FrontmatterValue::Scalar(_) => None,
        }
    }
}

/// Parsed frontmatter: an ordered key/value mapping.
///
/// Keys keep first-insertion order; writing an existing key again replaces
/// its value in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, FrontmatterValue)>,
}

impl Frontmatter {
    /// True when the header declared no keys (or there was no header).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Looks up a scalar value by key; lists and absent keys yield `None`.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FrontmatterValue::as_scalar)
    }

    /// Looks up a list value by key; scalars and absent keys yield `None`.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FrontmatterValue::as_list)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrontmatterValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Converts the mapping to a JSON object (scalars as strings, lists as
    /// string arrays) for serialization boundaries.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.entries {
            let json = match value {
                FrontmatterValue::Scalar(scalar) => serde_json::Value::String(scalar.clone()),
                FrontmatterValue::List(items) => serde_json::Value::Array(
                    items
                        .iter()
                        .map(|item| serde_json::Value::String(item.clone()))
                        .collect(),
                ),
            };
            map.insert(key.clone(), json);
        }
        serde_json::Value::Object(map)
    }

    fn insert(&mut self, key: &str, value: FrontmatterValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| existing == key) {
            slot.1 = value;
        } else {
            self.entries.push((key.to_string(), value));
        }
    }

    fn push_list_item(&mut self, key: &str, item: String) {
        if let Some((_, FrontmatterValue::List(items))) = self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
        {
            items.push(item);
        }
    }
}

/// A document split into its frontmatter mapping and body text.
#[derive(Debug)]
pub struct ParsedDocument<'a> {
    /// Parsed header mapping; empty when the document has no header.
    pub frontmatter: Frontmatter,
    /// Body text after the closing `---` line, borrowed from the input.
    pub body: &'a str,
}

/// Splits an optional `---`-fenced header off a document and parses it.
///
/// Documents without a leading fence, and documents whose header never
/// closes, come back unchanged with an empty mapping. The parser never
/// fails: for any input the result is a well-formed mapping plus a body.
pub fn parse_document(input: &str) -> ParsedDocument<'_> {
    match find_header_block(input) {
        Some((block, body_start)) => ParsedDocument {
            frontmatter: parse_header_block(block),
            body: &input[body_start..],
        },
        None => ParsedDocument {
            frontmatter: Frontmatter::default(),
            body: input,
        },
    }
}

/// Finds the `---`-fenced header. Returns the raw text between the fences
/// and the byte offset (into the original input) where the body begins.
fn find_header_block(input: &str) -> Option<(&str, usize)> {
    let (text, bom_len) = strip_bom(input);
    let (first_line, header_start) = next_line(text, 0)?;
    if !is_header_fence(first_line) {
        return None;
    }

    let mut cursor = header_start;
    loop {
        match next_line(text, cursor) {
            Some((line, next_cursor)) => {
                if is_header_fence(line) {
                    let block = &text[header_start..cursor];
                    return Some((block, bom_len + next_cursor));
                }
                cursor = next_cursor;
            }
            None => {
                log::warn!("Unterminated frontmatter header, treating whole document as body");
                return None;
            }
        }
    }
}

fn parse_header_block(block: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::default();
    // Set while the previous key had an empty value; `- ` lines feed it.
    let mut open_list: Option<String> = None;

    for raw_line in block.lines() {
        let line = raw_line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some(item) = line.strip_prefix("- ")
            && let Some(key) = open_list.as_deref()
        {
            frontmatter.push_list_item(key, item.trim().to_string());
            continue;
        }

        let Some(colon) = line.find(':') else {
            log::debug!("Ignoring frontmatter line without a key: {line:?}");
            continue;
        };
        let key = line[..colon].trim();
        let raw_value = line[colon + 1..].trim();

        if let Some(inner) = raw_value
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            frontmatter.insert(key, FrontmatterValue::List(split_inline_list(inner)));
            open_list = None;
        } else if raw_value.is_empty() {
            frontmatter.insert(key, FrontmatterValue::List(Vec::new()));
            open_list = Some(key.to_string());
        } else {
            frontmatter.insert(
                key,
                FrontmatterValue::Scalar(strip_quotes(raw_value).to_string()),
            );
            open_list = None;
        }
    }

    frontmatter
}

fn split_inline_list(inner: &str) -> Vec<String> {
    inner
        .split(',')
        .map(str::trim)
        .map(strip_quotes)
        .filter(|element| !element.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strips one matching pair of surrounding single or double quotes.
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn strip_bom(input: &str) -> (&str, usize) {
    if let Some(stripped) = input.strip_prefix('\u{feff}') {
        (stripped, '\u{feff}'.len_utf8())
    } else {
        (input, 0)
    }
}

fn next_line(input: &str, start: usize) -> Option<(&str, usize)> {
    if start >= input.len() {
        return None;
    }

    let bytes = &input.as_bytes()[start..];
    if let Some(pos) = bytes.iter().position(|b| *b == b'\n') {
        let line_end = start + pos;
        Some((&input[start..line_end], line_end + 1))
    } else {
        Some((&input[start..], input.len()))
    }
}

fn is_header_fence(line: &str) -> bool {
    line.trim_end_matches('\r') == "---"
}
