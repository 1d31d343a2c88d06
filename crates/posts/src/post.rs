//! Compiling one Markdown document into a renderable post.

use folio_core::{FrontmatterValue, parse_document, render_markdown};
use serde::{Deserialize, Serialize};

use crate::error::PostError;

/// Default maximum length, in characters, for excerpts derived from the body.
pub const DEFAULT_EXCERPT_MAX_LENGTH: usize = 160;

/// A compiled post, shaped the way the front end consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Stable identifier, from frontmatter or the source file stem.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Sort weight, lowest first.
    pub order: i64,
    /// Display date string, rendered as-is by the views.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Author byline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Tags for filtering.
    pub tags: Vec<String>,
    /// Preview line for cards and search.
    pub excerpt: String,
    /// Cover image path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Alt text for the cover image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_alt: Option<String>,
    /// Rendered HTML body.
    pub html: String,
}

/// Options for [`compile_post`].
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Maximum length of a derived excerpt, in characters.
    pub excerpt_max_length: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            excerpt_max_length: DEFAULT_EXCERPT_MAX_LENGTH,
        }
    }
}

/// Compiles one Markdown document into a [`Post`].
///
/// `source_id` (typically the file stem) is the fallback id when the
/// frontmatter does not carry one. Frontmatter wins for every field it sets;
/// the body supplies the rendered HTML and, when no `excerpt` key is present,
/// the derived excerpt. Empty scalar values count as unset.
pub fn compile_post(
    source_id: &str,
    source: &str,
    options: &CompileOptions,
) -> Result<Post, PostError> {
    let doc = parse_document(source);
    let fm = &doc.frontmatter;

    let id = present(fm.scalar("id")).unwrap_or(source_id).to_string();
    let title = present(fm.scalar("title"))
        .ok_or_else(|| PostError::MissingTitle { id: id.clone() })?
        .to_string();
    let order = parse_order(&id, fm.scalar("order"));
    let tags = match fm.get("tags") {
        Some(FrontmatterValue::List(items)) => items.clone(),
        Some(FrontmatterValue::Scalar(value)) if !value.is_empty() => vec![value.clone()],
        _ => Vec::new(),
    };
    let excerpt = match present(fm.scalar("excerpt")) {
        Some(value) => value.to_string(),
        None => folio_core::excerpt(doc.body, options.excerpt_max_length),
    };

    Ok(Post {
        id,
        title,
        order,
        date: present(fm.scalar("date")).map(str::to_string),
        author: present(fm.scalar("author")).map(str::to_string),
        tags,
        excerpt,
        cover: present(fm.scalar("cover")).map(str::to_string),
        cover_alt: present(fm.scalar("coverAlt")).map(str::to_string),
        html: render_markdown(doc.body),
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_order(id: &str, raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    match raw.parse::<i64>() {
        Ok(order) => order,
        Err(_) => {
            log::warn!("Ignoring unparseable order {raw:?} in {id}");
            0
        }
    }
}
