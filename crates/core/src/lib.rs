#![deny(missing_docs)]
//! Folio core: frontmatter parsing, markdown rendering, and excerpt
//! derivation for the site's content pipeline.

/// Plain-text excerpt derivation.
pub mod excerpt;
/// Fenced code block detection and rewriting.
pub mod fence;
/// Frontmatter header splitting and parsing.
pub mod frontmatter;
/// Markdown-subset to HTML rendering.
pub mod markdown;

pub use excerpt::{excerpt, strip_markdown};
pub use frontmatter::{Frontmatter, FrontmatterValue, ParsedDocument, parse_document};
pub use markdown::render_markdown;

pub use fence::{fence_info, is_closing_fence, rewrite_code_fences};
