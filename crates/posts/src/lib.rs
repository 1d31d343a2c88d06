#![deny(missing_docs)]
//! Folio posts: compiling Markdown documents into posts, querying them, and
//! building the JSON manifest the site fetches.

/// Batch compilation of many documents in parallel.
pub mod batch;
/// Queries over compiled posts.
pub mod collection;
/// Error types for compilation and manifest building.
pub mod error;
/// Document loading and manifest building.
pub mod manifest;
/// Compiling one document into a post.
pub mod post;

pub use batch::{BatchInput, BatchOptions, BatchReport, BatchResult, BatchStats, compile_batch};
pub use collection::{
    LATEST_POSTS_COUNT, POSTS_PER_PAGE, all_tags, latest, page, page_count, search, sort_posts,
    with_tag,
};
pub use error::{ManifestError, PostError};
pub use manifest::{Manifest, build_manifest, load_documents};
pub use post::{CompileOptions, DEFAULT_EXCERPT_MAX_LENGTH, Post, compile_post};
