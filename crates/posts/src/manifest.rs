//! Loading documents from disk and building the posts manifest.
//!
//! The manifest is the single JSON artifact the front end fetches. It is a
//! top-level array of posts so the client can consume it without unwrapping.

use crate::batch::{BatchInput, BatchOptions, compile_batch};
use crate::collection;
use crate::error::ManifestError;
use crate::post::Post;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// The manifest the front end fetches as `posts.json`.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Posts in display order.
    pub posts: Vec<Post>,
}

impl Manifest {
    /// Builds a manifest from compiled posts, sorting them for display.
    pub fn from_posts(mut posts: Vec<Post>) -> Self {
        collection::sort_posts(&mut posts);
        Self { posts }
    }

    /// Serializes the manifest as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(&self.posts)?)
    }
}

/// Reads every `*.md` document under `dir`. Ids are the file stems and the
/// returned inputs are sorted by id.
pub fn load_documents(dir: &Path) -> Result<Vec<BatchInput>, ManifestError> {
    let entries = fs::read_dir(dir).map_err(|source| ManifestError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(OsStr::to_str) != Some("md") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };
        let id = id.to_string();
        let source = fs::read_to_string(&path).map_err(|source| ManifestError::ReadFile {
            path: path.clone(),
            source,
        })?;
        inputs.push(BatchInput { id, source });
    }

    inputs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(inputs)
}

/// Compiles every document under `dir` into a manifest. Documents that fail
/// to compile are skipped with a warning so one bad file never takes down
/// the whole build.
pub fn build_manifest(
    dir: &Path,
    options: Option<BatchOptions>,
) -> Result<Manifest, ManifestError> {
    let inputs = load_documents(dir)?;
    let report = compile_batch(inputs, options);

    let mut posts = Vec::with_capacity(report.results.len());
    for result in report.results {
        match result.post {
            Some(post) => posts.push(post),
            None => {
                let reason = result.error.unwrap_or_else(|| "unknown error".to_string());
                log::warn!("Skipping {}: {reason}", result.id);
            }
        }
    }

    Ok(Manifest::from_posts(posts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::{CompileOptions, compile_post};

    fn write_doc(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn loads_markdown_files_sorted_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(dir.path(), "b.md", "two");
        write_doc(dir.path(), "a.md", "one");
        write_doc(dir.path(), "notes.txt", "ignored");

        let inputs = load_documents(dir.path()).unwrap();
        let ids: Vec<&str> = inputs.iter().map(|input| input.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(inputs[0].source, "one");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let err = load_documents(&missing).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read directory"));
    }

    #[test]
    fn builds_sorted_manifest_and_skips_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "late.md",
            "---\ntitle: Late\norder: 2\n---\nLate body.",
        );
        write_doc(
            dir.path(),
            "early.md",
            "---\ntitle: Early\norder: 1\n---\nEarly body.",
        );
        write_doc(dir.path(), "broken.md", "no title at all");

        let manifest = build_manifest(dir.path(), None).unwrap();
        let ids: Vec<&str> = manifest.posts.iter().map(|post| post.id.as_str()).collect();
        assert_eq!(ids, ["early", "late"]);
    }

    #[test]
    fn from_posts_sorts_for_display() {
        let second = compile_post(
            "b",
            "---\ntitle: B\norder: 2\n---\n.",
            &CompileOptions::default(),
        )
        .unwrap();
        let first = compile_post(
            "a",
            "---\ntitle: A\norder: 1\n---\n.",
            &CompileOptions::default(),
        )
        .unwrap();

        let manifest = Manifest::from_posts(vec![second, first]);
        assert_eq!(manifest.posts[0].id, "a");
        assert_eq!(manifest.posts[1].id, "b");
    }

    #[test]
    fn to_json_is_a_pretty_printed_array() {
        let post = compile_post("a", "---\ntitle: A\n---\nBody.", &CompileOptions::default())
            .unwrap();
        let manifest = Manifest::from_posts(vec![post]);
        insta::assert_snapshot!(manifest.to_json().unwrap(), @r#"
        [
          {
            "id": "a",
            "title": "A",
            "order": 0,
            "tags": [],
            "excerpt": "Body.",
            "html": "<p>Body.</p>"
          }
        ]
        "#);
    }

    #[test]
    fn empty_manifest_is_an_empty_array() {
        assert_eq!(Manifest::default().to_json().unwrap(), "[]");
    }
}
