//! Batch compilation of many documents in parallel.

use crate::post::{CompileOptions, Post, compile_post};
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Input for batch compilation, one source document.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Post identifier, typically the source file stem.
    pub id: String,
    /// Raw document contents.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Compiled post (present on success).
    pub post: Option<Post>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Statistics for one batch run.
#[derive(Debug, Clone)]
pub struct BatchStats {
    /// Total number of documents submitted.
    pub total: u32,
    /// Number of successfully compiled documents.
    pub succeeded: u32,
    /// Number of failed documents.
    pub failed: u32,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch compilation.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to the global Rayon pool.
    pub max_threads: Option<usize>,
    /// Whether to continue past failing documents. Defaults to true.
    pub continue_on_error: Option<bool>,
    /// Compile options applied to every document.
    pub compile: Option<CompileOptions>,
}

/// Result of a batch run: per-document results in input order plus
/// statistics.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Individual results for each input document.
    pub results: Vec<BatchResult>,
    /// Run statistics.
    pub stats: BatchStats,
}

/// Compiles every input document, in parallel by default.
///
/// With `continue_on_error` unset or true all documents are processed and
/// failures are reported per document. When it is false, processing is
/// sequential and stops after the first failure.
pub fn compile_batch(inputs: Vec<BatchInput>, options: Option<BatchOptions>) -> BatchReport {
    let start = Instant::now();
    let opts = options.unwrap_or_default();
    let continue_on_error = opts.continue_on_error.unwrap_or(true);
    let compile = opts.compile.unwrap_or_default();

    let pool = if let Some(max_threads) = opts.max_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .ok()
    } else {
        None
    };

    let total = inputs.len() as u32;
    let succeeded = AtomicU32::new(0);
    let failed = AtomicU32::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        match compile_post(&input.id, &input.source, &compile) {
            Ok(post) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    post: Some(post),
                    error: None,
                }
            }
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                BatchResult {
                    id: input.id,
                    post: None,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    let results: Vec<BatchResult> = if continue_on_error {
        if let Some(pool) = pool {
            pool.install(|| inputs.into_par_iter().map(process_input).collect())
        } else {
            inputs.into_par_iter().map(process_input).collect()
        }
    } else {
        // Stop on first error - sequential processing required
        let mut results = Vec::with_capacity(inputs.len());
        let mut had_error = false;

        for input in inputs {
            if had_error {
                break;
            }
            let result = process_input(input);
            if result.error.is_some() {
                had_error = true;
            }
            results.push(result);
        }
        results
    };

    let elapsed = start.elapsed();

    BatchReport {
        results,
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, source: &str) -> BatchInput {
        BatchInput {
            id: id.to_string(),
            source: source.to_string(),
        }
    }

    #[test]
    fn compiles_every_input() {
        let report = compile_batch(
            vec![
                input("a", "---\ntitle: A\n---\nBody A."),
                input("b", "---\ntitle: B\n---\nBody B."),
                input("c", "---\ntitle: C\n---\nBody C."),
            ],
            None,
        );
        assert_eq!(report.stats.total, 3);
        assert_eq!(report.stats.succeeded, 3);
        assert_eq!(report.stats.failed, 0);
        assert!(report.results.iter().all(|r| r.post.is_some()));
    }

    #[test]
    fn results_keep_input_order() {
        let report = compile_batch(
            vec![
                input("z", "---\ntitle: Z\n---\n."),
                input("a", "---\ntitle: A\n---\n."),
                input("m", "---\ntitle: M\n---\n."),
            ],
            None,
        );
        let order: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, ["z", "a", "m"]);
    }

    #[test]
    fn failures_are_reported_per_document() {
        let report = compile_batch(
            vec![
                input("good", "---\ntitle: Good\n---\nBody."),
                input("bad", "no title anywhere"),
            ],
            None,
        );
        assert_eq!(report.stats.succeeded, 1);
        assert_eq!(report.stats.failed, 1);

        let bad = &report.results[1];
        assert!(bad.post.is_none());
        assert_eq!(bad.error.as_deref(), Some("Missing title in bad"));
    }

    #[test]
    fn stops_after_first_failure_when_asked() {
        let report = compile_batch(
            vec![
                input("bad", "no title"),
                input("good", "---\ntitle: G\n---\n."),
            ],
            Some(BatchOptions {
                continue_on_error: Some(false),
                ..BatchOptions::default()
            }),
        );
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(report.stats.succeeded, 0);
    }

    #[test]
    fn respects_thread_limit() {
        let report = compile_batch(
            vec![
                input("a", "---\ntitle: A\n---\n."),
                input("b", "---\ntitle: B\n---\n."),
            ],
            Some(BatchOptions {
                max_threads: Some(1),
                ..BatchOptions::default()
            }),
        );
        assert_eq!(report.stats.succeeded, 2);
    }

    #[test]
    fn compile_options_reach_every_document() {
        let report = compile_batch(
            vec![input(
                "a",
                "---\ntitle: A\n---\nThis is a long sentence that exceeds the limit",
            )],
            Some(BatchOptions {
                compile: Some(CompileOptions {
                    excerpt_max_length: 10,
                }),
                ..BatchOptions::default()
            }),
        );
        let post = report.results[0].post.as_ref().unwrap();
        assert_eq!(post.excerpt, "This is a…");
    }

    #[test]
    fn empty_batch_reports_zero_totals() {
        let report = compile_batch(Vec::new(), None);
        assert_eq!(report.stats.total, 0);
        assert_eq!(report.stats.succeeded, 0);
        assert_eq!(report.stats.failed, 0);
        assert!(report.results.is_empty());
    }
}
