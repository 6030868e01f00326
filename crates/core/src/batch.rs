//! Parallel interpolation rewrite over many documents.

use crate::error::{ParseWarning, TransformError};
use crate::htm::{HtmOptions, transform_jsx_to_htm_with_options};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A single document to rewrite.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markup text.
    pub source: String,
}

impl BatchInput {
    /// Creates an input from an identifier and its source text.
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }
}

/// Options for batch processing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to rayon's global pool.
    #[serde(alias = "maxThreads")]
    pub max_threads: Option<usize>,
    /// Rewrite options applied to every document.
    pub htm: HtmOptions,
}

/// Rewrite result for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    /// Identifier matching the input.
    pub id: String,
    /// Rewritten text.
    pub code: String,
    /// Number of markers rewritten.
    pub replacements: usize,
    /// Number of fenced blocks copied through.
    pub fenced_blocks: usize,
    /// Non-fatal findings for this document.
    pub warnings: Vec<ParseWarning>,
}

/// Statistics for batch processing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Total number of documents processed.
    pub total: usize,
    /// Documents with at least one marker rewritten.
    pub rewritten: usize,
    /// Documents that produced warnings.
    pub with_warnings: usize,
    /// Total processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// All results, in input order, plus statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    /// Per-document results.
    pub results: Vec<BatchItem>,
    /// Processing statistics.
    pub stats: BatchStats,
}

/// Rewrites every input in parallel.
///
/// Fails only when the options are invalid or the thread pool cannot be built.
pub fn transform_batch(
    inputs: Vec<BatchInput>,
    options: &BatchOptions,
) -> Result<BatchResult, TransformError> {
    options.htm.validate()?;
    let start = Instant::now();

    let pool = match options.max_threads {
        Some(max_threads) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(max_threads)
                .build()
                .map_err(|e| TransformError::ThreadPool(e.to_string()))?,
        ),
        None => None,
    };

    let process_input = |input: BatchInput| -> BatchItem {
        let output = transform_jsx_to_htm_with_options(&input.source, &options.htm);
        let (replacements, fenced_blocks) = (output.replacements, output.fenced_blocks);
        let warnings = output.diagnostics.warnings;
        let code = output.code.into_owned();
        BatchItem {
            id: input.id,
            code,
            replacements,
            fenced_blocks,
            warnings,
        }
    };

    let total = inputs.len();
    let results: Vec<BatchItem> = if let Some(pool) = pool {
        pool.install(|| inputs.into_par_iter().map(process_input).collect())
    } else {
        inputs.into_par_iter().map(process_input).collect()
    };

    let stats = BatchStats {
        total,
        rewritten: results.iter().filter(|r| r.replacements > 0).count(),
        with_warnings: results.iter().filter(|r| !r.warnings.is_empty()).count(),
        processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    log::debug!(
        "batch rewrite: {} document(s), {} rewritten, {} with warnings",
        stats.total,
        stats.rewritten,
        stats.with_warnings
    );

    Ok(BatchResult { results, stats })
}
