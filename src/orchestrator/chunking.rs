// src/orchestrator/chunking.rs
//! Splitting a topic list into fixed-size batches.

use std::ops::Range;

/// Index ranges of consecutive batches covering `total` topics.
///
/// Every batch has `batch_size` topics except possibly the last. A
/// `batch_size` of zero is treated as one.
pub fn plan_chunks(total: usize, batch_size: usize) -> Vec<Range<usize>> {
    let batch_size = batch_size.max(1);
    (0..total)
        .step_by(batch_size)
        .map(|start| start..(start + batch_size).min(total))
        .collect()
}
