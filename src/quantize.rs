//! Time-bucket quantization: merging consecutive blocks into interval runs.

use tracing::debug;

use crate::error::{Error, Result};
use crate::recording::Block;

/// Merge consecutive blocks whose first word starts in the same
/// `floor(start / interval_ms)` bucket.
///
/// Bucket membership is decided strictly left to right, anchored on the
/// *first* block of each run; a later block never re-buckets a run already
/// in progress. Empty blocks are filtered out before bucketing.
///
/// Fails with [`Error::EmptyInput`] when no non-empty blocks remain.
pub fn quantize_blocks(blocks: &[Block], interval_ms: i64) -> Result<Vec<Block>> {
    let mut remaining = blocks.iter().filter(|b| !b.is_empty());

    let first = remaining.next().ok_or(Error::EmptyInput)?;
    let mut run = first.clone();
    let mut run_bucket = first.words[0].start_ms.div_euclid(interval_ms);
    debug!(bucket = run_bucket, interval_ms, "first quantization bucket");

    let mut merged = Vec::new();
    for block in remaining {
        let start_ms = block.words[0].start_ms;
        let bucket = start_ms.div_euclid(interval_ms);
        if bucket == run_bucket {
            run.words.extend(block.words.iter().cloned());
        } else {
            debug!(start_ms, bucket, "quantization run closed");
            merged.push(run);
            run = block.clone();
            run_bucket = bucket;
        }
    }
    merged.push(run);

    Ok(merged)
}
