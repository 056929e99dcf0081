//! Batched segment enrichment.

use crate::config::SegmentConfig;
use crate::oracle::SegmentOracle;
use crate::prompt::{build_prompt, parse_segment_response};
use std::collections::HashMap;
use straits_extract::CanonicalRecord;
use tokio::time::sleep;

/// Fill `segments` for every record with a business summary.
///
/// Records are sent in batches of `config.batch_size`. A failed batch is
/// logged and its records are left as they were; later batches still run.
/// Records are returned in their original order.
pub async fn enrich_segments<O>(
    mut records: Vec<CanonicalRecord>,
    oracle: &O,
    config: &SegmentConfig,
) -> Vec<CanonicalRecord>
where
    O: SegmentOracle + Sync + ?Sized,
{
    let targets: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.business_summary.trim().is_empty())
        .map(|(i, _)| i)
        .collect();

    if targets.is_empty() {
        return records;
    }

    let batch_size = config.batch_size.max(1);
    let batches = targets.len().div_ceil(batch_size);
    tracing::info!(records = targets.len(), batches, "inferring business segments");

    for (n, batch) in targets.chunks(batch_size).enumerate() {
        let prompt = {
            let members: Vec<&CanonicalRecord> = batch.iter().map(|&i| &records[i]).collect();
            build_prompt(&members, config.summary_chars)
        };

        let segments = oracle
            .complete(&prompt)
            .await
            .and_then(|reply| parse_segment_response(&reply));

        match segments {
            Ok(segments) => {
                let filled = apply_segments(&mut records, batch, &segments);
                tracing::debug!(batch = n + 1, filled, "segments applied");
                sleep(config.pause).await;
            }
            Err(e) => {
                tracing::warn!(batch = n + 1, error = %e, "segment batch skipped");
            }
        }
    }

    records
}

fn apply_segments(
    records: &mut [CanonicalRecord],
    batch: &[usize],
    segments: &HashMap<String, String>,
) -> usize {
    let mut filled = 0;
    for &i in batch {
        if let Some(found) = segments.get(&records[i].code) {
            records[i].segments.clone_from(found);
            filled += 1;
        }
    }
    filled
}
