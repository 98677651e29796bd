//! Per-period goal distributions.

use crate::model::{StatDetail, StatValue, detail_value};

/// The provider's fixed period keys. Boundaries nominally overlap (minute 15
/// appears in both `0-15` and `15-30`); that is the upstream convention and is
/// passed through unmodified.
pub const BUCKET_KEYS: [&str; 6] = ["0-15", "15-30", "30-45", "45-60", "60-75", "75-90"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringBuckets {
    /// Counts in `BUCKET_KEYS` order.
    pub counts: [u32; 6],
}

impl ScoringBuckets {
    pub fn get(&self, key: &str) -> Option<u32> {
        BUCKET_KEYS
            .iter()
            .position(|k| *k == key)
            .map(|idx| self.counts[idx])
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Extract the six-bucket goal distribution for a statistic type.
///
/// Returns `None` when the statistic is absent entirely. When present, every
/// bucket resolves to a number: the per-bucket chain is numeric passthrough,
/// object field (`count`/`total`/`all`), string parse, else `0` — the bar
/// visualization needs all buckets finite so the row sums and scales.
pub fn extract(details: &[StatDetail], type_id: u32) -> Option<ScoringBuckets> {
    let value = detail_value(details, type_id)?;
    if matches!(value, StatValue::Missing) {
        return None;
    }

    let mut counts = [0u32; 6];
    if let StatValue::Nested(table) = value {
        for (idx, key) in BUCKET_KEYS.iter().enumerate() {
            counts[idx] = table
                .get(*key)
                .and_then(StatValue::as_count)
                .map(|n| n.max(0.0).round() as u32)
                .unwrap_or(0);
        }
    }
    Some(ScoringBuckets { counts })
}

/// Maximum bucket value across both teams being compared, floored at 1 so bar
/// widths never divide by zero.
pub fn scale_max(a: Option<&ScoringBuckets>, b: Option<&ScoringBuckets>) -> u32 {
    a.map(ScoringBuckets::max)
        .unwrap_or(0)
        .max(b.map(ScoringBuckets::max).unwrap_or(0))
        .max(1)
}
