//! Running averages over previously stored analysis results.

use crate::analysis::round1;
use crate::model::{AggregateStats, AnalysisResult};

/// Average clarity and readability across every record that actually carries
/// a result. Records saved without an analysis are skipped entirely: they do
/// not count toward `total` and do not drag the averages toward zero. An
/// empty (or all-absent) input yields absent averages, which is a normal
/// outcome rather than an error.
pub fn aggregate(results: &[Option<AnalysisResult>]) -> AggregateStats {
    let mut clarity_sum = 0u64;
    let mut readability_sum = 0.0f64;
    let mut count = 0u64;

    for result in results.iter().flatten() {
        clarity_sum += u64::from(result.clarity_score);
        readability_sum += result.readability;
        count += 1;
    }

    if count == 0 {
        return AggregateStats {
            total: 0,
            avg_clarity: None,
            avg_readability: None,
        };
    }

    AggregateStats {
        total: count,
        avg_clarity: Some(round1(clarity_sum as f64 / count as f64)),
        avg_readability: Some(round1(readability_sum / count as f64)),
    }
}
