//! Aggregation of execution collections into dashboard counts.

use crate::client::ExecutionRecord;
use crate::status::StatusKind;

/// Counts shown on the dashboard summary strip.
///
/// `total` counts every record; the named buckets only count records whose
/// overall status normalizes to that bucket, so `success + failed + running`
/// may be less than `total` when pending or unrecognized statuses are
/// present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryCounts {
    pub success: usize,
    pub failed: usize,
    pub running: usize,
    pub total: usize,
}

/// Reduce a collection of executions to summary counts.
pub fn summarize(records: &[ExecutionRecord]) -> SummaryCounts {
    records.iter().fold(SummaryCounts::default(), |mut acc, r| {
        match r.status_kind() {
            StatusKind::Success => acc.success += 1,
            StatusKind::Failed => acc.failed += 1,
            StatusKind::Running => acc.running += 1,
            StatusKind::Pending | StatusKind::Unknown => {}
        }
        acc.total += 1;
        acc
    })
}
