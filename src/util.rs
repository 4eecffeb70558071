//! Shared display formatting helpers.

use chrono::NaiveDateTime;

/// Compact duration display: `45s`, `2m 5s`, or `N/A` when unset.
pub fn format_duration(seconds: Option<i64>) -> String {
    match seconds {
        None => "N/A".to_string(),
        Some(s) if s < 60 => format!("{}s", s),
        Some(s) => format!("{}m {}s", s / 60, s % 60),
    }
}

/// Timestamp display in the backend's local wall-clock terms.
pub fn format_timestamp(ts: Option<NaiveDateTime>) -> String {
    match ts {
        None => "N/A".to_string(),
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// Tests-passed column: `passed/total (failed)` with the failure count
/// only when non-zero, or `N/A` when the run reports no test totals.
pub fn format_test_counts(
    total: Option<i64>,
    passed: Option<i64>,
    failed: Option<i64>,
) -> String {
    match total {
        None => "N/A".to_string(),
        Some(total) => {
            let passed = passed.unwrap_or(0);
            match failed.unwrap_or(0) {
                0 => format!("{}/{}", passed, total),
                failed => format!("{}/{} ({} failed)", passed, total, failed),
            }
        }
    }
}
