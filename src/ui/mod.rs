//! Terminal rendering for the console views.
//!
//! Pure string builders where possible; only the live stage board owns
//! progress-bar state.

pub mod board;

pub use board::StageBoard;

use console::{Emoji, style};

use crate::client::{CommitEntry, ExecutionRecord, TestResult};
use crate::status;
use crate::summary::SummaryCounts;
use crate::util::{format_duration, format_test_counts, format_timestamp};

pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">");
pub static COMMIT: Emoji<'_, '_> = Emoji("🔖 ", "*");

/// One-line summary strip for the dashboard.
pub fn render_summary(counts: &SummaryCounts) -> String {
    format!(
        "{} success   {} failed   {} running   {} total",
        style(counts.success).green().bold(),
        style(counts.failed).red().bold(),
        style(counts.running).cyan().bold(),
        style(counts.total).bold(),
    )
}

/// The dashboard execution table, backend order preserved.
pub fn render_execution_table(records: &[ExecutionRecord]) -> String {
    if records.is_empty() {
        return format!(
            "{}",
            style("No pipeline executions yet. Trigger your first pipeline to get started!").dim()
        );
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style(format!(
            "{:<8} {:<20} {:<12} {:<12} {:<10} {:<16} {:<10} {}",
            "Build", "Student", "Branch", "Status", "Stage", "Tests", "Duration", "Started"
        ))
        .bold()
        .dim()
    ));
    for record in records {
        let kind = record.status_kind();
        out.push_str(&format!(
            "{:<8} {:<20} {:<12} {:<12} {:<10} {:<16} {:<10} {}\n",
            record.display_build(),
            truncate(&record.student_name, 19),
            truncate(record.branch(), 11),
            kind.color()
                .apply_to(format!("{} {}", kind.glyph(), record.status.to_ascii_uppercase())),
            record.current_stage.as_deref().unwrap_or("N/A"),
            format_test_counts(record.total_tests, record.tests_passed, record.tests_failed),
            format_duration(record.duration),
            format_timestamp(record.started_at),
        ));
    }
    out
}

/// The auxiliary recent-commits panel.
pub fn render_commits(entries: &[CommitEntry]) -> String {
    if entries.is_empty() {
        return format!("{}", style("No commit history available").dim());
    }
    let mut out = String::new();
    for entry in entries {
        let first_line = entry.commit.message.lines().next().unwrap_or_default();
        out.push_str(&format!(
            "{}{}  {}\n",
            COMMIT,
            truncate(first_line, 60),
            style(format!(
                "{}{}",
                entry.commit.author.name,
                entry
                    .commit
                    .author
                    .date
                    .as_deref()
                    .map(|d| format!(" · {}", d))
                    .unwrap_or_default()
            ))
            .dim()
        ));
    }
    out
}

/// Per-test table for the watch view.
pub fn render_test_results(results: &[TestResult]) -> String {
    if results.is_empty() {
        return format!("{}", style("No test results recorded yet").dim());
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style(format!(
            "{:<40} {:<30} {:<10} {:<10} {}",
            "Class", "Method", "Status", "Duration", "Error"
        ))
        .bold()
        .dim()
    ));
    for test in results {
        out.push_str(&format!(
            "{:<40} {:<30} {:<10} {:<10} {}\n",
            truncate(&test.test_class, 39),
            truncate(&test.test_method, 29),
            status::badge(Some(&test.status)),
            test.duration_ms
                .map(|ms| format!("{}ms", ms))
                .unwrap_or_else(|| "N/A".to_string()),
            test.error_message.as_deref().map(|e| truncate(e, 60)).unwrap_or_default(),
        ));
    }
    out
}

/// Header block for the watch view.
pub fn render_execution_header(record: &ExecutionRecord) -> String {
    format!(
        "{} {}  {}\n{} {}  {} {}  {} {}",
        style(format!("Build {}", record.display_build())).bold(),
        status::badge(Some(&record.status)),
        style(&record.student_name).dim(),
        style("repo:").dim(),
        record.repository_url.as_deref().unwrap_or("N/A"),
        style("branch:").dim(),
        record.branch(),
        style("duration:").dim(),
        format_duration(record.duration),
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> ExecutionRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_table_invites_a_first_trigger() {
        let out = render_execution_table(&[]);
        assert!(out.contains("No pipeline executions yet"));
    }

    #[test]
    fn table_contains_one_row_per_record() {
        let records = vec![
            record(r#"{"id": 1, "studentName": "Ada", "status": "SUCCESS"}"#),
            record(r#"{"id": 2, "studentName": "Grace", "status": "RUNNING"}"#),
        ];
        let out = render_execution_table(&records);
        assert!(out.contains("Ada"));
        assert!(out.contains("Grace"));
        assert!(out.contains("#1"));
        assert!(out.contains("#2"));
    }

    #[test]
    fn truncate_keeps_short_strings_intact() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly_ten", 11), "exactly_ten");
    }

    #[test]
    fn truncate_marks_cut_strings() {
        let out = truncate("a-very-long-identifier", 10);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 10);
    }

    #[test]
    fn commits_panel_degrades_to_placeholder() {
        assert!(render_commits(&[]).contains("No commit history"));
    }

    #[test]
    fn test_results_render_class_and_method() {
        let results: Vec<TestResult> = serde_json::from_str(
            r#"[{"id":1,"testClass":"CalcTest","testMethod":"adds","status":"PASS","durationMs":5}]"#,
        )
        .unwrap();
        let out = render_test_results(&results);
        assert!(out.contains("CalcTest"));
        assert!(out.contains("adds"));
        assert!(out.contains("5ms"));
    }
}
