//! Shared status normalization.
//!
//! The backend reports statuses as free-form strings (`status`,
//! `buildStatus`, `testStatus`, `deploymentStatus`, and per-test statuses
//! all share the vocabulary). Every consumer — stage derivation, summary
//! aggregation, badge rendering — goes through this one lookup so the
//! comparison policy lives in exactly one place.

use console::Style;

/// Normalized presentation bucket for a raw status string.
///
/// Comparison is ASCII case-insensitive. `FAILED` and `FAILURE` are
/// synonyms. Anything unrecognized (or absent) lands in [`StatusKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Success,
    Failed,
    Running,
    Pending,
    Unknown,
}

impl StatusKind {
    /// Normalize an optional raw status string.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Unknown;
        };
        if raw.eq_ignore_ascii_case("SUCCESS") {
            Self::Success
        } else if raw.eq_ignore_ascii_case("FAILED") || raw.eq_ignore_ascii_case("FAILURE") {
            Self::Failed
        } else if raw.eq_ignore_ascii_case("RUNNING") {
            Self::Running
        } else if raw.eq_ignore_ascii_case("PENDING") {
            Self::Pending
        } else {
            Self::Unknown
        }
    }

    /// SUCCESS or FAILED — no further transitions expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    /// PENDING or RUNNING — the execution is still moving.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }

    /// Badge glyph shown next to the status text.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Running => "⟳",
            Self::Pending => "○",
            Self::Unknown => "◉",
        }
    }

    /// Terminal color used for badges and stage rows.
    pub fn color(&self) -> Style {
        match self {
            Self::Success => Style::new().green(),
            Self::Failed => Style::new().red(),
            Self::Running => Style::new().cyan(),
            Self::Pending => Style::new().magenta(),
            Self::Unknown => Style::new().dim(),
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
            Self::Running => "RUNNING",
            Self::Pending => "PENDING",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Styled badge for a raw status string, preserving the backend's own
/// spelling when it has one.
pub fn badge(raw: Option<&str>) -> String {
    let kind = StatusKind::parse(raw);
    let label = raw.unwrap_or("UNKNOWN").to_ascii_uppercase();
    format!(
        "{} {}",
        kind.color().apply_to(kind.glyph()),
        kind.color().apply_to(label)
    )
}

/// Plain (uncolored) badge text, for narrow or non-tty output.
pub fn plain_badge(raw: Option<&str>) -> String {
    let kind = StatusKind::parse(raw);
    format!("{} {}", kind.glyph(), raw.unwrap_or("UNKNOWN").to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        for raw in &["success", "SUCCESS", "Success", "sUcCeSs"] {
            assert_eq!(StatusKind::parse(Some(raw)), StatusKind::Success);
        }
        for raw in &["running", "RUNNING", "Running"] {
            assert_eq!(StatusKind::parse(Some(raw)), StatusKind::Running);
        }
        for raw in &["pending", "PENDING"] {
            assert_eq!(StatusKind::parse(Some(raw)), StatusKind::Pending);
        }
    }

    #[test]
    fn failed_and_failure_are_synonyms() {
        assert_eq!(StatusKind::parse(Some("FAILED")), StatusKind::Failed);
        assert_eq!(StatusKind::parse(Some("FAILURE")), StatusKind::Failed);
        assert_eq!(StatusKind::parse(Some("failure")), StatusKind::Failed);
    }

    #[test]
    fn unrecognized_and_absent_map_to_unknown() {
        assert_eq!(StatusKind::parse(Some("WEIRD")), StatusKind::Unknown);
        assert_eq!(StatusKind::parse(Some("")), StatusKind::Unknown);
        assert_eq!(StatusKind::parse(Some("ABORTED")), StatusKind::Unknown);
        assert_eq!(StatusKind::parse(None), StatusKind::Unknown);
    }

    #[test]
    fn terminal_and_active_partition_the_known_statuses() {
        assert!(StatusKind::Success.is_terminal());
        assert!(StatusKind::Failed.is_terminal());
        assert!(!StatusKind::Running.is_terminal());
        assert!(!StatusKind::Pending.is_terminal());

        assert!(StatusKind::Running.is_active());
        assert!(StatusKind::Pending.is_active());
        assert!(!StatusKind::Success.is_active());
        assert!(!StatusKind::Unknown.is_active());
    }

    #[test]
    fn plain_badge_preserves_backend_spelling() {
        assert_eq!(plain_badge(Some("success")), "✓ SUCCESS");
        assert_eq!(plain_badge(Some("FAILURE")), "✗ FAILURE");
        assert_eq!(plain_badge(None), "◉ UNKNOWN");
    }
}
