//! Wire models for the pipeline backend API.
//!
//! Field names follow the backend's camelCase JSON verbatim. Everything the
//! backend may omit or null is an `Option`; display-level defaults (branch
//! "main", zero test counts) are applied by accessors, never by mutating
//! the record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::status::StatusKind;

/// One pipeline run, as reported by `GET /executions` and friends.
///
/// Records are owned by the backend: the console never mutates one, it only
/// replaces its cached copy with a freshly fetched record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    pub id: i64,
    #[serde(default)]
    pub build_number: Option<i64>,
    pub student_name: String,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub commit_hash: Option<String>,
    /// PENDING, RUNNING, SUCCESS, FAILED (free text on the wire).
    pub status: String,
    /// Name of the stage currently executing, e.g. "CHECKOUT" or "PACKAGE".
    #[serde(default)]
    pub current_stage: Option<String>,
    #[serde(default)]
    pub build_status: Option<String>,
    #[serde(default)]
    pub test_status: Option<String>,
    #[serde(default)]
    pub deployment_status: Option<String>,
    #[serde(default)]
    pub total_tests: Option<i64>,
    #[serde(default)]
    pub tests_passed: Option<i64>,
    #[serde(default)]
    pub tests_failed: Option<i64>,
    /// Wall-clock duration in seconds, set once the run completes.
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl ExecutionRecord {
    /// Display number: the runner's build number, falling back to the id.
    pub fn display_build(&self) -> String {
        match self.build_number {
            Some(n) => format!("#{}", n),
            None => format!("#{}", self.id),
        }
    }

    /// Branch name with the backend's implicit default.
    pub fn branch(&self) -> &str {
        self.branch_name.as_deref().filter(|b| !b.is_empty()).unwrap_or("main")
    }

    /// Normalized overall status.
    pub fn status_kind(&self) -> StatusKind {
        StatusKind::parse(Some(&self.status))
    }

    /// SUCCESS or FAILED — no further polling is useful.
    pub fn is_terminal(&self) -> bool {
        self.status_kind().is_terminal()
    }

    /// Whether test results are worth fetching for this record.
    pub fn has_tests(&self) -> bool {
        self.total_tests.is_some_and(|n| n > 0)
    }

    pub fn tests_passed(&self) -> i64 {
        self.tests_passed.unwrap_or(0)
    }

    pub fn tests_failed(&self) -> i64 {
        self.tests_failed.unwrap_or(0)
    }
}

/// One test method outcome within an execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: i64,
    pub test_class: String,
    pub test_method: String,
    pub status: String,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Body of `POST /trigger`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    pub student_name: String,
    pub repository_url: String,
    pub branch_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

/// One entry of the auxiliary recent-commits feed
/// (`GET /github/commits?repoUrl=...`), shaped like the GitHub commits API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitEntry {
    pub commit: CommitDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    pub author: CommitAuthor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_record_deserializes_full_backend_payload() {
        let json = r#"{
            "id": 7,
            "buildNumber": 12,
            "studentName": "Ada Lovelace",
            "repositoryUrl": "https://github.com/ada/engine",
            "branchName": "develop",
            "commitHash": "abc123",
            "status": "RUNNING",
            "currentStage": "BUILD",
            "buildStatus": "RUNNING",
            "testStatus": null,
            "deploymentStatus": null,
            "totalTests": null,
            "testsPassed": null,
            "testsFailed": null,
            "duration": null,
            "errorMessage": null,
            "startedAt": "2024-03-01T10:15:30",
            "completedAt": null
        }"#;
        let record: ExecutionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.build_number, Some(12));
        assert_eq!(record.display_build(), "#12");
        assert_eq!(record.branch(), "develop");
        assert_eq!(record.status_kind(), StatusKind::Running);
        assert!(!record.is_terminal());
        assert!(!record.has_tests());
        assert!(record.started_at.is_some());
        assert!(record.completed_at.is_none());
    }

    #[test]
    fn execution_record_tolerates_sparse_payload() {
        // A record straight after trigger carries almost nothing.
        let json = r#"{"id": 3, "studentName": "Grace", "status": "PENDING"}"#;
        let record: ExecutionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.display_build(), "#3");
        assert_eq!(record.branch(), "main");
        assert_eq!(record.tests_passed(), 0);
        assert_eq!(record.tests_failed(), 0);
        assert_eq!(record.status_kind(), StatusKind::Pending);
    }

    #[test]
    fn empty_branch_falls_back_to_main() {
        let json = r#"{"id": 1, "studentName": "G", "status": "RUNNING", "branchName": ""}"#;
        let record: ExecutionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.branch(), "main");
    }

    #[test]
    fn has_tests_requires_positive_total() {
        let mut record: ExecutionRecord =
            serde_json::from_str(r#"{"id": 1, "studentName": "G", "status": "SUCCESS"}"#).unwrap();
        assert!(!record.has_tests());
        record.total_tests = Some(0);
        assert!(!record.has_tests());
        record.total_tests = Some(5);
        assert!(record.has_tests());
    }

    #[test]
    fn trigger_request_omits_absent_commit_hash() {
        let req = TriggerRequest {
            student_name: "Ada".into(),
            repository_url: "https://github.com/ada/engine".into(),
            branch_name: "main".into(),
            commit_hash: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["studentName"], "Ada");
        assert!(json.get("commitHash").is_none());

        let with_hash = TriggerRequest {
            commit_hash: Some("abc".into()),
            ..req
        };
        let json = serde_json::to_value(&with_hash).unwrap();
        assert_eq!(json["commitHash"], "abc");
    }

    #[test]
    fn test_result_deserializes_backend_payload() {
        let json = r#"{
            "id": 1,
            "testClass": "com.example.CalculatorTest",
            "testMethod": "addsTwoNumbers",
            "status": "PASS",
            "durationMs": 42,
            "errorMessage": null
        }"#;
        let result: TestResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.test_class, "com.example.CalculatorTest");
        assert_eq!(result.duration_ms, Some(42));
        assert!(result.error_message.is_none());
    }

    #[test]
    fn health_status_is_up_case_insensitive() {
        let up: HealthStatus = serde_json::from_str(r#"{"status": "UP"}"#).unwrap();
        assert!(up.is_up());
        let up: HealthStatus = serde_json::from_str(r#"{"status": "up"}"#).unwrap();
        assert!(up.is_up());
        let down: HealthStatus = serde_json::from_str(r#"{"status": "DOWN"}"#).unwrap();
        assert!(!down.is_up());
    }

    #[test]
    fn commit_entry_deserializes_github_shape() {
        let json = r#"[{
            "sha": "abc123",
            "commit": {
                "message": "Fix build",
                "author": {"name": "Ada", "date": "2024-03-01T10:00:00Z"}
            }
        }]"#;
        let entries: Vec<CommitEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].commit.message, "Fix build");
        assert_eq!(entries[0].commit.author.name, "Ada");
    }
}
