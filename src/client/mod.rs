//! Typed request/response client for the pipeline backend.
//!
//! One method per backend endpoint, no retries, no caching: a failed call
//! surfaces as a [`ClientError`] and the caller decides what to do on the
//! next tick. The base path is configurable; see [`crate::config::Config`].

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::errors::ClientError;

pub mod github;
pub mod models;

pub use models::{
    CommitEntry, ExecutionRecord, HealthStatus, TestResult, TriggerRequest,
};

/// The fetch seam between the polling controller and the network.
///
/// Production code uses [`PipelineClient`]; polling tests substitute
/// scripted in-memory sources.
#[async_trait]
pub trait ExecutionSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ExecutionRecord>, ClientError>;
    async fn fetch_one(&self, id: i64) -> Result<ExecutionRecord, ClientError>;
}

/// HTTP client for the pipeline backend API.
#[derive(Debug, Clone)]
pub struct PipelineClient {
    http: reqwest::Client,
    base_url: String,
}

impl PipelineClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Trigger a new execution.
    ///
    /// Required fields are checked before any network traffic; an empty
    /// student name or repository URL is a [`ClientError::Validation`].
    /// An empty branch name falls back to `main`.
    pub async fn trigger_execution(
        &self,
        request: &TriggerRequest,
    ) -> Result<ExecutionRecord, ClientError> {
        if request.student_name.trim().is_empty() {
            return Err(ClientError::Validation("studentName is required".into()));
        }
        if request.repository_url.trim().is_empty() {
            return Err(ClientError::Validation("repositoryUrl is required".into()));
        }
        let request = TriggerRequest {
            branch_name: if request.branch_name.trim().is_empty() {
                "main".to_string()
            } else {
                request.branch_name.clone()
            },
            ..request.clone()
        };

        tracing::debug!(student = %request.student_name, repo = %request.repository_url, "triggering execution");
        let resp = self
            .http
            .post(self.url("/trigger"))
            .json(&request)
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }
        resp.json().await.map_err(ClientError::Network)
    }

    /// All executions, in the backend's own order.
    pub async fn list_executions(&self) -> Result<Vec<ExecutionRecord>, ClientError> {
        let resp = self
            .http
            .get(self.url("/executions"))
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }
        resp.json().await.map_err(ClientError::Network)
    }

    /// Executions triggered by one student, in the backend's own order.
    pub async fn executions_by_student(
        &self,
        student_name: &str,
    ) -> Result<Vec<ExecutionRecord>, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/student/{}", student_name)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }
        resp.json().await.map_err(ClientError::Network)
    }

    /// One execution by id. A backend 404 becomes [`ClientError::NotFound`].
    pub async fn get_execution(&self, id: i64) -> Result<ExecutionRecord, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/executions/{}", id)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound { id });
        }
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }
        resp.json().await.map_err(ClientError::Network)
    }

    /// Test results for one execution. An empty list is a normal response
    /// while results are still being recorded.
    pub async fn get_test_results(&self, id: i64) -> Result<Vec<TestResult>, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/executions/{}/tests", id)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }
        resp.json().await.map_err(ClientError::Network)
    }

    /// Liveness probe. `Ok(true)` only for a 2xx response reporting `UP`.
    pub async fn check_health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !resp.status().is_success() {
            return Ok(false);
        }
        let health: HealthStatus = resp.json().await.map_err(ClientError::Network)?;
        Ok(health.is_up())
    }

    /// Recent commits for a repository, proxied by the backend.
    ///
    /// Auxiliary data: callers degrade to an empty panel on any error.
    pub async fn recent_commits(&self, repo_url: &str) -> Result<Vec<CommitEntry>, ClientError> {
        let resp = self
            .http
            .get(self.url("/github/commits"))
            .query(&[("repoUrl", repo_url)])
            .send()
            .await
            .map_err(ClientError::Network)?;
        if !resp.status().is_success() {
            return Err(server_error(resp).await);
        }
        resp.json().await.map_err(ClientError::Network)
    }
}

#[async_trait]
impl ExecutionSource for PipelineClient {
    async fn fetch_all(&self) -> Result<Vec<ExecutionRecord>, ClientError> {
        self.list_executions().await
    }

    async fn fetch_one(&self, id: i64) -> Result<ExecutionRecord, ClientError> {
        self.get_execution(id).await
    }
}

/// Build a [`ClientError::Server`] from a non-2xx response, pulling the
/// backend's `message`/`error` payload field through when there is one.
async fn server_error(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let message = match resp.text().await {
        Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            }),
        Err(_) => None,
    };
    ClientError::Server { status, message }
}
