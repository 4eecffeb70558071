//! Typed error taxonomy for the pipewatch console.
//!
//! A single enum covers every way a backend interaction can fail. The
//! polling layer inspects these to decide whether a failure is transient
//! (keep polling) or terminal for the watched subject (stop).

use thiserror::Error;

/// Errors surfaced by [`crate::client::PipelineClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The trigger request was malformed. Raised before any network call.
    #[error("Invalid trigger request: {0}")]
    Validation(String),

    /// The backend could not be reached, or the transport failed mid-request.
    #[error("Backend unreachable: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Backend returned {status}: {}", .message.as_deref().unwrap_or("no detail provided"))]
    Server {
        status: u16,
        /// Message extracted from the backend's error payload, when present.
        message: Option<String>,
    },

    /// The backend does not know the requested execution id.
    #[error("Execution {id} not found")]
    NotFound { id: i64 },
}

impl ClientError {
    /// Whether polling the same subject again can possibly succeed.
    ///
    /// A missing id stays missing; everything else may be transient.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
