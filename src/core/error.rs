//! Error taxonomy for the Agents API
//!
//! Every remote operation fails into one of these variants. Nothing is
//! recovered locally; errors propagate to the caller (tool adapter, chat
//! layer or CLI), which decides how to present them.

use std::time::Duration;

use thiserror::Error;

use crate::agents::RunStatus;

/// Errors raised by the Agents API client and the run poller
#[derive(Error, Debug)]
pub enum AgentsError {
    /// Credential invalid or insufficient (HTTP 401/403)
    #[error("Authentication failed (HTTP {status}): {body}")]
    Authentication { status: u16, body: String },

    /// Bad endpoint, API version or connection id (HTTP 400/404)
    #[error("Invalid agents configuration (HTTP {status}): {body}")]
    Configuration { status: u16, body: String },

    /// Response body was not the JSON the service is documented to return.
    /// Carries the raw body and status code for diagnostics.
    #[error("Malformed response from agents service (HTTP {status}): {body}")]
    Protocol {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Run did not reach a terminal status within the polling budget
    #[error("Run {run_id} still {last_status} after {budget:?}")]
    Timeout {
        run_id: String,
        last_status: RunStatus,
        budget: Duration,
    },

    /// Run reached a non-successful terminal status
    #[error("Run {run_id} ended as {status}: {detail}")]
    RunFailed {
        run_id: String,
        status: RunStatus,
        detail: String,
    },

    /// The service reported a run status earlier in the lifecycle than one
    /// already observed, which the lifecycle forbids
    #[error("Run {run_id} regressed from {from} to {to}")]
    RunRegressed {
        run_id: String,
        from: RunStatus,
        to: RunStatus,
    },

    /// A run completed but the thread holds no assistant reply
    #[error("Run {run_id} completed but thread {thread_id} holds no assistant reply")]
    MissingAnswer { run_id: String, thread_id: String },

    /// Any other non-success HTTP status (throttling, server errors, ...)
    #[error("Agents service error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Credential provider failed before a request was sent
    #[error("Credential provider failed: {0:#}")]
    Credential(anyhow::Error),

    /// Connection-level failure before a status line was received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AgentsError {
    /// Classify a non-success HTTP status into the taxonomy
    pub fn for_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => AgentsError::Authentication { status, body },
            400 | 404 => AgentsError::Configuration { status, body },
            _ => AgentsError::Api { status, body },
        }
    }

    /// Create a Protocol error from a failed decode of `body`
    pub fn protocol(status: u16, body: impl Into<String>, source: serde_json::Error) -> Self {
        AgentsError::Protocol {
            status,
            body: body.into(),
            source,
        }
    }
}

/// Result type alias for Agents API operations
pub type AgentsResult<T> = Result<T, AgentsError>;
