//! Agent error types.

use thiserror::Error;

use reachbridge_browser::CdpError;

/// Agent-internal errors. Anything a caller should branch on is reported
/// through the outcome's `FailureCode` instead.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Channel HTTP transport failed.
    #[error("Channel request failed: {0}")]
    Channel(String),

    /// Unexpected channel response.
    #[error("Unexpected channel response: {0}")]
    Protocol(String),

    /// Browser transport failed.
    #[error(transparent)]
    Cdp(#[from] CdpError),
}

impl From<reqwest::Error> for AgentError {
    fn from(e: reqwest::Error) -> Self {
        AgentError::Channel(e.to_string())
    }
}
