//! Rate limiter error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LimitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
