//! Error types shared by the pinning client, chain access, discovery and the hosted models.

use ethers::types::U256;
use thiserror::Error;

/// Result type alias for courtroom operations
pub type CourtResult<T> = Result<T, CourtError>;

/// Errors that can occur anywhere in the courtroom toolset.
///
/// Skills and the gateway turn these into their own presentation (an error
/// result for the agent, a status code for HTTP callers).
#[derive(Error, Debug)]
pub enum CourtError {
    #[error("Pinata upload failed ({status}): {body}")]
    Pinning { status: u16, body: String },

    #[error("{service} error {status}: {body}")]
    Upstream {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Chain error: {0}")]
    Chain(String),

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Transaction dropped before confirmation")]
    Dropped,

    #[error("failed to fetch case info: no CaseCreated event for case {0}")]
    CaseNotFound(U256),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Image error: {0}")]
    Image(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourtError {
    /// Wraps any displayable chain/provider error.
    pub fn chain(err: impl std::fmt::Display) -> Self {
        CourtError::Chain(err.to_string())
    }
}

impl From<config::ConfigError> for CourtError {
    fn from(err: config::ConfigError) -> Self {
        CourtError::Config(err.to_string())
    }
}
