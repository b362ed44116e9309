//! Error types for insight generation and configuration

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a refresh. `Clone` so one failure reaches every joined caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    #[error("insight generator credentials are missing or were rejected")]
    MissingCredentials,

    #[error("insight generator returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("insight generator request failed: {0}")]
    Transport(String),

    #[error("insight generator returned an empty reply")]
    EmptyReply,

    #[error("insight generator reply could not be parsed: {0}")]
    InvalidReply(String),

    #[error("insight storage failed: {0}")]
    Storage(String),

    #[error("snapshot from {attempted} records would replace one from {persisted}")]
    CountRegression { persisted: usize, attempted: usize },

    #[error("insight refresh ended without a result")]
    Aborted,
}

impl InsightError {
    /// Whether a caller's retry policy may try again
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            InsightError::MissingCredentials | InsightError::CountRegression { .. }
        )
    }
}

impl From<somnia_journal::JournalError> for InsightError {
    fn from(e: somnia_journal::JournalError) -> Self {
        InsightError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API key configured; set SOMNIA_API_KEY")]
    MissingApiKey,

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
