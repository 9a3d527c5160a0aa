use thiserror::Error;

/// Failures of the key-value backend holding high scores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable")]
    Unavailable,
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("malformed high score record: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("mode cannot change while a run is in progress")]
    ModeLocked,
    #[error("unknown mode '{0}'")]
    UnknownMode(String),
}
