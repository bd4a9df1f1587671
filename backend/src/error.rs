use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("candidate not found: {0}")]
    UnknownCandidate(String),

    #[error("backend rejected the call: {0}")]
    Rejected(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
