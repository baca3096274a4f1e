//! Repository error types.
//!
//! Collaborators surface every failure through this one type so the core can
//! treat all backends alike.
use thiserror::Error;

/// Errors returned by collaborator implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend refused the change.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("Unavailable: {0}")]
    Unavailable(String),

    /// The backend returned data that violates the data contract.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Failed to (de)serialize data exchanged with the backend.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
