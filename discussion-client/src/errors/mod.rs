//! Error types for the discussion client.
use discussion_core::{ServiceError, TreeError, VoteError};
use discussion_repository::RepositoryError;
use thiserror::Error;

/// Errors that can occur while configuring or running the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The command line could not be understood.
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Vote error: {0}")]
    Vote(#[from] VoteError),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Search error: {0}")]
    Service(#[from] ServiceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl ClientError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}
