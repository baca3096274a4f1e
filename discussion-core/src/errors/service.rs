use discussion_repository::RepositoryError;
use thiserror::Error;

/// Errors surfaced by services that call collaborators.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
