//! Error types for the discussion repository.
//! Consolidates and re-exports error types related to collaborator operations.
mod repository;

pub use repository::RepositoryError;
