//! # Discussion Repository
//! This crate defines the collaborator interfaces the discussion core consumes:
//! vote submission, comment/reply listing, and protocol/thread search. It also
//! ships an in-memory backend, loaded from a JSON fixture, for tests and local
//! development.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod types;

pub use errors::RepositoryError;
pub use interfaces::{DiscussionRepository, SearchRepository, VotesRepository};
pub use memory::{Fixture, MemoryRepository};
pub use types::{VoteAck, VoteSubmission};
