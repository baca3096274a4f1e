//! This module defines and re-exports the collaborator interfaces.
//! Each trait is object-safe and injected into the core as `Arc<dyn ...>`.
mod discussions;
mod search;
mod votes;

pub use discussions::DiscussionRepository;
pub use search::SearchRepository;
pub use votes::VotesRepository;
