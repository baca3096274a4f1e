//! This module defines the `VotesRepository` trait, the upstream seam for vote
//! submission.
use crate::errors::RepositoryError;
use crate::types::{VoteAck, VoteSubmission};

/// Sends a user's vote to the store of record.
///
/// Implementations apply the submitted `VoteValue` with set semantics and
/// answer with the authoritative counters and the user's resulting vote.
#[async_trait::async_trait]
pub trait VotesRepository: Send + Sync {
    /// Submits a vote for a single votable entity.
    ///
    /// # Arguments
    ///
    /// * `submission` - The target identity and the vote state it should end up in.
    ///
    /// # Returns
    ///
    /// A `VoteAck` carrying the server's counters and viewer vote, or a
    /// `RepositoryError` if the backend refused or could not be reached.
    async fn submit_vote(&self, submission: &VoteSubmission) -> Result<VoteAck, RepositoryError>;
}
