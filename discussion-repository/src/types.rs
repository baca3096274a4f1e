//! Request and response types for vote submission.

use discussion_shared::{VotableId, ViewerVote, VoteCounters, VoteValue};
use serde::{Deserialize, Serialize};

/// Request to set the current user's vote on one votable entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteSubmission {
    /// The entity being voted on.
    #[serde(flatten)]
    pub target: VotableId,
    /// The state the user's vote should end up in.
    pub value: VoteValue,
}

/// The store of record's answer to a vote submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteAck {
    /// The entity that was voted on.
    #[serde(flatten)]
    pub target: VotableId,
    /// Authoritative counters after the vote was applied.
    #[serde(flatten)]
    pub counters: VoteCounters,
    /// The user's vote as recorded by the server.
    #[serde(flatten)]
    pub viewer_vote: ViewerVote,
}
