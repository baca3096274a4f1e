//! Error types for the voting module.
use discussion_repository::RepositoryError;
use discussion_shared::{VotableId, VoteCounters, VoteDirection};
use thiserror::Error;

/// Represents errors that can occur while aggregating or coordinating votes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VoteError {
    /// Retracting a vote would take a counter below zero.
    #[error("Removing a {direction:?} would take counters {counters:?} below zero")]
    CounterUnderflow {
        counters: VoteCounters,
        direction: VoteDirection,
    },

    #[error("Counters {counters:?} cannot take another vote")]
    CounterOverflow { counters: VoteCounters },

    /// Local and server state disagree in a way no single vote explains.
    #[error("Invariant violation on {target}: {reason}")]
    InvariantViolation { target: VotableId, reason: String },

    #[error("A vote on {0} is still awaiting confirmation")]
    InFlight(VotableId),

    #[error("No vote on {0} is awaiting confirmation")]
    NotPending(VotableId),

    #[error("{0} has not been observed in this session")]
    UnknownTarget(VotableId),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl VoteError {
    pub fn invariant(target: VotableId, reason: impl Into<String>) -> Self {
        Self::InvariantViolation {
            target,
            reason: reason.into(),
        }
    }

    /// True when local state can no longer be trusted and the affected
    /// entity must be re-fetched.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            VoteError::CounterUnderflow { .. } | VoteError::InvariantViolation { .. }
        )
    }
}
