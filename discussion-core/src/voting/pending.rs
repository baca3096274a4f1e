use std::collections::HashMap;

use discussion_shared::VotableId;

use crate::errors::VoteError;
use crate::voting::{VoteState, VoteTransition};

/// Where an identity's optimistic vote stands.
///
/// Identities that never had a vote cast on them are `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingState {
    Idle,
    /// Applied locally, waiting on the server.
    Pending(VoteTransition),
    Confirmed(VoteState),
    /// Refused by the server and rolled back to the held state.
    Rejected(VoteState),
}

/// Per-identity optimistic vote state machine.
///
/// At most one transition per identity may be pending at a time, so a new
/// transition is never computed from a state the server has not settled yet.
#[derive(Debug, Default)]
pub struct PendingVotes {
    states: HashMap<VotableId, PendingState>,
}

impl PendingVotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, target: VotableId) -> PendingState {
        self.states
            .get(&target)
            .copied()
            .unwrap_or(PendingState::Idle)
    }

    pub fn is_pending(&self, target: VotableId) -> bool {
        matches!(self.state(target), PendingState::Pending(_))
    }

    /// Start tracking `transition` for `target`.
    ///
    /// Fails with `VoteError::InFlight` if a transition is already pending.
    pub fn begin(&mut self, target: VotableId, transition: VoteTransition) -> Result<(), VoteError> {
        if self.is_pending(target) {
            return Err(VoteError::InFlight(target));
        }
        self.states.insert(target, PendingState::Pending(transition));
        Ok(())
    }

    /// Close the pending transition with the state the server settled on.
    pub fn confirm(&mut self, target: VotableId, settled: VoteState) -> Result<(), VoteError> {
        if !self.is_pending(target) {
            return Err(VoteError::NotPending(target));
        }
        self.states.insert(target, PendingState::Confirmed(settled));
        Ok(())
    }

    /// Close the pending transition as refused.
    ///
    /// # Arguments
    ///
    /// * `target` - The votable whose vote was refused
    /// * `held` - What the ledger holds for `target` right now
    ///
    /// # Returns
    ///
    /// The state held before the transition began, which the caller restores,
    /// or `None` when server data replaced the optimistic state while the vote
    /// was in flight and `held` stays.
    pub fn reject(
        &mut self,
        target: VotableId,
        held: Option<VoteState>,
    ) -> Result<Option<VoteState>, VoteError> {
        let transition = match self.state(target) {
            PendingState::Pending(transition) => transition,
            _ => return Err(VoteError::NotPending(target)),
        };
        match held {
            Some(held) if held == transition.next => {
                self.states
                    .insert(target, PendingState::Rejected(transition.previous));
                Ok(Some(transition.previous))
            }
            Some(held) => {
                self.states.insert(target, PendingState::Rejected(held));
                Ok(None)
            }
            None => {
                self.states.remove(&target);
                Ok(None)
            }
        }
    }

    /// Drop all tracking for `target`, returning it to `Idle`.
    pub fn clear(&mut self, target: VotableId) {
        self.states.remove(&target);
    }
}
