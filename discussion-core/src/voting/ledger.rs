use std::collections::HashMap;

use discussion_shared::{ViewerVote, Votable, VotableId, VoteCounters, VoteDirection};
use tracing::debug;

use crate::errors::VoteError;
use crate::tree::DiscussionTree;
use crate::voting::{VoteState, VoteTransition};

/// Session-local record of the current user's vote on every votable rendered.
///
/// Entries only ever come from a server response or from an aggregator
/// transition. On reconciliation the server always wins.
#[derive(Debug, Default, Clone)]
pub struct VoteLedger {
    entries: HashMap<VotableId, VoteState>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's vote on `target`, `None` when there is none or the target
    /// has not been seen.
    pub fn direction(&self, target: VotableId) -> Option<VoteDirection> {
        self.entries.get(&target).and_then(|state| state.direction)
    }

    pub fn state(&self, target: VotableId) -> Option<VoteState> {
        self.entries.get(&target).copied()
    }

    pub fn contains(&self, target: VotableId) -> bool {
        self.entries.contains_key(&target)
    }

    /// Store the outcome of an aggregator transition.
    pub fn record(&mut self, target: VotableId, transition: &VoteTransition) {
        self.entries.insert(target, transition.next);
    }

    /// Put back a previously held state, e.g. after the server refused a vote.
    pub fn rollback(&mut self, target: VotableId, state: VoteState) {
        self.entries.insert(target, state);
    }

    /// Overwrite the entry for `target` with authoritative server data.
    ///
    /// # Arguments
    ///
    /// * `target` - The votable the server reported on
    /// * `viewer_vote` - The current user's vote as embedded by the server
    /// * `counters` - The server's counters for the votable
    ///
    /// # Returns
    ///
    /// The reconciled `VoteState`, or `VoteError::InvariantViolation` when the
    /// server data cannot describe a single user's vote.
    pub fn reconcile(
        &mut self,
        target: VotableId,
        viewer_vote: ViewerVote,
        counters: VoteCounters,
    ) -> Result<VoteState, VoteError> {
        let direction = viewer_vote
            .direction()
            .map_err(|reason| VoteError::invariant(target, reason))?;

        if let Some(direction) = direction {
            if counters.count(direction) == 0 {
                return Err(VoteError::invariant(
                    target,
                    format!("viewer holds a {:?} but its counter is zero", direction),
                ));
            }
        }

        let state = VoteState::new(counters, direction);
        if let Some(previous) = self.entries.insert(target, state) {
            if previous.direction != direction {
                debug!(
                    target_id = %target,
                    local = ?previous.direction,
                    server = ?direction,
                    "Server vote overrides local vote"
                );
            }
        }

        Ok(state)
    }

    /// Reconcile against a votable entity as returned by the server.
    pub fn observe<V: Votable>(&mut self, votable: &V) -> Result<VoteState, VoteError> {
        self.reconcile(votable.votable_id(), votable.viewer_vote(), votable.counters())
    }

    /// Reconcile every comment, reply and nested reply of an assembled tree.
    ///
    /// Returns the number of entries reconciled.
    pub fn observe_tree(&mut self, tree: &DiscussionTree) -> Result<usize, VoteError> {
        let mut observed = 0;
        for node in tree.nodes() {
            self.observe(&node.comment)?;
            observed += 1;
            for reply in &node.comment.replies {
                self.observe(reply)?;
                observed += 1;
                for nested in &reply.nested_replies {
                    self.observe(nested)?;
                    observed += 1;
                }
            }
        }
        Ok(observed)
    }

    pub fn forget(&mut self, target: VotableId) -> Option<VoteState> {
        self.entries.remove(&target)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
