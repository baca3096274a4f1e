//! Optimistic vote flow against the store of record.
use std::sync::Arc;

use discussion_repository::{VoteSubmission, VotesRepository};
use discussion_shared::{ViewerVote, Votable, VotableId, VoteCounters, VoteDirection, VoteValue};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::VoteError;
use crate::tree::DiscussionTree;
use crate::voting::{apply_vote, PendingState, PendingVotes, VoteLedger, VoteState};

/// Applies votes optimistically and settles them with the server.
///
/// The lock is only held while local state changes, never across the
/// upstream call, so votes on different identities proceed concurrently.
/// Votes on the same identity are serialized by `PendingVotes`: a second
/// click while the first is unconfirmed fails with `VoteError::InFlight`.
pub struct VoteCoordinator {
    repository: Arc<dyn VotesRepository>,
    state: Mutex<CoordinatorState>,
}

#[derive(Default)]
struct CoordinatorState {
    ledger: VoteLedger,
    pending: PendingVotes,
}

impl VoteCoordinator {
    /// Creates a new `VoteCoordinator` instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - The `VotesRepository` votes are submitted to
    ///
    /// # Returns
    ///
    /// A coordinator with an empty ledger.
    pub fn new(repository: Arc<dyn VotesRepository>) -> Self {
        Self {
            repository,
            state: Mutex::new(CoordinatorState::default()),
        }
    }

    /// Record the server's view of a votable before it can be voted on.
    pub async fn observe<V: Votable + Sync>(&self, votable: &V) -> Result<VoteState, VoteError> {
        self.state.lock().await.ledger.observe(votable)
    }

    /// Record server-reported counters and viewer vote for `target`.
    pub async fn reconcile(
        &self,
        target: VotableId,
        viewer_vote: ViewerVote,
        counters: VoteCounters,
    ) -> Result<VoteState, VoteError> {
        self.state
            .lock()
            .await
            .ledger
            .reconcile(target, viewer_vote, counters)
    }

    pub async fn observe_tree(&self, tree: &DiscussionTree) -> Result<usize, VoteError> {
        self.state.lock().await.ledger.observe_tree(tree)
    }

    pub async fn snapshot(&self, target: VotableId) -> Option<VoteState> {
        self.state.lock().await.ledger.state(target)
    }

    pub async fn status(&self, target: VotableId) -> PendingState {
        self.state.lock().await.pending.state(target)
    }

    pub async fn is_pending(&self, target: VotableId) -> bool {
        self.state.lock().await.pending.is_pending(target)
    }

    /// Cast the current user's vote on `target`.
    ///
    /// The aggregated state is visible through `snapshot` as soon as the vote
    /// begins. On acknowledgement the server's counters and viewer vote
    /// replace it. On refusal the previous state is restored, unless server
    /// data arrived through `reconcile` or `observe` while the vote was in
    /// flight, in which case that data stays.
    ///
    /// # Arguments
    ///
    /// * `target` - The votable being voted on; it must have been observed
    /// * `intent` - The direction the user clicked
    ///
    /// # Returns
    ///
    /// The settled `VoteState`, or a `VoteError`.
    pub async fn cast(&self, target: VotableId, intent: VoteDirection) -> Result<VoteState, VoteError> {
        let transition = {
            let mut state = self.state.lock().await;
            let current = state
                .ledger
                .state(target)
                .ok_or(VoteError::UnknownTarget(target))?;
            let transition = apply_vote(current.counters, current.direction, intent)?;
            state.pending.begin(target, transition)?;
            state.ledger.record(target, &transition);
            transition
        };

        info!(
            target_id = %target,
            from = ?transition.previous.direction,
            to = ?transition.next.direction,
            upvotes = transition.next.counters.upvotes,
            downvotes = transition.next.counters.downvotes,
            "Vote applied optimistically"
        );

        let submission = VoteSubmission {
            target,
            value: VoteValue::from(transition.next.direction),
        };
        let result = self.repository.submit_vote(&submission).await;

        let mut state = self.state.lock().await;
        match result {
            Ok(ack) if ack.target != target => {
                warn!(
                    target_id = %target,
                    acked = %ack.target,
                    "Vote acknowledged for another votable"
                );
                state.pending.clear(target);
                state.ledger.forget(target);
                Err(VoteError::invariant(
                    target,
                    format!("acknowledgement names {}", ack.target),
                ))
            }
            Ok(ack) => match state.ledger.reconcile(target, ack.viewer_vote, ack.counters) {
                Ok(settled) => {
                    state.pending.confirm(target, settled)?;
                    if settled != transition.next {
                        info!(target_id = %target, ?settled, "Server settled vote differently");
                    }
                    Ok(settled)
                }
                Err(e) => {
                    warn!(target_id = %target, error = %e, "Discarding vote state for re-fetch");
                    state.pending.clear(target);
                    state.ledger.forget(target);
                    Err(e)
                }
            },
            Err(e) => {
                let held = state.ledger.state(target);
                match state.pending.reject(target, held)? {
                    Some(rollback) => {
                        state.ledger.rollback(target, rollback);
                        warn!(
                            target_id = %target,
                            error = %e,
                            upvotes = rollback.counters.upvotes,
                            downvotes = rollback.counters.downvotes,
                            "Vote rejected, rolled back"
                        );
                    }
                    None => {
                        warn!(
                            target_id = %target,
                            error = %e,
                            "Vote rejected after newer server state arrived, keeping it"
                        );
                    }
                }
                Err(VoteError::Repository(e))
            }
        }
    }
}
