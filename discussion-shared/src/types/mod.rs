//! This module defines the core data structures used across the discussion client.
mod comment;
mod page;
mod protocol;
mod search_query;
mod search_result;
mod votable;
mod vote;
mod vote_counters;

pub use comment::{Author, Comment, Reply, ReplyingTo};
pub use page::Page;
pub use protocol::{Protocol, Review, Tag, Thread};
pub use search_query::{SearchQuery, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use search_result::{ProtocolSuggestion, SearchResult, Suggestions, ThreadSuggestion};
pub use votable::{Votable, VotableId, VotableKind};
pub use vote::{ViewerVote, Vote, VoteDirection, VoteValue};
pub use vote_counters::{VoteCounters, VotesDelta};
