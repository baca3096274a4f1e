//! # Discussion Shared
//! This crate defines the data contracts shared across the discussion client:
//! votable identities, vote directions and counters, the comment/reply
//! hierarchy, protocols, threads, reviews, and the search and suggestion shapes.
pub mod types;

pub use types::{
    Author, Comment, Page, Protocol, ProtocolSuggestion, Reply, ReplyingTo, Review, SearchQuery,
    SearchResult, Suggestions, Tag, Thread, ThreadSuggestion, ViewerVote, Votable, VotableId,
    VotableKind, Vote, VoteCounters, VoteDirection, VoteValue, VotesDelta,
};
