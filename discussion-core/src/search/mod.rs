//! Search and suggestion aggregation.
mod aggregator;
mod service;

pub use aggregator::{merge_search, merge_suggestions};
pub use service::SearchService;
