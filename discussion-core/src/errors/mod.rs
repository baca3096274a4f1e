mod service;
mod tree;
mod vote;

pub use service::ServiceError;
pub use tree::TreeError;
pub use vote::VoteError;
