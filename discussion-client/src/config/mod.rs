//! Client configuration read from the environment.
mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::path::PathBuf;

use discussion_core::ReplyLoading;
use discussion_shared::types::{DEFAULT_PER_PAGE, MAX_PER_PAGE};
use tracing::warn;

use crate::errors::ClientError;

/// Default id of the user the client acts as.
const DEFAULT_USER_ID: u64 = 1;

/// Default cap on each suggestion list.
const DEFAULT_SUGGESTIONS_LIMIT: usize = 5;

/// Default number of comments fetched for a thread.
const DEFAULT_COMMENTS_PER_PAGE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub fixture_path: PathBuf,
    pub user_id: u64,
    pub search_per_page: u32,
    pub suggestions_limit: usize,
    pub comments_per_page: u32,
    pub reply_loading: ReplyLoading,
}

fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl ClientConfig {
    /// Read the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DISCUSSION_FIXTURE`: Path to the JSON fixture backing the client (required)
    /// - `DISCUSSION_USER_ID`: Id of the acting user (default: 1)
    /// - `SEARCH_PER_PAGE`: Results per search sub-collection page (default: 10, max: 100)
    /// - `SUGGESTIONS_LIMIT`: Cap on each suggestion list (default: 5)
    /// - `COMMENTS_PER_PAGE`: Comments fetched per thread page (default: 20)
    /// - `REPLY_LOADING`: "embedded" or "paginated" (default: paginated)
    ///
    /// # Returns
    ///
    /// * `Ok(ClientConfig)` - The parsed configuration
    /// * `Err(ClientError::Config)` - If `DISCUSSION_FIXTURE` is not set
    pub fn from_env() -> Result<Self, ClientError> {
        let fixture_path = env::var("DISCUSSION_FIXTURE")
            .map(PathBuf::from)
            .map_err(|_| ClientError::config("DISCUSSION_FIXTURE must be set"))?;

        let reply_loading = match env::var("REPLY_LOADING") {
            Ok(raw) => raw.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Invalid REPLY_LOADING, defaulting to 'paginated'");
                ReplyLoading::Paginated
            }),
            Err(_) => ReplyLoading::Paginated,
        };

        Ok(Self {
            fixture_path,
            user_id: parse_or("DISCUSSION_USER_ID", DEFAULT_USER_ID),
            search_per_page: parse_or("SEARCH_PER_PAGE", DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE),
            suggestions_limit: parse_or("SUGGESTIONS_LIMIT", DEFAULT_SUGGESTIONS_LIMIT),
            comments_per_page: parse_or("COMMENTS_PER_PAGE", DEFAULT_COMMENTS_PER_PAGE).max(1),
            reply_loading,
        })
    }
}
