use std::path::Path;

use discussion_shared::{Comment, Protocol, Review, Tag, Thread, Vote};
use serde::{Deserialize, Serialize};

use crate::errors::RepositoryError;

/// Seed data for a `MemoryRepository`.
///
/// Entity counters in the fixture are taken as already including the listed
/// `votes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub protocols: Vec<Protocol>,
    #[serde(default)]
    pub threads: Vec<Thread>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl Fixture {
    /// Parse a fixture from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a fixture file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a JSON fixture file
    ///
    /// # Returns
    ///
    /// * `Ok(Fixture)` - The parsed fixture
    /// * `Err(RepositoryError::Unavailable)` - If the file cannot be read
    /// * `Err(RepositoryError::Serialization)` - If the file is not a valid fixture
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::unavailable(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}
