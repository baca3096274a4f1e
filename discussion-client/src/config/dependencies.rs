//! Dependency initialization and wiring for the discussion client.
use std::sync::Arc;

use discussion_core::{SearchService, VoteCoordinator};
use discussion_repository::{Fixture, MemoryRepository};
use tracing::info;

use crate::config::ClientConfig;
use crate::errors::ClientError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub config: ClientConfig,
    /// Store of record the services talk to.
    pub repository: Arc<MemoryRepository>,
    pub search: SearchService,
    pub votes: VoteCoordinator,
}

impl Dependencies {
    /// Load the fixture and wire the services around it.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ClientError::Repository)` - If the fixture cannot be read or parsed
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        info!(
            fixture = %config.fixture_path.display(),
            user_id = config.user_id,
            reply_loading = ?config.reply_loading,
            "Initializing dependencies"
        );

        let fixture = Fixture::load(&config.fixture_path)?;
        info!(
            protocols = fixture.protocols.len(),
            threads = fixture.threads.len(),
            comments = fixture.comments.len(),
            "Fixture loaded"
        );

        let repository = Arc::new(MemoryRepository::new(fixture, config.user_id));
        let search = SearchService::new(repository.clone(), config.suggestions_limit);
        let votes = VoteCoordinator::new(repository.clone());

        Ok(Self {
            config,
            repository,
            search,
            votes,
        })
    }
}
