//! In-memory backend for tests and local development.
//!
//! The `MemoryRepository` is loaded from a JSON `Fixture` and implements every
//! collaborator interface, so the core can run without network access.
mod fixture;
mod repository;

pub use fixture::Fixture;
pub use repository::MemoryRepository;
