//! # Discussion Client
//!
//! Command line front end over the discussion core.
//!
//! ## Modules
//!
//! - [`config`]: Environment configuration and dependency wiring
//! - [`commands`]: Command parsing and execution
//! - [`errors`]: Error types for the client

pub mod commands;
pub mod config;
pub mod errors;

pub use commands::Command;
pub use config::{ClientConfig, Dependencies};
pub use errors::ClientError;
