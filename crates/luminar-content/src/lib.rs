//! luminar-content — content backend integrations.
//!
//! Implements the `ContentSource` trait against a Directus instance, plus an
//! in-memory source for tests, and loads the `luminar.toml` configuration.

pub mod config;
pub mod directus;
pub mod mock;

pub use config::{create_source, load_config, LuminarConfig};
pub use directus::DirectusClient;
pub use mock::MockContentSource;
