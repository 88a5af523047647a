//! Bookmarks - small REST service for saving and rating links
//!
//! This crate provides:
//! - An in-memory, insertion-ordered bookmark store
//! - Create-time validation of links, descriptions and ratings
//! - An axum HTTP API to list, create, fetch and delete bookmarks
//! - File and console log sinks driven by configuration
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use bookmarks::{Config, Service};
//!
//! let service = Service::new(Config::default()).unwrap();
//! service.start_api_server().await.unwrap();
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! bookmarks --config ~/.bookmarks/config.toml
//! ```

pub mod api;
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod logging;

// Re-export main types for convenience
pub use bookmarks::{Bookmark, BookmarkStore, BookmarkValidator};
pub use config::Config;
pub use error::{ApiError, CoreError, Result, ValidationError};

use std::sync::Arc;

/// Owns the configuration and the bookmark store for one server process
pub struct Service {
    /// Configuration
    pub config: Config,

    /// Bookmark collection shared with the HTTP handlers
    store: Arc<BookmarkStore>,
}

impl Service {
    /// Create a service, pre-populating the store from `store.seed_file` if set
    pub fn new(config: Config) -> Result<Self> {
        let store = match config.seed_file() {
            Some(path) => BookmarkStore::from_seed_file(path, &BookmarkValidator::new())?,
            None => BookmarkStore::new(),
        };

        Ok(Service {
            config,
            store: Arc::new(store),
        })
    }

    /// Get a reference to the bookmark store
    pub fn store(&self) -> &Arc<BookmarkStore> {
        &self.store
    }

    /// Start the HTTP API server (blocks until shutdown)
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting API server on {}", addr);
        api::serve(addr, self.store.clone(), &self.config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_seed_is_empty() {
        let service = Service::new(Config::default()).unwrap();
        assert!(service.store().is_empty());
    }

    #[test]
    fn test_new_with_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        std::fs::write(
            &seed,
            r#"[{"id": "seed-1", "bookTitle": "Example", "link": "https://example.com"}]"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.store.seed_file = Some(seed);

        let service = Service::new(config).unwrap();
        assert_eq!(service.store().len(), 1);
        assert!(service.store().get("seed-1").is_some());
    }

    #[test]
    fn test_new_with_invalid_seed_fails() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("seed.json");
        std::fs::write(
            &seed,
            r#"[{"id": "bad", "bookTitle": "Bad", "link": "nope"}]"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.store.seed_file = Some(seed);

        assert!(matches!(
            Service::new(config),
            Err(CoreError::Validation(ValidationError::InvalidUrl))
        ));
    }
}
