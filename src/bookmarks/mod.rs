//! Bookmark domain: record types, create-time validation and the in-memory store.

pub mod model;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use model::{Bookmark, CreateBookmarkRequest, Rating};
pub use store::BookmarkStore;
pub use validation::BookmarkValidator;
