//! In-memory bookmark store.
//!
//! Holds bookmarks in insertion order for the lifetime of the process.
//! Nothing is persisted; a seed file may pre-populate the store at startup.

use super::model::Bookmark;
use super::validation::BookmarkValidator;
use crate::error::{CoreError, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ordered bookmark collection shared between handlers.
///
/// Thread-safe via `RwLock`; every method takes the lock exactly once, so
/// a lookup-and-remove cannot interleave with another writer.
#[derive(Debug, Default)]
pub struct BookmarkStore {
    bookmarks: RwLock<Vec<Bookmark>>,
}

impl BookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records.
    ///
    /// Every record must pass validation and ids must be unique.
    pub fn with_bookmarks(bookmarks: Vec<Bookmark>, validator: &BookmarkValidator) -> Result<Self> {
        let mut seen = HashSet::new();
        for bookmark in &bookmarks {
            validator.validate_bookmark(bookmark)?;
            if !seen.insert(bookmark.id.as_str()) {
                return Err(CoreError::Config(format!(
                    "Duplicate bookmark id in seed data: {}",
                    bookmark.id
                )));
            }
        }

        Ok(BookmarkStore {
            bookmarks: RwLock::new(bookmarks),
        })
    }

    /// Load a JSON array of bookmarks from disk
    pub fn from_seed_file<P: AsRef<Path>>(path: P, validator: &BookmarkValidator) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::NotFound("Seed file", path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let bookmarks: Vec<Bookmark> = serde_json::from_str(&content)?;
        let store = Self::with_bookmarks(bookmarks, validator)?;

        tracing::info!("Loaded {} bookmarks from {}", store.len(), path.display());
        Ok(store)
    }

    /// Snapshot of all bookmarks in insertion order
    pub fn list(&self) -> Vec<Bookmark> {
        self.read().clone()
    }

    /// Append a bookmark to the end of the collection
    pub fn insert(&self, bookmark: Bookmark) {
        self.write().push(bookmark);
    }

    /// First bookmark with the given id
    pub fn get(&self, id: &str) -> Option<Bookmark> {
        self.read().iter().find(|b| b.id == id).cloned()
    }

    /// Remove the bookmark with the given id, keeping the order of the rest
    pub fn remove(&self, id: &str) -> Option<Bookmark> {
        let mut bookmarks = self.write();
        let index = bookmarks.iter().position(|b| b.id == id)?;
        Some(bookmarks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Poisoning is ignored: no write leaves the Vec in a partial state.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Bookmark>> {
        self.bookmarks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Bookmark>> {
        self.bookmarks.write().unwrap_or_else(PoisonError::into_inner)
    }
}
