//! Field validation for new and seeded bookmarks

use super::model::{Bookmark, CreateBookmarkRequest, Rating};
use crate::error::ValidationError;
use regex::Regex;

/// Longest accepted description, in UTF-16 code units (a character outside
/// the Basic Multilingual Plane, such as most emoji, counts twice)
pub const MAX_DESC_LEN: usize = 140;

/// Inclusive bounds of a rating
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

const URL_PATTERN: &str = r"https?://(www\.)?[-a-zA-Z0-9@:%._\+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}(?-u:\b)([-a-zA-Z0-9()@:%_\+.~#?&/=]*)";

/// Checks bookmark fields in a fixed order; the first failing rule wins.
pub struct BookmarkValidator {
    url_regex: Regex,
}

impl BookmarkValidator {
    pub fn new() -> Self {
        Self {
            url_regex: Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"),
        }
    }

    /// Whether `link` contains something shaped like an http(s) URL
    pub fn is_valid_link(&self, link: &str) -> bool {
        self.url_regex.is_match(link)
    }

    /// Validate a create request
    pub fn validate(&self, req: &CreateBookmarkRequest) -> Result<(), ValidationError> {
        self.check(req.link.as_deref(), req.desc.as_deref(), req.rating.as_ref())
    }

    /// Validate an already-built record, e.g. one loaded from a seed file
    pub fn validate_bookmark(&self, bookmark: &Bookmark) -> Result<(), ValidationError> {
        self.check(
            Some(&bookmark.link),
            Some(&bookmark.desc),
            Some(&bookmark.rating),
        )
    }

    fn check(
        &self,
        link: Option<&str>,
        desc: Option<&str>,
        rating: Option<&Rating>,
    ) -> Result<(), ValidationError> {
        let link = match link {
            Some(link) if !link.is_empty() => link,
            _ => return Err(ValidationError::LinkRequired),
        };

        if !self.is_valid_link(link) {
            return Err(ValidationError::InvalidUrl);
        }

        if desc.is_some_and(|d| d.encode_utf16().count() > MAX_DESC_LEN) {
            return Err(ValidationError::DescriptionTooLong);
        }

        if let Some(rating) = rating {
            match rating.value() {
                Some(v) if (MIN_RATING..=MAX_RATING).contains(&v) => {}
                _ => return Err(ValidationError::RatingOutOfRange),
            }
        }

        Ok(())
    }
}

impl Default for BookmarkValidator {
    fn default() -> Self {
        Self::new()
    }
}
