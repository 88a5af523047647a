//! Bookmark record and request types

use serde::{Deserialize, Serialize};

/// Rating assigned when a create request omits one
pub const DEFAULT_RATING: &str = "3";

/// A saved link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    #[serde(rename = "bookTitle")]
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub rating: Rating,
}

/// Rating as submitted by the client.
///
/// Clients send either a JSON number or a numeric string; the record keeps
/// whichever form it was given and echoes it back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    Number(serde_json::Number),
    Text(String),
}

impl Rating {
    /// Numeric value of the rating, `None` if it is not a finite number
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Rating::Number(n) => n.as_f64()?,
            Rating::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Rating::Text(DEFAULT_RATING.to_string())
    }
}

/// Body of `POST /bookmarks`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateBookmarkRequest {
    pub title: Option<String>,
    pub link: Option<String>,
    pub desc: Option<String>,
    pub rating: Option<Rating>,
}

impl CreateBookmarkRequest {
    /// Build the stored record, filling defaults and assigning a fresh id.
    ///
    /// Callers validate the request first; see `BookmarkValidator::validate`.
    pub fn into_bookmark(self) -> Bookmark {
        let link = self.link.unwrap_or_default();
        let title = self
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| link.clone());

        Bookmark {
            id: uuid::Uuid::new_v4().to_string(),
            title,
            link,
            desc: self.desc.unwrap_or_default(),
            rating: self.rating.unwrap_or_default(),
        }
    }
}
