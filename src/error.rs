//! Error types for the Bookmarks service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Not found error
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for Core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// A rejected create request. The display text is what the client sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Link required")]
    LinkRequired,

    #[error("Valid URL required")]
    InvalidUrl,

    #[error("Description exceeds character limit")]
    DescriptionTooLong,

    #[error("Rating must be between zero and five")]
    RatingOutOfRange,
}

/// Error returned by HTTP handlers, rendered as a plain-text body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client input failed validation (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed request body (400)
    #[error("{0}")]
    BadRequest(String),

    /// Referenced record does not exist (404)
    #[error("{0}")]
    NotFound(&'static str),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::LinkRequired.to_string(), "Link required");
        assert_eq!(ValidationError::InvalidUrl.to_string(), "Valid URL required");
        assert_eq!(
            ValidationError::DescriptionTooLong.to_string(),
            "Description exceeds character limit"
        );
        assert_eq!(
            ValidationError::RatingOutOfRange.to_string(),
            "Rating must be between zero and five"
        );
    }

    #[test]
    fn test_api_error_status() {
        let err = ApiError::from(ValidationError::InvalidUrl);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Valid URL required");

        let err = ApiError::NotFound("Bookmark Not Found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Bookmark Not Found");
    }
}
