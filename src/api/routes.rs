//! HTTP route handlers for the API

use super::AppState;
use crate::bookmarks::{Bookmark, CreateBookmarkRequest};
use crate::error::ApiError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "bookmarks": state.store.len()
    }))
}

// ============================================================================
// Bookmarks
// ============================================================================

/// GET /bookmarks - All bookmarks in insertion order
pub async fn list_bookmarks(State(state): State<AppState>) -> Json<Vec<Bookmark>> {
    Json(state.store.list())
}

/// POST /bookmarks - Validate and store a new bookmark
pub async fn create_bookmark(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let req = parse_create_body(&headers, &body)?;

    state.validator.validate(&req)?;

    let bookmark = req.into_bookmark();
    let location = state.location_of(&bookmark.id);
    state.store.insert(bookmark.clone());

    tracing::info!("Bookmark with id {} created", bookmark.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(bookmark),
    ))
}

/// Decode a create body.
///
/// Requests without a JSON content type, or with an empty body, decode to an
/// empty request so validation reports the missing link.
fn parse_create_body(headers: &HeaderMap, body: &[u8]) -> Result<CreateBookmarkRequest, ApiError> {
    if !is_json_content(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CreateBookmarkRequest::default());
    }

    serde_json::from_slice(body).map_err(|e| {
        ApiError::BadRequest(format!("Failed to parse the request body as JSON: {}", e))
    })
}

fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// GET /bookmarks/:id - Fetch one bookmark
pub async fn get_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Bookmark>, ApiError> {
    match state.store.get(&id) {
        Some(bookmark) => Ok(Json(bookmark)),
        None => {
            tracing::error!("Bookmark with id {} not found.", id);
            Err(ApiError::NotFound("Bookmark Not Found"))
        }
    }
}

/// DELETE /bookmarks/:id - Remove one bookmark
pub async fn delete_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(&id).is_none() {
        tracing::error!("Bookmark with id {} not found.", id);
        return Err(ApiError::NotFound("Bookmark not found"));
    }

    tracing::info!("Bookmark with id {} deleted.", id);
    Ok(StatusCode::NO_CONTENT)
}
