//! HTTP API module for the Bookmarks service
//!
//! Provides REST endpoints to list, create, fetch and delete bookmarks.

pub mod routes;

use crate::bookmarks::{BookmarkStore, BookmarkValidator};
use crate::config::Config;
use crate::error::{CoreError, Result};

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Bookmark collection
    pub store: Arc<BookmarkStore>,
    /// Create-request validator
    pub validator: Arc<BookmarkValidator>,
    /// Base address for `Location` headers, without trailing slash
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<BookmarkStore>, public_url: impl Into<String>) -> Self {
        let public_url: String = public_url.into();
        AppState {
            store,
            validator: Arc::new(BookmarkValidator::new()),
            public_url: Arc::from(public_url.trim_end_matches('/')),
        }
    }

    /// Address clients use to fetch the bookmark with `id`
    pub fn location_of(&self, id: &str) -> String {
        format!("{}/bookmarks/{}", self.public_url, id)
    }
}

/// Start the HTTP API server
pub async fn serve(addr: SocketAddr, store: Arc<BookmarkStore>, config: &Config) -> Result<()> {
    let state = AppState::new(store, config.public_url());
    let app = create_router(state);

    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CoreError::Api(e.to_string()))?;

    Ok(())
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/bookmarks",
            get(routes::list_bookmarks).post(routes::create_bookmark),
        )
        .route(
            "/bookmarks/:id",
            get(routes::get_bookmark).delete(routes::delete_bookmark),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_trims_trailing_slash() {
        let state = AppState::new(Arc::new(BookmarkStore::new()), "http://localhost:8000/");
        assert_eq!(
            state.location_of("abc"),
            "http://localhost:8000/bookmarks/abc"
        );
    }
}
