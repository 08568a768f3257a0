//! lexos library interface
//!
//! Looks up standardized reading-difficulty metrics for a book by ISBN by
//! driving one shared headless browser against two catalog sites, and
//! streams the combined result to callers over a WebSocket.

pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod extract;
pub mod isbn;

pub use crate::error::{ApiError, Error, Result};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use crate::browser::BrowserPool;
use crate::config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Shared browser engine; each request borrows one tab from it
    pub pool: Arc<BrowserPool>,
    /// Service configuration, including the site locator tables
    pub config: Arc<Config>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pool: Arc<BrowserPool>, config: Arc<Config>) -> Self {
        Self {
            pool,
            config,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::lookup_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
