//! API routes module

pub mod analyze;
pub mod sessions;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router(max_upload_bytes: usize) -> Router<SharedState> {
    Router::new()
        // Conversation sessions
        .nest("/sessions", sessions::router(max_upload_bytes))
        // Stateless file analysis
        .nest("/analyze", analyze::router())
}
