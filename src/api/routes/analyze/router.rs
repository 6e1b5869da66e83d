//! Router for previewing file analysis without a session

use std::sync::{Arc, RwLock};

use axum::{Json, Router, routing::post};

use super::public;
use crate::analysis;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn analyze(Json(payload): Json<public::AnalyzeRequest>) -> Json<public::AnalyzeResponse> {
    let kind = analysis::classify(&payload.filename, &payload.content);
    let summary = analysis::summarize(&payload.filename, &payload.content);
    Json(public::AnalyzeResponse { kind, summary })
}

/// Create the analyze router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(analyze))
}
