//! Router for conversation sessions

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::public;
use crate::api::public::ApiError;
use crate::api::state::{AppState, SessionHandle};
use crate::assistant::{Submission, submit};
use crate::context::{UPLOAD_PREVIEW_CHARS, preview};
use crate::session::ApiKey;

type SharedState = Arc<RwLock<AppState>>;

fn find_session(state: &SharedState, id: &str) -> Option<SessionHandle> {
    state.read().expect("Unable to read share state").session(id)
}

fn not_found(id: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("Session {} not found", id)).into_response()
}

/// Start a new conversation
async fn create_session(State(state): State<SharedState>) -> Json<public::CreateSessionResponse> {
    let session_id = state
        .write()
        .expect("Unable to write share state")
        .create_session();
    Json(public::CreateSessionResponse { session_id })
}

/// Get the transcript and upload of a session
async fn get_session(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let Some(handle) = find_session(&state, &id) else {
        return not_found(&id);
    };
    let session = handle.lock().await;

    Json(public::SessionResponse {
        messages: session.messages().to_vec(),
        artifact: session.artifact().map(|a| public::ArtifactInfo {
            filename: a.filename.clone(),
            kind: a.kind(),
            size: a.content.len(),
        }),
        has_credential: session.api_key().is_some(),
    })
    .into_response()
}

/// Clear the conversation and the uploaded file
async fn reset_session(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let Some(handle) = find_session(&state, &id) else {
        return not_found(&id);
    };
    handle.lock().await.clear();
    tracing::info!("Cleared session {}", id);
    StatusCode::NO_CONTENT.into_response()
}

/// End a session and drop everything it holds
async fn delete_session(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let removed = state
        .write()
        .expect("Unable to write share state")
        .remove_session(&id);
    if removed {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&id)
    }
}

async fn set_credential(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<public::CredentialRequest>,
) -> Response {
    let Some(handle) = find_session(&state, &id) else {
        return not_found(&id);
    };
    let api_key = payload.api_key.as_deref().and_then(ApiKey::new);
    handle.lock().await.set_api_key(api_key);
    StatusCode::NO_CONTENT.into_response()
}

/// Replace the session's uploaded file
async fn upload(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<public::UploadRequest>,
) -> Result<Response, ApiError> {
    let Some(handle) = find_session(&state, &id) else {
        return Ok(not_found(&id));
    };
    let Ok(bytes) = STANDARD.decode(payload.content.as_bytes()) else {
        return Ok((
            StatusCode::BAD_REQUEST,
            format!("Error reading file {}: invalid base64", payload.filename),
        )
            .into_response());
    };

    let mut session = handle.lock().await;
    let artifact = session.upload(&payload.filename, &bytes)?;

    Ok(Json(public::UploadResponse {
        filename: artifact.filename.clone(),
        kind: artifact.kind(),
        preview: preview(&artifact.content, UPLOAD_PREVIEW_CHARS),
    })
    .into_response())
}

/// Ask a question, optionally with a code snippet, and wait for the
/// reply
async fn chat(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(payload): Json<Submission>,
) -> Result<Response, ApiError> {
    let Some(handle) = find_session(&state, &id) else {
        return Ok(not_found(&id));
    };
    let (model, history_window) = {
        let shared_state = state.read().expect("Unable to read share state");
        (
            Arc::clone(&shared_state.model),
            shared_state.config.history_window,
        )
    };

    let mut session = handle.lock().await;
    let reply = submit(&mut session, &payload, model.as_ref(), history_window).await?;

    Ok(Json(public::ChatReplyResponse { reply }).into_response())
}

/// Request body limit for an upload of `max_upload_bytes`: base64
/// grows the file by a third, plus room for the JSON around it.
pub fn upload_body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.div_ceil(3) * 4 + 64 * 1024
}

/// Create the sessions router
pub fn router(max_upload_bytes: usize) -> Router<SharedState> {
    Router::new()
        .route("/", post(create_session))
        .route(
            "/{id}",
            axum::routing::get(get_session).delete(delete_session),
        )
        .route("/{id}/reset", post(reset_session))
        .route("/{id}/credential", put(set_credential))
        .route(
            "/{id}/upload",
            post(upload).layer(DefaultBodyLimit::max(upload_body_limit(max_upload_bytes))),
        )
        .route("/{id}/chat", post(chat))
}
