//! Public types for the sessions API
use serde::{Deserialize, Serialize};

use crate::analysis::FileKind;
use crate::session::ChatMessage;

#[derive(Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct ArtifactInfo {
    pub filename: String,
    pub kind: FileKind,
    // Size of the decoded content in bytes
    pub size: usize,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub messages: Vec<ChatMessage>,
    pub artifact: Option<ArtifactInfo>,
    pub has_credential: bool,
}

#[derive(Deserialize)]
pub struct CredentialRequest {
    // Empty or missing clears the key
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    // Base64 encoded file bytes
    pub content: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub kind: FileKind,
    pub preview: String,
}

#[derive(Serialize)]
pub struct ChatReplyResponse {
    pub reply: ChatMessage,
}
