//! Public types for the analyze API
use serde::{Deserialize, Serialize};

use crate::analysis::FileKind;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub filename: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub kind: FileKind,
    pub summary: String,
}
