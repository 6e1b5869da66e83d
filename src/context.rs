//! Builds the context block attached to a question: a summary of the
//! uploaded file with an excerpt of its content, and any pasted code.

use crate::analysis;
use crate::session::Artifact;

/// Characters of raw file content included in the context.
pub const FILE_EXCERPT_CHARS: usize = 2000;
/// Characters shown when previewing an upload.
pub const UPLOAD_PREVIEW_CHARS: usize = 1000;

/// First `limit` characters of `content`, with "..." appended when
/// anything was cut.
pub fn preview(content: &str, limit: usize) -> String {
    let mut chars = content.chars();
    let mut out: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}

fn file_block(artifact: &Artifact) -> String {
    let summary = analysis::summarize(&artifact.filename, &artifact.content);
    format!(
        "**Uploaded File Context:**\n{}\n\n**File Content:**\n```\n{}\n```",
        summary,
        preview(&artifact.content, FILE_EXCERPT_CHARS)
    )
}

fn code_block(code: &str) -> String {
    format!("**Code Snippet:**\n```\n{code}\n```")
}

/// Returns an empty string when there is nothing to add, in which
/// case the context is left out of the request entirely.
pub fn build_context(artifact: Option<&Artifact>, code: Option<&str>) -> String {
    let mut blocks = Vec::new();

    if let Some(artifact) = artifact {
        blocks.push(file_block(artifact));
    }

    if let Some(code) = code.filter(|c| !c.trim().is_empty()) {
        blocks.push(code_block(code));
    }

    blocks.join("\n\n")
}
