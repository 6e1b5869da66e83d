//! Errors that are reported back to the user as-is. Anything else is
//! plumbing and travels as `anyhow::Error`.

use std::str::Utf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    /// No usable API key. The submission stops before any request is
    /// made and the history is left untouched.
    #[error("Please configure your OpenAI API key before asking a question.")]
    Configuration,
    #[error("Error reading file {filename}: {source}")]
    Decode {
        filename: String,
        #[source]
        source: Utf8Error,
    },
    #[error("Unsupported file type: {filename}")]
    UnsupportedFile { filename: String },
    #[error("Please enter a question or provide code/file to analyze.")]
    EmptySubmission,
}
