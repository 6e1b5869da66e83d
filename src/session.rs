//! Per-user conversation state: the message history, the current
//! upload and the API key. Everything is owned by a `Session` and
//! mutated through its methods.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::{self, FileKind};
use crate::core::AssistError;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Speaker,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: Speaker::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Speaker::Assistant,
            content: content.to_string(),
        }
    }
}

/// An uploaded text file. Only lives as long as the session.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub filename: String,
    pub content: String,
}

impl Artifact {
    pub fn kind(&self) -> FileKind {
        analysis::classify(&self.filename, &self.content)
    }
}

/// API key that never shows up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// `None` for an empty or blank key.
    pub fn new(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.is_empty() {
            None
        } else {
            Some(Self(key.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Debug, Default)]
pub struct Session {
    messages: Vec<ChatMessage>,
    artifact: Option<Artifact>,
    api_key: Option<ApiKey>,
}

impl Session {
    pub fn new(api_key: Option<ApiKey>) -> Self {
        Self {
            messages: Vec::new(),
            artifact: None,
            api_key,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The last `window` messages, oldest first.
    pub fn recent_messages(&self, window: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(window);
        &self.messages[start..]
    }

    pub fn push(&mut self, msg: ChatMessage) {
        self.messages.push(msg)
    }

    pub fn artifact(&self) -> Option<&Artifact> {
        self.artifact.as_ref()
    }

    /// Replace the current upload. The bytes must be valid UTF-8 and
    /// the file type supported; on error the previous upload stays.
    pub fn upload(&mut self, filename: &str, bytes: &[u8]) -> Result<&Artifact, AssistError> {
        if !analysis::is_accepted(filename) {
            return Err(AssistError::UnsupportedFile {
                filename: filename.to_string(),
            });
        }
        let content = std::str::from_utf8(bytes).map_err(|source| AssistError::Decode {
            filename: filename.to_string(),
            source,
        })?;

        tracing::info!("Uploaded {} ({} bytes)", filename, bytes.len());
        Ok(&*self.artifact.insert(Artifact {
            filename: filename.to_string(),
            content: content.to_string(),
        }))
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    pub fn set_api_key(&mut self, api_key: Option<ApiKey>) {
        self.api_key = api_key;
    }

    /// Drop the history and the upload together. The API key stays.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.artifact = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_serialization() {
        assert_eq!(serde_json::to_string(&Speaker::User).unwrap(), r#""user""#);
        assert_eq!(
            serde_json::to_string(&ChatMessage::assistant("hi")).unwrap(),
            r#"{"role":"assistant","content":"hi"}"#
        );
    }

    #[test]
    fn test_api_key() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("   ").is_none());
        let key = ApiKey::new(" sk-test ").unwrap();
        assert_eq!(key.expose(), "sk-test");
        assert_eq!(format!("{:?}", key), "ApiKey(****)");
    }

    #[test]
    fn test_upload_replaces_artifact() {
        let mut session = Session::default();
        session.upload("a.fa", b">a\nACGT").unwrap();
        session.upload("b.csv", b"x,y\n1,2").unwrap();
        let artifact = session.artifact().unwrap();
        assert_eq!(artifact.filename, "b.csv");
        assert_eq!(artifact.kind(), FileKind::Csv);
    }

    #[test]
    fn test_upload_decode_error_keeps_previous() {
        let mut session = Session::default();
        session.upload("a.fa", b">a\nACGT").unwrap();
        let err = session.upload("b.txt", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, AssistError::Decode { .. }));
        assert_eq!(session.artifact().unwrap().filename, "a.fa");
    }

    #[test]
    fn test_upload_rejects_unsupported_extension() {
        let mut session = Session::default();
        let err = session.upload("photo.png", b"data").unwrap_err();
        assert!(matches!(err, AssistError::UnsupportedFile { .. }));
        assert!(session.artifact().is_none());
    }

    #[test]
    fn test_recent_messages() {
        let mut session = Session::default();
        assert!(session.recent_messages(10).is_empty());
        for i in 0..15 {
            session.push(ChatMessage::user(&i.to_string()));
        }
        let recent = session.recent_messages(10);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].content, "5");
        assert_eq!(recent[9].content, "14");
    }

    #[test]
    fn test_clear() {
        let mut session = Session::new(ApiKey::new("sk-test"));
        session.push(ChatMessage::user("hi"));
        session.upload("a.txt", b"hello").unwrap();
        session.clear();
        assert!(session.messages().is_empty());
        assert!(session.artifact().is_none());
        assert!(session.api_key().is_some());
    }
}
