//! The submit pipeline: build the context for a question, ask the
//! model, and record both sides of the exchange in the session.

use std::fmt;

use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::ai::prompt;
use crate::context::build_context;
use crate::core::AssistError;
use crate::openai::{ChatModel, Message, Role};
use crate::session::{ChatMessage, Session};

/// Languages offered for pasted code snippets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    R,
    Java,
    #[serde(alias = "c++")]
    #[value(alias = "c++")]
    Cpp,
    #[serde(alias = "js")]
    #[value(name = "javascript", alias = "js")]
    JavaScript,
    Shell,
    Sql,
    Other,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Language::Python => "Python",
            Language::R => "R",
            Language::Java => "Java",
            Language::Cpp => "C++",
            Language::JavaScript => "JavaScript",
            Language::Shell => "Shell",
            Language::Sql => "SQL",
            Language::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Everything the user sent in one go.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// Messages sent upstream for one turn: the system prompt, the
/// recent history, the context (if any) and the question.
pub fn build_request(
    history: &[ChatMessage],
    context: &str,
    question: &str,
) -> Result<Vec<Message>, Error> {
    let mut messages = vec![Message::new(Role::System, &prompt::system()?)];
    messages.extend(history.iter().map(Message::from));
    if !context.is_empty() {
        messages.push(Message::new(Role::User, &prompt::context(context)?));
    }
    messages.push(Message::new(Role::User, question));
    Ok(messages)
}

/// Fill in a question when only code or a file was provided.
fn resolve_question(
    submission: &Submission,
    code: Option<&str>,
    has_artifact: bool,
    context: &str,
) -> Result<Option<String>, Error> {
    let question = submission
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    if let Some(question) = question {
        return Ok(Some(question.to_string()));
    }
    if context.is_empty() {
        return Ok(None);
    }
    if code.is_some() {
        return Ok(Some(prompt::explain_code(&submission.language.to_string())?));
    }
    if has_artifact {
        return Ok(Some(prompt::analyze_file()?));
    }
    Ok(None)
}

/// Run one turn of the conversation.
///
/// Missing input or a missing API key are returned as `AssistError`
/// without touching the session. A failed model call is recorded as
/// the assistant's reply so the transcript stays in sync.
pub async fn submit(
    session: &mut Session,
    submission: &Submission,
    model: &dyn ChatModel,
    history_window: usize,
) -> Result<ChatMessage, Error> {
    let code = submission
        .code
        .as_deref()
        .filter(|c| !c.trim().is_empty());
    let context = build_context(session.artifact(), code);

    let question = resolve_question(submission, code, session.artifact().is_some(), &context)?
        .ok_or(AssistError::EmptySubmission)?;

    let api_key = session
        .api_key()
        .cloned()
        .ok_or(AssistError::Configuration)?;

    let request = build_request(session.recent_messages(history_window), &context, &question)?;
    tracing::debug!(
        "Submitting question with {} messages and {} chars of context",
        request.len(),
        context.len()
    );

    let display = if context.is_empty() {
        question
    } else {
        format!("{question}\n\n{context}")
    };
    session.push(ChatMessage::user(&display));

    let reply = match model.reply(&api_key, &request).await {
        Ok(content) => ChatMessage::assistant(&content),
        Err(e) => {
            tracing::error!("Chat request failed: {}. Root cause: {}", e, e.root_cause());
            ChatMessage::assistant(&format!(
                "Error getting AI response: {e}\n\nPlease check your API key and try again."
            ))
        }
    };
    session.push(reply.clone());

    Ok(reply)
}
