use anyhow::{Error, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::session::{ChatMessage, Speaker};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

impl From<Speaker> for Role {
    fn from(speaker: Speaker) -> Self {
        match speaker {
            Speaker::User => Role::User,
            Speaker::Assistant => Role::Assistant,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

impl From<&ChatMessage> for Message {
    fn from(msg: &ChatMessage) -> Self {
        Message::new(msg.role.into(), &msg.content)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Send a chat completion request and return the raw JSON response.
/// Non-2xx responses are turned into errors carrying the API's error
/// message when there is one.
pub async fn completion(
    messages: &[Message],
    params: &CompletionParams,
    api_hostname: &str,
    api_key: &str,
) -> Result<Value, Error> {
    let payload = json!({
        "model": params.model,
        "messages": messages,
        "temperature": params.temperature,
        "max_tokens": params.max_tokens,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    let response = reqwest::Client::new()
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        // Error bodies aren't always JSON, only use them if they are
        let body: Value = response.json().await.unwrap_or(Value::Null);
        match body["error"]["message"].as_str() {
            Some(msg) => bail!("Chat API returned {}: {}", status, msg),
            None => bail!("Chat API returned {}", status),
        }
    }

    let body: Value = response.json().await?;
    Ok(body)
}

/// Pull the assistant's reply text out of a completion response.
pub fn completion_content(resp: &Value) -> Result<String, Error> {
    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or(anyhow!("No message received. Resp:\n\n {}", resp))
}
