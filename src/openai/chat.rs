use anyhow::{Error, Result};
use async_trait::async_trait;

use super::core::{CompletionParams, Message, completion, completion_content};
use crate::core::AppConfig;
use crate::session::ApiKey;

/// Something that can answer a chat transcript with a single reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn reply(&self, api_key: &ApiKey, messages: &[Message]) -> Result<String, Error>;
}

/// Chat model backed by an OpenAI compatible API.
#[derive(Clone, Debug)]
pub struct OpenAiChat {
    api_hostname: String,
    params: CompletionParams,
}

impl OpenAiChat {
    pub fn new(api_hostname: &str, params: CompletionParams) -> Self {
        Self {
            api_hostname: api_hostname.to_string(),
            params,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.openai_api_hostname,
            CompletionParams {
                model: config.openai_model.clone(),
                temperature: config.temperature,
                max_tokens: config.max_tokens,
            },
        )
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn reply(&self, api_key: &ApiKey, messages: &[Message]) -> Result<String, Error> {
        tracing::debug!(
            "Requesting completion from {} with {} messages",
            self.params.model,
            messages.len()
        );
        let resp = completion(
            messages,
            &self.params,
            &self.api_hostname,
            api_key.expose(),
        )
        .await?;
        completion_content(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openai::Role;

    #[tokio::test]
    async fn test_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": "GC is 50%"}}]}"#)
            .create_async()
            .await;

        let config = AppConfig {
            openai_api_hostname: server.url(),
            openai_api_key: None,
            openai_model: "gpt-4".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            history_window: 10,
            max_upload_bytes: 1024,
        };
        let model = OpenAiChat::from_config(&config);
        let key = ApiKey::new("test-key").unwrap();
        let reply = model
            .reply(&key, &[Message::new(Role::User, "GC content?")])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply, "GC is 50%");
    }
}
