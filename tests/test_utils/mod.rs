//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex, RwLock};

use anyhow::{Error, Result};
use async_trait::async_trait;
use axum::{Router, body::Body};

use biohelper::api::AppState;
use biohelper::api::app;
use biohelper::core::AppConfig;
use biohelper::openai::{ChatModel, Message};
use biohelper::session::ApiKey;

/// Chat model that records requests and replies with the number of
/// messages it was sent.
#[derive(Default)]
pub struct RecordingModel {
    pub requests: Mutex<Vec<Vec<Message>>>,
}

#[async_trait]
impl ChatModel for RecordingModel {
    async fn reply(&self, _api_key: &ApiKey, messages: &[Message]) -> Result<String, Error> {
        self.requests.lock().unwrap().push(messages.to_vec());
        Ok(format!("Received {} messages", messages.len()))
    }
}

pub fn test_config(api_key: Option<&str>) -> AppConfig {
    AppConfig {
        openai_api_hostname: String::from("https://api.openai.com"),
        openai_api_key: api_key.map(String::from),
        openai_model: String::from("gpt-4"),
        temperature: 0.7,
        max_tokens: 2000,
        history_window: 10,
        max_upload_bytes: 50 * 1024 * 1024,
    }
}

/// Creates a test application router backed by `model`.
pub fn test_app_with(config: AppConfig, model: Arc<RecordingModel>) -> Router {
    let app_state = AppState::with_model(config, model);
    app(Arc::new(RwLock::new(app_state)))
}

/// Creates a test application router with an API key configured.
pub fn test_app() -> Router {
    test_app_with(
        test_config(Some("test-api-key")),
        Arc::new(RecordingModel::default()),
    )
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
