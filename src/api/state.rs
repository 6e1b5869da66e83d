use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::core::AppConfig;
use crate::openai::{ChatModel, OpenAiChat};
use crate::session::{ApiKey, Session};

/// A session behind its own lock so only one submission per session
/// runs at a time.
pub type SessionHandle = Arc<Mutex<Session>>;

pub struct AppState {
    pub config: AppConfig,
    pub model: Arc<dyn ChatModel>,
    sessions: HashMap<String, SessionHandle>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let model = Arc::new(OpenAiChat::from_config(&config));
        Self::with_model(config, model)
    }

    pub fn with_model(config: AppConfig, model: Arc<dyn ChatModel>) -> Self {
        Self {
            config,
            model,
            sessions: HashMap::new(),
        }
    }

    /// Start a session seeded with the configured API key and return
    /// its ID.
    pub fn create_session(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        let api_key = self
            .config
            .openai_api_key
            .as_deref()
            .and_then(ApiKey::new);
        self.sessions
            .insert(id.clone(), Arc::new(Mutex::new(Session::new(api_key))));
        tracing::info!("Created session {}", id);
        id
    }

    pub fn session(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.get(id).cloned()
    }

    /// Forget a session. Returns false if it didn't exist.
    pub fn remove_session(&mut self, id: &str) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            tracing::info!("Removed session {}", id);
        }
        removed
    }
}
