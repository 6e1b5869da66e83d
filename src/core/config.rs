use std::env;
use std::str::FromStr;

pub const DEFAULT_API_HOSTNAME: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_HISTORY_WINDOW: usize = 10;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    // Seeds the credential of every new session. Sessions can override it.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    // Number of prior messages replayed to the model on each turn
    pub history_window: usize,
    // Largest file accepted by the upload endpoint, before base64
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let openai_api_hostname = env::var("BIOHELPER_LLM_HOST")
            .unwrap_or_else(|_| DEFAULT_API_HOSTNAME.to_string());
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let openai_model =
            env::var("BIOHELPER_LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = parse_env("BIOHELPER_LLM_TEMPERATURE", DEFAULT_TEMPERATURE);
        let max_tokens = parse_env("BIOHELPER_LLM_MAX_TOKENS", DEFAULT_MAX_TOKENS);
        let history_window = parse_env("BIOHELPER_HISTORY_WINDOW", DEFAULT_HISTORY_WINDOW);
        let max_upload_bytes = parse_env("BIOHELPER_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            temperature,
            max_tokens,
            history_window,
            max_upload_bytes,
        }
    }
}

/// Reads a numeric env var, falling back to `default` when it is
/// unset or can't be parsed.
fn parse_env<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
