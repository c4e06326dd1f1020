//! Completion client capability and its configuration

pub mod openai;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

pub use openai::OpenAI;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 256;

/// Sampling temperature for pet name suggestions.
pub const NAME_TEMPERATURE: f64 = 0.7;
/// Sampling temperature for the agent.
pub const AGENT_TEMPERATURE: f64 = 0.5;

/// Anything that turns a prompt into completion text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send `prompt` and return the model's text unmodified.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Explicit provider configuration handed to a client's constructor.
#[derive(Clone, PartialEq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    /// `None` leaves the HTTP client's defaults in place.
    pub request_timeout: Option<Duration>,
}

impl CompletionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            temperature: NAME_TEMPERATURE,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            request_timeout: None,
        }
    }

    /// Settings used by the name generator.
    pub fn for_names(api_key: impl Into<String>) -> Self {
        Self::new(api_key).with_temperature(NAME_TEMPERATURE)
    }

    /// Settings used by the agent.
    pub fn for_agent(api_key: impl Into<String>) -> Self {
        Self::new(api_key)
            .with_model(DEFAULT_CHAT_MODEL)
            .with_temperature(AGENT_TEMPERATURE)
            .with_max_tokens(Some(1000))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &"*".repeat(self.api_key.len().min(8)))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
