//! Process configuration, read once at startup.

use std::net::SocketAddr;
use std::time::Duration;

use crate::{
    core::agent::DEFAULT_MAX_ITERATIONS,
    error::{PetNameError, Result},
    llm::{CompletionConfig, DEFAULT_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_COMPLETION_MODEL},
    tools::wikipedia::DEFAULT_WIKIPEDIA_API_URL,
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub completion_model: String,
    pub chat_model: String,
    pub wikipedia_api_url: String,
    pub host: String,
    pub port: u16,
    pub max_iterations: usize,
    pub request_timeout: Option<Duration>,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    /// Values returned by `overrides` take precedence over both.
    pub fn from_env<F>(overrides: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| overrides(key).or_else(|| std::env::var(key).ok()))
    }

    /// Build settings from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").ok_or_else(|| {
            PetNameError::Config(
                "OPENAI_API_KEY environment variable must be set (or pass --api-key)".to_string(),
            )
        })?;

        let port = match get("PORT") {
            Some(value) => value.parse().map_err(|err| {
                PetNameError::Config(format!("PORT must be a port number: {}", err))
            })?,
            None => DEFAULT_PORT,
        };

        let max_iterations = match get("MAX_ITERATIONS") {
            Some(value) => value.parse().map_err(|err| {
                PetNameError::Config(format!("MAX_ITERATIONS must be a number: {}", err))
            })?,
            None => DEFAULT_MAX_ITERATIONS,
        };

        let request_timeout = get("REQUEST_TIMEOUT_SECS")
            .map(|value| {
                value.parse::<u64>().map(Duration::from_secs).map_err(|err| {
                    PetNameError::Config(format!("REQUEST_TIMEOUT_SECS must be seconds: {}", err))
                })
            })
            .transpose()?;

        Ok(Self {
            api_key,
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            completion_model: get("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            chat_model: get("OPENAI_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            wikipedia_api_url: get("WIKIPEDIA_API_URL")
                .unwrap_or_else(|| DEFAULT_WIKIPEDIA_API_URL.to_string()),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            max_iterations,
            request_timeout,
        })
    }

    /// Completion settings for the name generator (temperature 0.7).
    pub fn name_config(&self) -> CompletionConfig {
        CompletionConfig::for_names(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_model(self.completion_model.clone())
            .with_request_timeout(self.request_timeout)
    }

    /// Chat settings for the agent (temperature 0.5).
    pub fn agent_config(&self) -> CompletionConfig {
        CompletionConfig::for_agent(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_model(self.chat_model.clone())
            .with_request_timeout(self.request_timeout)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| PetNameError::Config(format!("Invalid HOST/PORT: {}", err)))
    }
}
