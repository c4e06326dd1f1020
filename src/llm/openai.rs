use async_trait::async_trait;

use super::{CompletionClient, CompletionConfig};
use crate::{
    error::{PetNameError, Result},
    services::openai_client::{CompletionRequest, OpenAIClient},
};

/// Text-completion model served by an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAI {
    client: OpenAIClient,
    config: CompletionConfig,
}

impl OpenAI {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PetNameError::Config("API key must not be empty".to_string()));
        }

        let client = OpenAIClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.request_timeout,
        )?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for OpenAI {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = CompletionRequest::new(&self.config.model, prompt, self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
            .into_value();

        let response = self.client.completion(&body).await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| {
                PetNameError::MalformedResponse("completion response contained no choices".to_string())
            })
    }
}
