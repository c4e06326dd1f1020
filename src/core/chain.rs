use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::{
    error::Result,
    llm::{CompletionClient, CompletionConfig, OpenAI},
    prompts::{pet_name_template, PromptRequest, PromptTemplate},
};

/// A prompt template piped into a completion client.
#[derive(Clone)]
pub struct NameChain {
    template: PromptTemplate,
    llm: Arc<dyn CompletionClient>,
}

impl NameChain {
    /// Chain using the built-in pet name template.
    pub fn new(llm: Arc<dyn CompletionClient>) -> Self {
        Self::with_template(pet_name_template(), llm)
    }

    /// Chain with a custom template over `animal_type` and `pet_color`.
    pub fn with_template(template: PromptTemplate, llm: Arc<dyn CompletionClient>) -> Self {
        Self { template, llm }
    }

    /// Build an [`OpenAI`] client from `config` and wrap it.
    pub fn from_config(config: CompletionConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(OpenAI::new(config)?)))
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Format the request and return the model's raw completion.
    pub async fn invoke(&self, request: &PromptRequest) -> Result<String> {
        let prompt = self.template.format(&request.as_values())?;
        debug!(prompt = %prompt, "invoking name chain");
        self.llm.complete(&prompt).await
    }

    pub async fn generate_pet_name(&self, animal_type: &str, pet_color: &str) -> Result<String> {
        self.invoke(&PromptRequest::new(animal_type, pet_color)).await
    }
}

impl fmt::Debug for NameChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameChain")
            .field("template", &self.template.template())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PetNameError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionClient for RecordingClient {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CompletionClient for FailingClient {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Err(PetNameError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_chain_formats_then_completes() {
        let client = Arc::new(RecordingClient::default());
        let chain = NameChain::new(client.clone());

        let output = chain.generate_pet_name("cat", "Brown").await.unwrap();

        let prompts = client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            "I have a cat and I want a name for it. Its Brown in color. Suggest me five cool names for my pet."
        );
        assert_eq!(output, format!("echo: {}", prompts[0]));
    }

    #[tokio::test]
    async fn test_chain_propagates_client_error() {
        let chain = NameChain::new(Arc::new(FailingClient));
        let err = chain.generate_pet_name("dog", "Black").await.unwrap_err();
        assert_eq!(err.error_code(), "API_ERROR");
    }

    #[tokio::test]
    async fn test_custom_template() {
        let client = Arc::new(RecordingClient::default());
        let template =
            PromptTemplate::new(["animal_type", "pet_color"], "{pet_color} {animal_type}").unwrap();
        let chain = NameChain::with_template(template, client.clone());

        chain.generate_pet_name("fox", "red").await.unwrap();
        assert_eq!(client.prompts.lock().unwrap()[0], "red fox");
    }
}
