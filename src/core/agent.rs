use async_trait::async_trait;

use crate::{
    core::memory::DEFAULT_SYSTEM_PROMPT,
    error::{PetNameError, Result},
    llm::CompletionConfig,
    services::openai_client::OpenAIClient,
    tools::{FunctionFactory, WikipediaTool},
    types::completion::ChatCompletionResponse,
};
use serde_json::Value;

/// Question asked by the `agent` command when none is given.
pub const DEFAULT_QUESTION: &str = "What is the average lifespan of a domestic cat?";

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Something that can answer a natural-language question.
#[async_trait]
pub trait Ask: Send + Sync {
    async fn ask(&self, question: &str) -> Result<String>;
}

/// Tool-calling agent over the chat-completions endpoint
#[derive(Debug)]
pub struct Agent {
    openai_client: OpenAIClient,
    function_factory: FunctionFactory,
    config: CompletionConfig,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    pub fn new(config: CompletionConfig, function_factory: FunctionFactory) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PetNameError::Config("API key must not be empty".to_string()));
        }

        let openai_client = OpenAIClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
            config.request_timeout,
        )?;

        Ok(Self {
            openai_client,
            function_factory,
            config,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        })
    }

    /// Agent with the Wikipedia lookup registered.
    pub fn with_wikipedia(config: CompletionConfig, wikipedia: WikipediaTool) -> Result<Self> {
        let mut function_factory = FunctionFactory::new();
        function_factory.register_tool(wikipedia);
        Self::new(config, function_factory)
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub(crate) fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub(crate) fn function_factory(&self) -> &FunctionFactory {
        &self.function_factory
    }

    pub(crate) fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub(crate) fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Run the loop and return only the answer text
    pub async fn run(&self, question: &str) -> Result<String> {
        Ok(self.run_with_steps(question).await?.output)
    }

    pub(crate) async fn make_raw_request(&self, request_body: &Value) -> Result<ChatCompletionResponse> {
        self.openai_client.chat_completion(request_body).await
    }
}

#[async_trait]
impl Ask for Agent {
    async fn ask(&self, question: &str) -> Result<String> {
        self.run(question).await
    }
}
