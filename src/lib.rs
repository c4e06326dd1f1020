//! pet-namer-rs: pet name suggestions from a hosted language model
//!
//! A prompt template is filled with an animal type and a color and sent to an
//! OpenAI-compatible text-completion endpoint. The crate also ships a small
//! tool-calling agent with a Wikipedia lookup and a single-page web form.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pet_namer_rs::{CompletionConfig, NameChain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_key = std::env::var("OPENAI_API_KEY")?;
//!     let chain = NameChain::from_config(CompletionConfig::for_names(api_key))?;
//!
//!     let names = chain.generate_pet_name("cat", "Brown").await?;
//!     println!("{}", names);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod llm;
pub mod prompts;
pub(crate) mod services;
pub mod tools;
pub mod types;
pub mod web;

pub use config::Settings;
pub use crate::core::{
    Agent, AgentMemory, AgentStep, Ask, NameChain, RunResult, TokenUsage, DEFAULT_QUESTION,
};
pub use error::{PetNameError, Result};
pub use llm::{CompletionClient, CompletionConfig, OpenAI};
pub use prompts::{pet_name_prompt, PromptRequest, PromptTemplate};
pub use tools::{FunctionFactory, Tool, WikipediaTool};

#[cfg(feature = "cli")]
pub mod cli;
