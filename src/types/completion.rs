//! Wire types for the provider's completion endpoints.
//!
//! Only the fields this crate reads are modelled; everything else in the
//! provider's response is ignored.

use serde::Deserialize;
use serde_json::Value;

use super::result::TokenUsage;

#[derive(Debug, Clone, Deserialize)]
pub struct TextCompletionResponse {
    pub choices: Vec<TextChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextChoice {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
}

/// Assistant turn. Tool calls stay as raw JSON so a single malformed call
/// can be reported back to the model instead of failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<Value>>,
}
