use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{PetNameError, Result};
use crate::types::completion::{ChatCompletionResponse, TextCompletionResponse};

/// Thin HTTP wrapper around an OpenAI-compatible API. Every failure is
/// returned to the caller as-is; nothing is retried.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            http,
        })
    }

    pub async fn completion(&self, body: &Value) -> Result<TextCompletionResponse> {
        self.post_json("completions", body).await
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<ChatCompletionResponse> {
        self.post_json("chat/completions", body).await
    }

    async fn post_json<T: DeserializeOwned>(&self, endpoint: &str, body: &Value) -> Result<T> {
        let request_url = build_url(&self.base_url, endpoint);
        debug!(url = %request_url, "sending provider request");

        let response = self
            .http
            .post(&request_url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        let response_text = response.text().await?;

        debug!(status = status.as_u16(), "provider responded");

        if !status.is_success() {
            return Err(status_error(status, retry_after, &response_text));
        }

        if let Ok(value) = serde_json::from_str::<Value>(&response_text) {
            if let Some(error) = value.get("error").filter(|error| !error.is_null()) {
                return Err(PetNameError::Api {
                    status: status.as_u16(),
                    message: error_message(error),
                });
            }
        }

        let mut deserializer = serde_json::Deserializer::from_str(&response_text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
            let path = err.path().to_string();
            let location = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            PetNameError::MalformedResponse(format!("at {}: {}", location, err.inner()))
        })
    }
}

fn status_error(status: StatusCode, retry_after: Option<u64>, body: &str) -> PetNameError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("error").map(error_message))
        .unwrap_or_else(|| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PetNameError::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => PetNameError::RateLimit { retry_after },
        _ => PetNameError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(|value| value.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn build_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), endpoint)
}

/// Body for `POST /completions`.
#[derive(Clone, Debug)]
pub struct CompletionRequest {
    model: String,
    prompt: String,
    temperature: f64,
    max_tokens: Option<u32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature,
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "prompt": self.prompt,
            "temperature": self.temperature,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}

/// Body for `POST /chat/completions`.
#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    temperature: f64,
    tools: Vec<Value>,
    tool_choice: Option<Value>,
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            tools: Vec::new(),
            tool_choice: None,
            max_tokens: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: Value) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn into_value(self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
            "temperature": self.temperature,
        });

        if !self.tools.is_empty() {
            body["tools"] = Value::Array(self.tools);
        }

        if let Some(tool_choice) = self.tool_choice {
            body["tool_choice"] = tool_choice;
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("https://api.openai.com/v1/", "completions"),
            "https://api.openai.com/v1/completions"
        );
        assert_eq!(
            build_url("http://localhost:8080/v1", "chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_status_error_mapping() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        match status_error(StatusCode::UNAUTHORIZED, None, body) {
            PetNameError::Authentication(message) => {
                assert_eq!(message, "Incorrect API key provided")
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match status_error(StatusCode::TOO_MANY_REQUESTS, Some(7), "{}") {
            PetNameError::RateLimit { retry_after } => assert_eq!(retry_after, Some(7)),
            other => panic!("unexpected error: {other:?}"),
        }

        match status_error(StatusCode::BAD_GATEWAY, None, "upstream down") {
            PetNameError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "upstream down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_completion_request_body() {
        let body = CompletionRequest::new("gpt-3.5-turbo-instruct", "hi", 0.7)
            .with_max_tokens(Some(256))
            .into_value();
        assert_eq!(body["model"], "gpt-3.5-turbo-instruct");
        assert_eq!(body["prompt"], "hi");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 256);
    }

    #[test]
    fn test_chat_request_omits_empty_tools() {
        let body = ChatCompletionRequest::new("gpt-4o-mini", vec![], 0.5).into_value();
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
        assert_eq!(body["temperature"], 0.5);
    }
}
