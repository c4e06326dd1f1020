use thiserror::Error;

/// Main error type for the pet namer
#[derive(Error, Debug)]
pub enum PetNameError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error(
        "Rate limit exceeded{}",
        .retry_after.map(|secs| format!(": retry after {secs}s")).unwrap_or_default()
    )]
    RateLimit { retry_after: Option<u64> },

    #[error("Provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid function call: {0}")]
    InvalidFunctionCall(String),

    #[error("Maximum iterations exceeded: {0}")]
    MaxIterations(usize),

    #[error("Model returned neither an answer nor a tool call")]
    NoAnswer,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PetNameError>;

impl PetNameError {
    /// Whether a caller could reasonably try again. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            PetNameError::RateLimit { .. } => true,
            PetNameError::Api { status, .. } => *status >= 500,
            PetNameError::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PetNameError::Config(_) => "CONFIG_ERROR",
            PetNameError::Authentication(_) => "AUTHENTICATION_ERROR",
            PetNameError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PetNameError::Api { .. } => "API_ERROR",
            PetNameError::Http(_) => "HTTP_ERROR",
            PetNameError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            PetNameError::Serialization(_) => "SERIALIZATION_ERROR",
            PetNameError::Template(_) => "TEMPLATE_ERROR",
            PetNameError::Validation(_) => "VALIDATION_ERROR",
            PetNameError::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
            PetNameError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            PetNameError::InvalidFunctionCall(_) => "INVALID_FUNCTION_CALL",
            PetNameError::MaxIterations(_) => "MAX_ITERATIONS_EXCEEDED",
            PetNameError::NoAnswer => "NO_ANSWER",
            PetNameError::Io(_) => "IO_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_is_retryable() {
        let err = PetNameError::RateLimit {
            retry_after: Some(2),
        };
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "RATE_LIMIT_ERROR");
        assert_eq!(err.to_string(), "Rate limit exceeded: retry after 2s");

        let unknown = PetNameError::RateLimit { retry_after: None };
        assert_eq!(unknown.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn test_api_error_retryable_only_on_server_side() {
        let server = PetNameError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        let client = PetNameError::Api {
            status: 400,
            message: "bad request".to_string(),
        };
        assert!(server.is_retryable());
        assert!(!client.is_retryable());
    }

    #[test]
    fn test_error_payload_shape() {
        let payload = PetNameError::ToolNotFound("calculator".to_string()).to_error_payload();
        assert_eq!(payload["error"]["code"], "TOOL_NOT_FOUND");
        assert_eq!(payload["error"]["retryable"], false);
        assert!(payload["error"]["message"]
            .as_str()
            .unwrap()
            .contains("calculator"));
    }
}
