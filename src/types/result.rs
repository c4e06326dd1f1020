use crate::core::steps::AgentStep;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of an agent execution run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Final answer text from the agent
    pub output: String,
    /// All reasoning steps taken during execution
    pub steps: Vec<AgentStep>,
    /// Total tokens used (if reported by the provider)
    pub tokens: Option<TokenUsage>,
    /// Total execution duration
    pub duration: Duration,
    /// Number of iterations used
    pub iterations: usize,
}

/// Token usage information from the API. Counts a provider leaves out read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Sum of two usage reports
    pub fn add(&self, other: &TokenUsage) -> TokenUsage {
        TokenUsage {
            prompt_tokens: self.prompt_tokens + other.prompt_tokens,
            completion_tokens: self.completion_tokens + other.completion_tokens,
            total_tokens: self.total_tokens + other.total_tokens,
        }
    }
}

impl RunResult {
    pub fn new(
        output: String,
        steps: Vec<AgentStep>,
        tokens: Option<TokenUsage>,
        duration: Duration,
        iterations: usize,
    ) -> Self {
        Self {
            output,
            steps,
            tokens,
            duration,
            iterations,
        }
    }

    /// Generate a human-readable replay of the execution
    pub fn replay(&self) -> String {
        let mut lines = Vec::new();

        lines.push("=== Agent Execution Trace ===".to_string());
        lines.push(format!("Duration: {:.2}s", self.duration.as_secs_f64()));
        lines.push(format!("Iterations: {}", self.iterations));

        if let Some(tokens) = &self.tokens {
            lines.push(format!(
                "Tokens: {} prompt + {} completion = {} total",
                tokens.prompt_tokens, tokens.completion_tokens, tokens.total_tokens
            ));
        }

        lines.push(String::new());
        lines.push("--- Steps ---".to_string());

        for (idx, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", idx + 1, step.describe()));
        }

        lines.push(String::new());
        lines.push("--- Final Output ---".to_string());
        lines.push(self.output.clone());

        lines.join("\n")
    }

    /// Get count of actions (tool calls) executed
    pub fn action_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, AgentStep::Action { .. }))
            .count()
    }

    /// Get count of observations (tool results)
    pub fn observation_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s, AgentStep::Observation { .. }))
            .count()
    }

    /// Get all error observations
    pub fn errors(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| match s {
                AgentStep::Observation {
                    result, is_error, ..
                } if *is_error => Some(result.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_count() {
        let steps = vec![
            AgentStep::Action {
                tool_name: "wikipedia".to_string(),
                tool_call_id: "1".to_string(),
                arguments: json!({"query": "cat"}),
            },
            AgentStep::Observation {
                tool_call_id: "1".to_string(),
                result: "Page: Cat".to_string(),
                is_error: false,
            },
        ];

        let result = RunResult::new("output".to_string(), steps, None, Duration::from_secs(1), 2);

        assert_eq!(result.action_count(), 1);
        assert_eq!(result.observation_count(), 1);
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_replay_format() {
        let steps = vec![
            AgentStep::Task {
                content: "How long do cats live?".to_string(),
            },
            AgentStep::FinalAnswer {
                answer: "12 to 18 years".to_string(),
            },
        ];

        let result = RunResult::new(
            "12 to 18 years".to_string(),
            steps,
            Some(TokenUsage {
                prompt_tokens: 100,
                completion_tokens: 50,
                total_tokens: 150,
            }),
            Duration::from_secs(2),
            1,
        );

        let replay = result.replay();
        assert!(replay.contains("Duration"));
        assert!(replay.contains("Tokens: 100 prompt + 50 completion = 150 total"));
        assert!(replay.contains("Task"));
        assert!(replay.contains("Final Answer"));
    }

    #[test]
    fn test_partial_usage_defaults_missing_counts() {
        let usage: TokenUsage =
            serde_json::from_str(r#"{"prompt_tokens":5,"total_tokens":9}"#).unwrap();
        assert_eq!(
            usage,
            TokenUsage {
                prompt_tokens: 5,
                completion_tokens: 0,
                total_tokens: 9
            }
        );
    }

    #[test]
    fn test_token_usage_add() {
        let a = TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        };
        assert_eq!(
            a.add(&a),
            TokenUsage {
                prompt_tokens: 2,
                completion_tokens: 4,
                total_tokens: 6
            }
        );
    }
}
