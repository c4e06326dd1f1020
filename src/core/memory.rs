use super::steps::AgentStep;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// System prompt used when none is supplied.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant. Use the available tools to look up facts you are not sure about. When you have enough information, reply with the final answer as plain text.";

/// Ordered record of an agent run, rendered to chat messages on every turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMemory {
    steps: Vec<AgentStep>,
    system_prompt: Option<String>,
}

impl AgentMemory {
    pub fn new(system_prompt: Option<String>) -> Self {
        Self {
            steps: Vec::new(),
            system_prompt,
        }
    }

    /// Add a step to memory
    pub fn add_step(&mut self, step: AgentStep) {
        info!(target: "petnamer::steps", "{}", step.describe());
        self.steps.push(step);
    }

    pub fn into_steps(self) -> Vec<AgentStep> {
        self.steps
    }

    /// Convert memory to chat message format
    pub fn as_messages(&self) -> Vec<Value> {
        let mut messages = Vec::with_capacity(self.steps.len() + 1);

        if let Some(system_prompt) = &self.system_prompt {
            messages.push(serde_json::json!({
                "role": "system",
                "content": system_prompt
            }));
        }

        messages.extend(self.steps.iter().map(AgentStep::to_message));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_creation() {
        let memory = AgentMemory::new(Some("System".to_string()));
        assert_eq!(memory.as_messages().len(), 1);
        assert!(memory.into_steps().is_empty());
    }

    #[test]
    fn test_as_messages() {
        let mut memory = AgentMemory::new(Some(DEFAULT_SYSTEM_PROMPT.to_string()));
        memory.add_step(AgentStep::Task {
            content: "Hello".to_string(),
        });

        let messages = memory.as_messages();
        assert_eq!(messages.len(), 2); // system + task
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[1]["role"], "user");
    }

    #[test]
    fn test_no_system_prompt() {
        let mut memory = AgentMemory::new(None);
        memory.add_step(AgentStep::Task {
            content: "Hello".to_string(),
        });
        assert_eq!(memory.as_messages().len(), 1);
    }
}
