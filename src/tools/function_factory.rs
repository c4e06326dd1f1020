use super::{tool::ToolRegistry, validation::validate_arguments, Tool};
use crate::{PetNameError, Result};
use serde_json::Value;
use tracing::debug;

/// Registers tools and dispatches the agent's function calls to them
#[derive(Debug)]
pub struct FunctionFactory {
    registry: ToolRegistry,
}

impl FunctionFactory {
    pub fn new() -> Self {
        Self {
            registry: ToolRegistry::new(),
        }
    }

    /// Register a tool with the factory
    pub fn register_tool<T: Tool + 'static>(&mut self, tool: T) {
        self.registry.register(tool);
    }

    /// Validate `parameters` against the tool's schema, then run it
    pub async fn execute_function(&self, function_name: &str, parameters: Value) -> Result<Value> {
        let tool = self
            .registry
            .get(function_name)
            .ok_or_else(|| PetNameError::ToolNotFound(function_name.to_string()))?;

        validate_arguments(function_name, &tool.parameters_schema(), &parameters)?;

        debug!(tool = function_name, "executing tool");
        tool.execute(parameters).await
    }

    /// Get all available tools for chat-completions function calling
    pub fn get_openai_tools(&self) -> Vec<Value> {
        self.registry.to_openai_tools()
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.registry.get(name).is_some()
    }
}

impl Default for FunctionFactory {
    fn default() -> Self {
        Self::new()
    }
}
