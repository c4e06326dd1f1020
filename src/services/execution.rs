use crate::{
    core::{agent::Agent, memory::AgentMemory, steps::AgentStep},
    error::{PetNameError, Result},
    services::{
        openai_client::ChatCompletionRequest,
        tool_call_utils::{
            extract_arguments_str, extract_function_info, extract_tool_call_id,
            parse_function_arguments,
        },
    },
    types::result::{RunResult, TokenUsage},
};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

impl Agent {
    /// Run the tool loop, keeping the full trace.
    ///
    /// Each iteration is one chat round trip. Tool calls are executed and
    /// their results fed back; the first reply without tool calls is the
    /// answer. Provider errors end the run immediately.
    pub async fn run_with_steps(&self, prompt: &str) -> Result<RunResult> {
        let start_time = Instant::now();
        let mut memory = AgentMemory::new(Some(self.system_prompt().to_string()));

        memory.add_step(AgentStep::Task {
            content: prompt.to_string(),
        });

        let tools = self.function_factory().get_openai_tools();
        let mut token_usage: Option<TokenUsage> = None;

        for iteration in 1..=self.max_iterations() {
            debug!(iteration, "agent iteration");

            let mut chat_request = ChatCompletionRequest::new(
                self.config().model.clone(),
                memory.as_messages(),
                self.config().temperature,
            )
            .with_max_tokens(self.config().max_tokens);

            if !tools.is_empty() {
                chat_request = chat_request
                    .with_tools(tools.clone())
                    .with_tool_choice(json!("auto"));
            }

            let response = self.make_raw_request(&chat_request.into_value()).await?;

            if let Some(usage) = &response.usage {
                token_usage = Some(match token_usage {
                    Some(total) => total.add(usage),
                    None => usage.clone(),
                });
            }

            let assistant_message = response
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message)
                .ok_or_else(|| {
                    PetNameError::MalformedResponse(
                        "Completion response contained no choices".to_string(),
                    )
                })?;

            let tool_calls = assistant_message.tool_calls.unwrap_or_default();
            if !tool_calls.is_empty() {
                for tool_call in &tool_calls {
                    self.handle_tool_call(tool_call, &mut memory).await;
                }
                continue;
            }

            let answer = assistant_message.content.unwrap_or_default();
            if answer.trim().is_empty() {
                return Err(PetNameError::NoAnswer);
            }

            memory.add_step(AgentStep::FinalAnswer {
                answer: answer.clone(),
            });

            return Ok(RunResult::new(
                answer,
                memory.into_steps(),
                token_usage,
                start_time.elapsed(),
                iteration,
            ));
        }

        Err(PetNameError::MaxIterations(self.max_iterations()))
    }

    /// Record the call and its outcome. Every Action is followed by an
    /// Observation so the transcript stays valid for the provider.
    async fn handle_tool_call(&self, tool_call: &Value, memory: &mut AgentMemory) {
        let tool_call_id = extract_tool_call_id(tool_call).to_string();

        let (function, function_name) = match extract_function_info(tool_call) {
            Some((function, Some(name))) if !name.is_empty() => (function, name),
            Some((function, _)) => {
                record_failure(
                    memory,
                    &tool_call_id,
                    "unknown",
                    Value::String(extract_arguments_str(&function).to_string()),
                    PetNameError::InvalidFunctionCall("Tool call missing function name".to_string()),
                );
                return;
            }
            None => {
                record_failure(
                    memory,
                    &tool_call_id,
                    "unknown",
                    Value::Null,
                    PetNameError::InvalidFunctionCall("Tool call missing function".to_string()),
                );
                return;
            }
        };

        let arguments_str = extract_arguments_str(&function);
        let arguments_json = match parse_function_arguments(arguments_str, &function_name) {
            Ok(arguments) => arguments,
            Err(error) => {
                record_failure(
                    memory,
                    &tool_call_id,
                    &function_name,
                    Value::String(arguments_str.to_string()),
                    error,
                );
                return;
            }
        };

        memory.add_step(AgentStep::Action {
            tool_name: function_name.clone(),
            tool_call_id: tool_call_id.clone(),
            arguments: arguments_json.clone(),
        });

        let (result, is_error) = match self
            .function_factory()
            .execute_function(&function_name, arguments_json)
            .await
        {
            Ok(Value::String(text)) => (text, false),
            Ok(other) => (other.to_string(), false),
            Err(error) => (error.to_error_payload().to_string(), true),
        };

        memory.add_step(AgentStep::Observation {
            tool_call_id,
            result,
            is_error,
        });
    }
}

fn record_failure(
    memory: &mut AgentMemory,
    tool_call_id: &str,
    tool_name: &str,
    arguments: Value,
    error: PetNameError,
) {
    memory.add_step(AgentStep::Action {
        tool_name: tool_name.to_string(),
        tool_call_id: tool_call_id.to_string(),
        arguments,
    });
    memory.add_step(AgentStep::Observation {
        tool_call_id: tool_call_id.to_string(),
        result: error.to_error_payload().to_string(),
        is_error: true,
    });
}
