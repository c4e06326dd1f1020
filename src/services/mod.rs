pub mod execution;
pub mod openai_client;
pub mod tool_call_utils;
