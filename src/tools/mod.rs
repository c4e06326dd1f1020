//! Tools the agent can call

pub mod function_factory;
pub mod tool;
pub mod validation;
pub mod wikipedia;

pub use function_factory::FunctionFactory;
pub use tool::{Tool, ToolFuture, ToolRegistry};
pub use wikipedia::WikipediaTool;
