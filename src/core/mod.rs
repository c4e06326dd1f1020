pub mod agent;
pub mod chain;
pub mod memory;
pub mod steps;

pub use crate::types::result::{RunResult, TokenUsage};
pub use agent::{Agent, Ask, DEFAULT_MAX_ITERATIONS, DEFAULT_QUESTION};
pub use chain::NameChain;
pub use memory::AgentMemory;
pub use steps::AgentStep;
