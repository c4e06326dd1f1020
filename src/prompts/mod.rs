//! Prompt formatting

pub mod pet_name;
pub mod template;

pub use pet_name::{pet_name_prompt, pet_name_template, PromptRequest, PET_NAME_TEMPLATE};
pub use template::PromptTemplate;
