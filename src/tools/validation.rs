use jsonschema::JSONSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{PetNameError, Result};

/// Check `arguments` against a tool's JSON schema.
pub fn validate_arguments(tool_name: &str, schema: &Value, arguments: &Value) -> Result<()> {
    let compiled = JSONSchema::compile(schema).map_err(|err| {
        PetNameError::Validation(format!("Invalid schema for tool '{}': {}", tool_name, err))
    })?;

    let messages: Vec<String> = match compiled.validate(arguments) {
        Ok(()) => return Ok(()),
        Err(errors) => errors
            .map(|error| {
                let path = error.instance_path.to_string();
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{}: {}", path, error)
                }
            })
            .collect(),
    };

    Err(PetNameError::Validation(format!(
        "Arguments for tool '{}' failed validation: {}",
        tool_name,
        messages.join("; ")
    )))
}

/// Deserialize tool parameters, reporting the path of the first bad field.
pub fn parse_parameters<T: DeserializeOwned>(tool_name: &str, parameters: Value) -> Result<T> {
    serde_path_to_error::deserialize(parameters).map_err(|err| {
        PetNameError::ToolExecution(format!(
            "Invalid parameters for {} at {}: {}",
            tool_name,
            err.path(),
            err.inner()
        ))
    })
}
