//! Tool domain traits
//!
//! Contains pure domain logic traits for tool call validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::entities::{ToolCall, ToolDefinition};
use serde_json::Value;

/// Validator for tool calls
///
/// Pure domain trait that validates a tool call against its definition
/// without any I/O.
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator.
///
/// Checks, in order: required parameters are present, no unknown parameters
/// were supplied, and every supplied value matches its declared type. The
/// error message names the offending field so the model can self-correct.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            if param.required && !call.arguments.contains_key(&param.name) {
                return Err(format!("Missing field: {}", param.name));
            }
        }

        let valid_params: std::collections::HashSet<&str> =
            definition.parameters.iter().map(|p| p.name.as_str()).collect();

        for arg_name in call.arguments.keys() {
            if !valid_params.contains(arg_name.as_str()) {
                return Err(format!(
                    "Unknown field '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            }
        }

        for param in &definition.parameters {
            if let Some(value) = call.arguments.get(&param.name)
                && !type_matches(&param.param_type, value)
            {
                return Err(format!(
                    "Invalid type for field '{}': expected {}",
                    param.name, param.param_type
                ));
            }
        }

        Ok(())
    }
}

fn type_matches(param_type: &str, value: &Value) -> bool {
    match param_type {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        // Unknown declared types are not enforced
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::ToolParameter;

    fn search_definition() -> ToolDefinition {
        ToolDefinition::new("search_jobs", "Search job postings")
            .with_parameter(ToolParameter::new("search", "Free-text query", true))
            .with_parameter(ToolParameter::new("limit", "Max results", false).with_type("integer"))
    }

    #[test]
    fn test_validator_missing_required() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("c1", "search_jobs");

        let result = validator.validate(&call, &search_definition());
        assert_eq!(result.unwrap_err(), "Missing field: search");
    }

    #[test]
    fn test_validator_unknown_param() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("c1", "search_jobs")
            .with_arg("search", "rust")
            .with_arg("salary", "high");

        let result = validator.validate(&call, &search_definition());
        assert!(result.unwrap_err().contains("Unknown field 'salary'"));
    }

    #[test]
    fn test_validator_type_mismatch() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("c1", "search_jobs")
            .with_arg("search", "rust")
            .with_arg("limit", "ten");

        let result = validator.validate(&call, &search_definition());
        assert_eq!(
            result.unwrap_err(),
            "Invalid type for field 'limit': expected integer"
        );
    }

    #[test]
    fn test_validator_valid_call() {
        let validator = DefaultToolValidator;
        let call = ToolCall::new("c1", "search_jobs")
            .with_arg("search", "rust")
            .with_arg("limit", 5);

        assert!(validator.validate(&call, &search_definition()).is_ok());
    }
}
