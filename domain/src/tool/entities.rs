//! Tool domain entities

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Definition of a tool the model may request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "search_jobs")
    pub name: String,
    /// Natural-language description sent to the model to aid selection
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type ("string", "integer", "number", "boolean")
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// The catalog of available tools.
///
/// Assembled once during startup via the consuming [`register`](Self::register)
/// builder and immutable afterwards, so the catalog advertised to the model
/// never drifts mid-conversation.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool (builder pattern).
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered. A
    /// duplicate name is a wiring mistake that must abort startup, not a
    /// runtime condition.
    pub fn register(mut self, tool: ToolDefinition) -> Self {
        assert!(
            !self.tools.contains_key(&tool.name),
            "duplicate tool registration: {}",
            tool.name
        );
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A model-requested invocation of a tool.
///
/// `call_id` is opaque and model-assigned, unique within a transcript;
/// `arguments` stay untyped JSON until validated against the tool's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Model-assigned correlation id
    pub call_id: String,
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: BTreeMap<String, Value>,
}

impl ToolCall {
    pub fn new(call_id: impl Into<String>, tool_name: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_arguments(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: BTreeMap<String, Value>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            arguments,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get an optional i64 argument
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.arguments.get(key).and_then(|v| v.as_i64())
    }

    /// Get an optional bool argument
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.arguments.get(key).and_then(|v| v.as_bool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("get_job", "Fetch one job posting by id").with_parameter(
            ToolParameter::new("job_id", "Job id to fetch", true).with_type("integer"),
        );

        assert_eq!(tool.name, "get_job");
        assert_eq!(tool.parameters.len(), 1);
        assert_eq!(tool.parameters[0].param_type, "integer");
    }

    #[test]
    fn test_tool_spec() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("search_jobs", "Search job postings"))
            .register(ToolDefinition::new("get_job", "Fetch one job posting"));

        assert_eq!(spec.len(), 2);
        assert!(spec.get("search_jobs").is_some());
        assert!(spec.get("unknown").is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate tool registration: search_jobs")]
    fn test_duplicate_registration_is_fatal() {
        let _ = ToolSpec::new()
            .register(ToolDefinition::new("search_jobs", "Search job postings"))
            .register(ToolDefinition::new("search_jobs", "Shadowing copy"));
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new("call_1", "search_jobs")
            .with_arg("level", "senior")
            .with_arg("limit", 10);

        assert_eq!(call.call_id, "call_1");
        assert_eq!(call.get_string("level"), Some("senior"));
        assert_eq!(call.get_i64("limit"), Some(10));
        assert_eq!(call.get_string("missing"), None);
    }
}
