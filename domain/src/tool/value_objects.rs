//! Tool domain value objects — immutable result and error types
//!
//! These types form the output side of the tool pipeline. Every dispatch
//! resolves to a [`ToolResult`]; failures are data the model can react to,
//! never a crash of the surrounding request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error that occurred during tool dispatch.
///
/// Error codes classify the failure for diagnostics and logging:
///
/// | Code | Meaning |
/// |------|---------|
/// | `NOT_FOUND` | Unknown tool name or missing resource |
/// | `INVALID_ARGUMENT` | Schema validation failed — names the offending field |
/// | `EXECUTION_FAILED` | Handler reported or raised a failure |
/// | `TIMEOUT` | Handler exceeded its time budget |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "INVALID_ARGUMENT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    // Common error constructors
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Outcome of one tool dispatch, keyed by the model-assigned call id.
///
/// Either shape is valid conversational data: the success payload or the
/// structured failure both flow back into the transcript as a tool turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Correlation id of the [`ToolCall`](super::entities::ToolCall) this answers
    pub call_id: String,
    /// Name of the tool that was dispatched
    pub tool_name: String,
    /// Whether the dispatch succeeded
    pub success: bool,
    /// Success payload (tool-defined JSON shape)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Failure information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        output: Value,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            success: true,
            output: Some(output),
            error: None,
        }
    }

    /// Create a failed result
    pub fn failure(
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        error: ToolError,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            success: false,
            output: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Render the transcript form of this result: the success payload, or
    /// `{"error": "<message>"}` for failures.
    pub fn payload(&self) -> Value {
        match (&self.output, &self.error) {
            (Some(output), _) => output.clone(),
            (None, Some(error)) => serde_json::json!({ "error": error.message }),
            (None, None) => Value::Null,
        }
    }
}
