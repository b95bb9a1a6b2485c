//! Structured model responses.
//!
//! A [`ModelResponse`] is the adapter-neutral shape of one model turn: an
//! ordered list of content blocks mixing text and tool-use requests, plus
//! the reason the model stopped. The orchestrator branches on
//! [`has_tool_calls()`](ModelResponse::has_tool_calls) to decide between
//! executing tools and streaming the answer.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single block of content within a model response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),

    /// A tool use request from the model.
    ///
    /// The remote service assigns the `id`; `input` stays untyped JSON
    /// until the dispatcher validates it against the tool's schema.
    ToolUse {
        /// Service-assigned ID for correlating with tool results.
        id: String,
        /// Requested tool name (not yet validated against the catalog).
        name: String,
        /// Raw arguments object.
        input: BTreeMap<String, Value>,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response — the model is done.
    EndTurn,
    /// The model wants to call tools — execute them and loop.
    ToolUse,
    /// Hit the token limit — response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured response from the model, supporting both text and tool use.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier, when the service reports one.
    pub model: Option<String>,
}

impl ModelResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` content blocks as `Vec<ToolCall>`, in order.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::with_arguments(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_creates_text_only_response() {
        let response = ModelResponse::from_text("Hello!");
        assert_eq!(response.text_content(), "Hello!");
        assert!(!response.has_tool_calls());
        assert!(response.tool_calls().is_empty());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn tool_calls_extraction_preserves_order() {
        let response = ModelResponse {
            content: vec![
                ContentBlock::Text("Let me look.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_1".to_string(),
                    name: "search_jobs".to_string(),
                    input: [("level".to_string(), serde_json::json!("senior"))]
                        .into_iter()
                        .collect(),
                },
                ContentBlock::ToolUse {
                    id: "call_2".to_string(),
                    name: "list_companies".to_string(),
                    input: BTreeMap::new(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: None,
        };

        assert!(response.has_tool_calls());
        assert_eq!(response.text_content(), "Let me look.");

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].call_id, "call_1");
        assert_eq!(calls[0].tool_name, "search_jobs");
        assert_eq!(calls[1].call_id, "call_2");
    }

    #[test]
    fn empty_response() {
        let response = ModelResponse {
            content: vec![],
            stop_reason: None,
            model: None,
        };

        assert_eq!(response.text_content(), "");
        assert!(!response.has_tool_calls());
    }
}
