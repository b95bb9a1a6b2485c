//! Chat-completions wire format.
//!
//! Serde types for the OpenAI-compatible API plus the translation between
//! them and the domain shapes. Tool arguments travel as JSON-encoded
//! strings on the wire and as structured maps internally; streamed tool
//! calls arrive as per-index deltas that [`ToolCallAccumulator`] reassembles.

use jobchat_domain::{ContentBlock, Message, ModelResponse, Role, StopReason, ToolDefinition};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::error::ProviderError;

// ==================== Request ====================

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: WireFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    /// JSON-encoded arguments object
    pub arguments: String,
}

#[derive(Debug, Serialize)]
pub struct WireTool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: WireFunctionDef,
}

#[derive(Debug, Serialize)]
pub struct WireFunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl WireMessage {
    pub fn from_message(message: &Message) -> Self {
        let tool_calls = if message.tool_calls.is_empty() {
            None
        } else {
            Some(
                message
                    .tool_calls
                    .iter()
                    .map(|call| WireToolCall {
                        id: call.call_id.clone(),
                        call_type: "function".to_string(),
                        function: WireFunctionCall {
                            name: call.tool_name.clone(),
                            arguments: Value::Object(
                                call.arguments
                                    .iter()
                                    .map(|(k, v)| (k.clone(), v.clone()))
                                    .collect(),
                            )
                            .to_string(),
                        },
                    })
                    .collect(),
            )
        };

        Self {
            role: match message.role {
                Role::User => "user".to_string(),
                Role::Assistant => "assistant".to_string(),
                Role::Tool => "tool".to_string(),
            },
            content: message.content.clone(),
            tool_calls,
            tool_call_id: message.tool_call_id.clone(),
        }
    }
}

impl WireTool {
    /// Render a tool definition as provider JSON Schema.
    ///
    /// Declared param types map onto schema types; anything unrecognized
    /// falls back to `"string"`.
    pub fn from_definition(tool: &ToolDefinition) -> Self {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let schema_type = match param.param_type.as_str() {
                "string" => "string",
                "number" => "number",
                "integer" => "integer",
                "boolean" => "boolean",
                _ => "string",
            };

            let mut prop = serde_json::Map::new();
            prop.insert("type".to_string(), serde_json::json!(schema_type));
            prop.insert(
                "description".to_string(),
                serde_json::json!(param.description),
            );
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(serde_json::json!(param.name));
            }
        }

        Self {
            tool_type: "function".to_string(),
            function: WireFunctionDef {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: serde_json::json!({
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }),
            },
        }
    }
}

// ==================== Buffered response ====================

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub model: Option<String>,
    pub choices: Vec<ResponseChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseChoice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<WireToolCall>>,
}

fn parse_arguments(name: &str, raw: &str) -> Result<BTreeMap<String, Value>, ProviderError> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        ProviderError::Parse(format!("tool call '{}' has malformed arguments: {}", name, e))
    })
}

fn stop_reason(finish_reason: Option<&str>) -> Option<StopReason> {
    finish_reason.map(|reason| match reason {
        "stop" => StopReason::EndTurn,
        "tool_calls" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        other => StopReason::Other(other.to_string()),
    })
}

impl ChatCompletionResponse {
    /// Translate the first choice into the domain response shape.
    pub fn into_model_response(mut self) -> Result<ModelResponse, ProviderError> {
        if self.choices.is_empty() {
            return Err(ProviderError::Parse("response has no choices".to_string()));
        }
        let choice = self.choices.remove(0);

        let mut content = Vec::new();
        if let Some(text) = choice.message.content
            && !text.is_empty()
        {
            content.push(ContentBlock::Text(text));
        }
        for call in choice.message.tool_calls.unwrap_or_default() {
            let input = parse_arguments(&call.function.name, &call.function.arguments)?;
            content.push(ContentBlock::ToolUse {
                id: call.id,
                name: call.function.name,
                input,
            });
        }

        Ok(ModelResponse {
            content,
            stop_reason: stop_reason(choice.finish_reason.as_deref()),
            model: self.model,
        })
    }
}

// ==================== Streamed response ====================

#[derive(Debug, Deserialize)]
pub struct ChatCompletionChunk {
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkChoice {
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChunkDelta {
    pub content: Option<String>,
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCallDelta {
    pub index: usize,
    pub id: Option<String>,
    pub function: Option<FunctionDelta>,
}

#[derive(Debug, Deserialize)]
pub struct FunctionDelta {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// Reassembles one streamed response from its chunks.
///
/// Tool calls arrive split across chunks: the first delta for an index
/// carries `id` and `name`, later ones append argument fragments that only
/// parse as JSON once concatenated.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    text: String,
    calls: BTreeMap<usize, PartialToolCall>,
    finish_reason: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one chunk in; returns the text delta to forward, if any.
    pub fn push_chunk(&mut self, chunk: ChatCompletionChunk) -> Option<String> {
        if self.model.is_none() {
            self.model = chunk.model;
        }

        let mut text_delta = None;
        for choice in chunk.choices {
            if let Some(reason) = choice.finish_reason {
                self.finish_reason = Some(reason);
            }
            if let Some(text) = choice.delta.content
                && !text.is_empty()
            {
                self.text.push_str(&text);
                text_delta = Some(text);
            }
            for delta in choice.delta.tool_calls.unwrap_or_default() {
                let partial = self.calls.entry(delta.index).or_default();
                if let Some(id) = delta.id {
                    partial.id = id;
                }
                if let Some(function) = delta.function {
                    if let Some(name) = function.name {
                        partial.name = name;
                    }
                    if let Some(arguments) = function.arguments {
                        partial.arguments.push_str(&arguments);
                    }
                }
            }
        }
        text_delta
    }

    /// Build the final response once the stream's done sentinel arrives.
    pub fn finish(self) -> Result<ModelResponse, ProviderError> {
        let mut content = Vec::new();
        if !self.text.is_empty() {
            content.push(ContentBlock::Text(self.text));
        }
        for (_, partial) in self.calls {
            let input = parse_arguments(&partial.name, &partial.arguments)?;
            content.push(ContentBlock::ToolUse {
                id: partial.id,
                name: partial.name,
                input,
            });
        }

        Ok(ModelResponse {
            content,
            stop_reason: stop_reason(self.finish_reason.as_deref()),
            model: self.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobchat_domain::{ToolCall, ToolParameter};

    #[test]
    fn user_and_tool_turns_translate() {
        let user = WireMessage::from_message(&Message::user("Find remote senior roles"));
        assert_eq!(user.role, "user");
        assert!(user.tool_calls.is_none());

        let tool = WireMessage::from_message(&Message::tool_result("call_1", "{\"count\":2}"));
        assert_eq!(tool.role, "tool");
        assert_eq!(tool.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(tool.content.as_deref(), Some("{\"count\":2}"));
    }

    #[test]
    fn assistant_tool_call_turn_encodes_arguments_as_json_string() {
        let call = ToolCall::new("call_1", "search_jobs")
            .with_arg("level", "senior")
            .with_arg("location", "Remote");
        let wire = WireMessage::from_message(&Message::assistant_tool_calls(vec![call]));

        assert_eq!(wire.role, "assistant");
        assert!(wire.content.is_none());
        let calls = wire.tool_calls.unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].call_type, "function");

        let args: Value = serde_json::from_str(&calls[0].function.arguments).unwrap();
        assert_eq!(args["level"], "senior");
        assert_eq!(args["location"], "Remote");
    }

    #[test]
    fn tool_schema_rendering() {
        let tool = ToolDefinition::new("get_job", "Fetch one job posting by id").with_parameter(
            ToolParameter::new("job_id", "Job id to fetch", true).with_type("integer"),
        );
        let wire = WireTool::from_definition(&tool);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "get_job");
        assert_eq!(
            json["function"]["parameters"]["properties"]["job_id"]["type"],
            "integer"
        );
        assert_eq!(json["function"]["parameters"]["required"][0], "job_id");
    }

    #[test]
    fn buffered_response_with_tool_calls_parses() {
        let raw = serde_json::json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "search_jobs",
                            "arguments": "{\"level\":\"senior\",\"location\":\"Remote\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });

        let parsed: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        let response = parsed.into_model_response().unwrap();

        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].call_id, "call_abc");
        assert_eq!(calls[0].get_string("level"), Some("senior"));
    }

    #[test]
    fn buffered_response_with_malformed_arguments_is_a_parse_error() {
        let raw = serde_json::json!({
            "choices": [{
                "message": {
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": { "name": "search_jobs", "arguments": "{not json" }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });

        let parsed: ChatCompletionResponse = serde_json::from_value(raw).unwrap();
        let err = parsed.into_model_response().unwrap_err();
        assert!(matches!(err, ProviderError::Parse(_)));
        assert!(err.to_string().contains("search_jobs"));
    }

    #[test]
    fn empty_choices_is_a_parse_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(matches!(
            parsed.into_model_response(),
            Err(ProviderError::Parse(_))
        ));
    }

    fn chunk(json: Value) -> ChatCompletionChunk {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn accumulator_assembles_text_stream() {
        let mut acc = ToolCallAccumulator::new();

        let delta = acc.push_chunk(chunk(serde_json::json!({
            "choices": [{ "delta": { "content": "Hello " }, "finish_reason": null }]
        })));
        assert_eq!(delta.as_deref(), Some("Hello "));

        acc.push_chunk(chunk(serde_json::json!({
            "choices": [{ "delta": { "content": "world" }, "finish_reason": "stop" }]
        })));

        let response = acc.finish().unwrap();
        assert_eq!(response.text_content(), "Hello world");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn accumulator_assembles_split_tool_call() {
        let mut acc = ToolCallAccumulator::new();

        acc.push_chunk(chunk(serde_json::json!({
            "choices": [{ "delta": { "tool_calls": [{
                "index": 0,
                "id": "call_1",
                "function": { "name": "search_jobs", "arguments": "{\"lev" }
            }]}, "finish_reason": null }]
        })));
        acc.push_chunk(chunk(serde_json::json!({
            "choices": [{ "delta": { "tool_calls": [{
                "index": 0,
                "function": { "arguments": "el\":\"senior\"}" }
            }]}, "finish_reason": "tool_calls" }]
        })));

        let response = acc.finish().unwrap();
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].call_id, "call_1");
        assert_eq!(calls[0].get_string("level"), Some("senior"));
    }

    #[test]
    fn accumulator_keeps_parallel_tool_calls_in_index_order() {
        let mut acc = ToolCallAccumulator::new();

        acc.push_chunk(chunk(serde_json::json!({
            "choices": [{ "delta": { "tool_calls": [
                { "index": 1, "id": "call_b",
                  "function": { "name": "get_job", "arguments": "{\"job_id\":7}" } },
                { "index": 0, "id": "call_a",
                  "function": { "name": "list_companies", "arguments": "{}" } }
            ]}, "finish_reason": "tool_calls" }]
        })));

        let response = acc.finish().unwrap();
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].call_id, "call_a");
        assert_eq!(calls[1].call_id, "call_b");
    }
}
