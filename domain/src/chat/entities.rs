//! Chat domain entities

use crate::core::error::DomainError;
use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A message in a conversation (Entity)
///
/// Assistant turns that request tools carry a non-empty `tool_calls` list
/// and may have no text content. Tool turns carry the `tool_call_id` of the
/// assistant-issued call they answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    /// Text content; `None` on assistant turns that are purely tool requests.
    pub content: Option<String>,
    /// Tool invocations requested by this turn (assistant turns only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Back-reference to the call this turn answers (tool turns only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant turn requesting tool invocations.
    pub fn assistant_tool_calls(calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_calls: calls,
            tool_call_id: None,
        }
    }

    /// A tool-result turn answering the call identified by `tool_call_id`.
    pub fn tool_result(tool_call_id: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(payload.into()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
        }
    }

    /// Returns true if this is an assistant turn requesting tools.
    pub fn requests_tools(&self) -> bool {
        self.role == Role::Assistant && !self.tool_calls.is_empty()
    }
}

/// The ordered message history of one conversational exchange (Entity)
///
/// Owned exclusively by one orchestrator invocation; append-only for the
/// lifetime of that request. Appending a tool turn whose `tool_call_id` was
/// never issued by an earlier assistant turn is rejected.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a transcript with prior turns from an earlier exchange.
    ///
    /// Prior turns are trusted as-is — they are the completed record of a
    /// previous request and already satisfied the invariant when produced.
    pub fn with_history(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    pub fn push_assistant_tool_calls(&mut self, calls: Vec<ToolCall>) {
        self.messages.push(Message::assistant_tool_calls(calls));
    }

    /// Append a tool-result turn, checking the back-reference invariant.
    pub fn push_tool_result(
        &mut self,
        tool_call_id: impl Into<String>,
        payload: impl Into<String>,
    ) -> Result<(), DomainError> {
        let id = tool_call_id.into();
        if !self.has_issued_call(&id) {
            return Err(DomainError::InvalidTranscript(format!(
                "tool result references unknown call id '{}'",
                id
            )));
        }
        self.messages.push(Message::tool_result(id, payload));
        Ok(())
    }

    /// Consume the transcript, yielding the completed message record.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    fn has_issued_call(&self, call_id: &str) -> bool {
        self.messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .flat_map(|m| m.tool_calls.iter())
            .any(|c| c.call_id == call_id)
    }
}
