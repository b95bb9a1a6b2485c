//! Streaming event vocabularies.
//!
//! Two event families cross this module:
//!
//! - [`StreamEvent`] — what the model gateway yields while a response is in
//!   flight (text deltas, then one terminal event). Bridges the provider's
//!   SSE framing to the orchestrator.
//! - [`ChatEvent`] — what the orchestrator emits to the streaming transport
//!   for the caller (text fragments, tool notices, `done`/`error`).
//!
//! Both are ordered and terminate with exactly one terminal event. The
//! transport serializes each [`ChatEvent`] as a discrete, independently
//! parseable frame, so the family is serde-tagged.

use crate::chat::response::ModelResponse;
use serde::{Deserialize, Serialize};

/// An event in a streaming model response.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// A text chunk from the model.
    Delta(String),
    /// The full structured response (terminal; may carry tool calls).
    CompletedResponse(ModelResponse),
    /// An error that occurred during streaming (terminal).
    Error(String),
}

impl StreamEvent {
    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StreamEvent::CompletedResponse(_) | StreamEvent::Error(_)
        )
    }
}

/// An event emitted by the orchestrator towards the caller.
///
/// Delivered in emission order on an append-only channel held open for the
/// duration of one request; `Done` and `Error` are terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// An incremental piece of the assistant's answer text.
    TextFragment { text: String },
    /// A tool invocation started (emitted before the tool runs).
    ToolInvoked { name: String },
    /// The exchange completed successfully.
    Done,
    /// The exchange failed; `reason` is a stable, non-leaking string.
    Error { reason: String },
}

impl ChatEvent {
    pub fn fragment(text: impl Into<String>) -> Self {
        ChatEvent::TextFragment { text: text.into() }
    }

    pub fn tool_invoked(name: impl Into<String>) -> Self {
        ChatEvent::ToolInvoked { name: name.into() }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        ChatEvent::Error {
            reason: reason.into(),
        }
    }

    /// Returns true if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChatEvent::Done | ChatEvent::Error { .. })
    }
}
