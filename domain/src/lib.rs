//! Domain layer for jobchat
//!
//! This crate contains the core business logic, entities, and value objects
//! of the conversational job-search agent. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Transcript
//!
//! One conversational exchange is an append-only [`Transcript`] of
//! [`Message`]s, owned by exactly one orchestrator invocation. Assistant
//! turns may carry tool calls; tool turns carry the matching results.
//!
//! ## Tools
//!
//! A tool is a named, schema-validated capability the model may request.
//! The catalog is assembled once at startup into a [`ToolSpec`] and is
//! immutable afterwards, so the tools advertised to the model never drift
//! mid-conversation.

pub mod agent;
pub mod chat;
pub mod core;
pub mod jobs;
pub mod tool;

// Re-export commonly used types
pub use agent::phase::AgentPhase;
pub use chat::{
    entities::{Message, Role, Transcript},
    response::{ContentBlock, ModelResponse, StopReason},
    stream::{ChatEvent, StreamEvent},
};
pub use core::error::DomainError;
pub use jobs::entities::{Company, Job, JobFilters, JobLevel, JobPage};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
