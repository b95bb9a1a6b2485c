//! Tool domain module
//!
//! Defines the core abstractions of the agent's **Tool System** — the named,
//! schema-validated lookups the model may request during a conversation.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (catalog)    │    │ (invocation) │    │ (outcome)    │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! The catalog is a closed set assembled once at startup; registering the
//! same name twice aborts startup rather than silently shadowing. A
//! [`ToolCall`] carries the model-assigned `call_id` that ties its
//! [`ToolResult`] back into the transcript, which is what lets the
//! dispatcher run calls in parallel and still re-attach results in the
//! order they were requested.
//!
//! # Architecture
//!
//! - **Domain** (this module): pure definitions and validation, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for dispatch
//! - **Infrastructure** (`JobBoardToolExecutor`): concrete execution over
//!   the job store

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult};
