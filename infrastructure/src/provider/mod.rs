//! Model provider adapter.
//!
//! Implements the application layer's `ModelGateway` port against an
//! OpenAI-compatible chat-completions endpoint:
//!
//! - [`openai::OpenAiChatGateway`] — the adapter (buffered + SSE streaming)
//! - [`wire`] — wire-format types and the translation to/from domain shapes
//! - [`error::ProviderError`] — provider failures and their mapping onto
//!   the transient/permanent `GatewayError` taxonomy

pub mod error;
pub mod openai;
pub mod wire;

pub use error::ProviderError;
pub use openai::{OpenAiChatGateway, ProviderConfig};
