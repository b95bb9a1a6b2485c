//! Application layer for jobchat
//!
//! This crate contains the chat orchestration use case, port definitions,
//! and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    event_sink::{ChatEventSink, NullSink, TransportError},
    job_store::{JobStorePort, StoreError},
    model_gateway::{GatewayError, ModelGateway, StreamHandle},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::run_chat::{ChatError, ChatInput, ChatOutput, RunChatUseCase};
