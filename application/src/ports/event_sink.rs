//! Streaming transport port
//!
//! Defines the interface through which the orchestrator hands events to the
//! caller-facing transport: an ordered, append-only, one-directional channel
//! held open for the duration of one request.

use async_trait::async_trait;
use jobchat_domain::ChatEvent;
use thiserror::Error;

/// Errors raised by the transport while writing an event.
///
/// Any transport error aborts the request: the orchestrator stops issuing
/// model calls and tool dispatches, and emits nothing further.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The caller disconnected; the channel is gone.
    #[error("Transport closed")]
    Closed,

    /// The write itself failed.
    #[error("Transport write failed: {0}")]
    WriteFailed(String),
}

/// Ordered event sink towards the caller.
///
/// Implementations must deliver events in the exact order emitted, one
/// discrete, independently-parseable unit per event, without batching
/// across event boundaries.
#[async_trait]
pub trait ChatEventSink: Send + Sync {
    async fn emit(&self, event: &ChatEvent) -> Result<(), TransportError>;
}

/// Sink that discards every event. Used for buffered-mode exchanges where
/// no caller is listening incrementally.
pub struct NullSink;

#[async_trait]
impl ChatEventSink for NullSink {
    async fn emit(&self, _event: &ChatEvent) -> Result<(), TransportError> {
        Ok(())
    }
}
