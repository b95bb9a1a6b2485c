//! In-process sinks: channel delivery and buffering.

use async_trait::async_trait;
use jobchat_application::{ChatEventSink, TransportError};
use jobchat_domain::ChatEvent;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Delivers events over an mpsc channel to an in-process consumer.
///
/// A dropped receiver is the caller disconnecting: the next emit returns
/// [`TransportError::Closed`] and the orchestrator abandons the request.
pub struct ChannelSink {
    tx: mpsc::Sender<ChatEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<ChatEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ChatEventSink for ChannelSink {
    async fn emit(&self, event: &ChatEvent) -> Result<(), TransportError> {
        self.tx
            .send(event.clone())
            .await
            .map_err(|_| TransportError::Closed)
    }
}

/// Accumulates every event in memory.
///
/// Backs the buffered response mode: the caller gets the frames (or just
/// the concatenated text) once the exchange finishes.
#[derive(Default)]
pub struct BufferingSink {
    events: Mutex<Vec<ChatEvent>>,
}

impl BufferingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Concatenate the text fragments in emission order.
    pub fn text(&self) -> String {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ChatEvent::TextFragment { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatEventSink for BufferingSink {
    async fn emit(&self, event: &ChatEvent) -> Result<(), TransportError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| TransportError::WriteFailed("buffer poisoned".to_string()))?;
        events.push(event.clone());
        Ok(())
    }
}
