//! JSON-lines event transport.

use async_trait::async_trait;
use jobchat_application::{ChatEventSink, TransportError};
use jobchat_domain::ChatEvent;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

/// Writes each event as one JSON object per line, flushed immediately.
///
/// The newline is the frame boundary: every line parses on its own, and no
/// event is batched with another. Any write or flush failure is a
/// [`TransportError`] that aborts the request.
pub struct JsonLinesTransport<W> {
    writer: Mutex<W>,
}

impl<W: AsyncWrite + Unpin + Send> JsonLinesTransport<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> ChatEventSink for JsonLinesTransport<W> {
    async fn emit(&self, event: &ChatEvent) -> Result<(), TransportError> {
        let mut line = serde_json::to_string(event)
            .map_err(|e| TransportError::WriteFailed(e.to_string()))?;
        line.push('\n');

        let mut writer = self.writer.lock().await;
        writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| TransportError::WriteFailed(e.to_string()))?;
        writer
            .flush()
            .await
            .map_err(|e| TransportError::WriteFailed(e.to_string()))?;
        Ok(())
    }
}
