//! Model Gateway port
//!
//! Defines the interface for communicating with the remote language-model
//! service: submit a transcript plus tool catalog, receive either a final
//! textual answer or a list of requested tool invocations, buffered or
//! streamed.

use async_trait::async_trait;
use jobchat_domain::{Message, ModelResponse, StreamEvent, ToolDefinition};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during model gateway operations.
///
/// The transient/permanent split drives the orchestrator's retry policy:
/// only [`is_transient()`](Self::is_transient) errors are worth retrying
/// with backoff; everything else fails the request immediately.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Network-level failure reaching the service (transient)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request did not complete in time (transient)
    #[error("Request timeout")]
    Timeout,

    /// The service is overloaded or rate-limiting (transient)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Credentials rejected (permanent)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Quota or billing exhausted (permanent)
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The service returned a body we could not interpret (permanent)
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Service-reported request failure (permanent)
    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl GatewayError {
    /// Whether a retry with backoff has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_)
                | GatewayError::Timeout
                | GatewayError::ServiceUnavailable(_)
        )
    }
}

/// Handle for receiving streaming events from an in-flight model response.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`; the stream yields zero or more
/// `Delta` fragments and ends with exactly one terminal event.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Consume the stream and assemble the complete response.
    ///
    /// Useful when streaming transport-side is not needed but the adapter
    /// only offers the streaming path.
    pub async fn collect(mut self) -> Result<ModelResponse, GatewayError> {
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(_) => continue,
                StreamEvent::CompletedResponse(response) => return Ok(response),
                StreamEvent::Error(e) => return Err(GatewayError::RequestFailed(e)),
            }
        }
        Err(GatewayError::MalformedResponse(
            "stream closed before completion".to_string(),
        ))
    }
}

/// Gateway to the remote language-model service.
///
/// The adapter owns both translations: internal [`Message`]s and
/// [`ToolDefinition`]s to the service's wire format on the way out, and the
/// service's response back into a [`ModelResponse`] on the way in.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Submit the transcript and tool catalog, receive the complete response.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse, GatewayError>;

    /// Submit the transcript and receive the response incrementally.
    ///
    /// Default implementation calls [`complete`](Self::complete) and wraps
    /// the result in a single terminal event, so buffered-only adapters
    /// work without changes.
    async fn complete_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<StreamHandle, GatewayError> {
        let response = self.complete(messages, tools).await?;
        let (tx, rx) = mpsc::channel(1);
        // If the receiver is dropped, that's fine
        let _ = tx.send(StreamEvent::CompletedResponse(response)).await;
        Ok(StreamHandle::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(GatewayError::Timeout.is_transient());
        assert!(GatewayError::ConnectionError("reset".into()).is_transient());
        assert!(GatewayError::ServiceUnavailable("503".into()).is_transient());

        assert!(!GatewayError::AuthenticationFailed("401".into()).is_transient());
        assert!(!GatewayError::QuotaExceeded("429 billing".into()).is_transient());
        assert!(!GatewayError::MalformedResponse("bad json".into()).is_transient());
        assert!(!GatewayError::RequestFailed("oops".into()).is_transient());
    }

    #[tokio::test]
    async fn collect_assembles_terminal_response() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(StreamEvent::Delta("par".into())).await.unwrap();
        tx.send(StreamEvent::Delta("tial".into())).await.unwrap();
        tx.send(StreamEvent::CompletedResponse(ModelResponse::from_text(
            "partial",
        )))
        .await
        .unwrap();
        drop(tx);

        let response = StreamHandle::new(rx).collect().await.unwrap();
        assert_eq!(response.text_content(), "partial");
    }

    #[tokio::test]
    async fn collect_surfaces_stream_error() {
        let (tx, rx) = mpsc::channel(1);
        tx.send(StreamEvent::Error("boom".into())).await.unwrap();
        drop(tx);

        let err = StreamHandle::new(rx).collect().await.unwrap_err();
        assert!(matches!(err, GatewayError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn collect_detects_truncated_stream() {
        let (tx, rx) = mpsc::channel::<StreamEvent>(1);
        drop(tx);

        let err = StreamHandle::new(rx).collect().await.unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }
}
