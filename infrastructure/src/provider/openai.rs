//! OpenAI-compatible chat-completions gateway.
//!
//! Implements the `ModelGateway` port over HTTP. Works against any endpoint
//! speaking the chat-completions dialect (OpenAI, compatible proxies, local
//! servers); the base URL and model name come from configuration.
//!
//! Streaming uses server-sent events: chunks are decoded with
//! `eventsource-stream`, text deltas are forwarded as they arrive, and
//! tool-call argument fragments are reassembled until the `[DONE]` sentinel.

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures::StreamExt;
use jobchat_application::{GatewayError, ModelGateway, StreamHandle};
use jobchat_domain::{Message, ModelResponse, StreamEvent, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::error::ProviderError;
use super::wire::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, ToolCallAccumulator,
    WireMessage, WireTool,
};

/// Connection settings for the chat-completions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL up to (not including) `/chat/completions`
    pub base_url: String,
    /// Bearer token; `None` for endpoints that need no auth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: None,
            request_timeout_secs: 120,
        }
    }
}

/// Gateway to an OpenAI-compatible chat-completions service.
pub struct OpenAiChatGateway {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl OpenAiChatGateway {
    pub fn new(config: ProviderConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        stream: bool,
    ) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: messages.iter().map(WireMessage::from_message).collect(),
            tools: tools.iter().map(WireTool::from_definition).collect(),
            max_tokens: self.config.max_tokens,
            stream,
        }
    }

    async fn post(&self, body: &ChatCompletionRequest) -> Result<reqwest::Response, ProviderError> {
        let mut request = self.client.post(self.endpoint()).json(body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_api_error(&body)
                .unwrap_or_else(|| format!("HTTP {} from model service", status.as_u16()));
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

/// Pull the human-readable message out of an API error body, if present.
fn extract_api_error(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = json.get("error")?;
    if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }
    error.as_str().map(|s| s.to_string())
}

/// Decode the SSE chunk stream, forwarding deltas and assembling the
/// terminal response.
async fn stream_chunks(response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut stream = response.bytes_stream().eventsource();
    let mut accumulator = ToolCallAccumulator::new();

    while let Some(event) = stream.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "SSE stream error");
                let _ = tx
                    .send(StreamEvent::Error(format!("SSE stream error: {}", e)))
                    .await;
                return;
            }
        };

        if event.data == "[DONE]" {
            match accumulator.finish() {
                Ok(response) => {
                    let _ = tx.send(StreamEvent::CompletedResponse(response)).await;
                }
                Err(e) => {
                    let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                }
            }
            return;
        }

        match serde_json::from_str::<ChatCompletionChunk>(&event.data) {
            Ok(chunk) => {
                if let Some(text) = accumulator.push_chunk(chunk)
                    && tx.send(StreamEvent::Delta(text)).await.is_err()
                {
                    // Receiver gone — the request was abandoned
                    return;
                }
            }
            Err(e) => {
                let message = extract_api_error(&event.data)
                    .unwrap_or_else(|| format!("SSE parsing error: {}", e));
                let _ = tx.send(StreamEvent::Error(message)).await;
                return;
            }
        }
    }

    let _ = tx
        .send(StreamEvent::Error(
            "stream ended before completion".to_string(),
        ))
        .await;
}

#[async_trait]
impl ModelGateway for OpenAiChatGateway {
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<ModelResponse, GatewayError> {
        let body = self.build_request(messages, tools, false);
        debug!(model = %body.model, messages = body.messages.len(), "Model request (buffered)");

        let response = self.post(&body).await.map_err(GatewayError::from)?;
        let raw = response
            .text()
            .await
            .map_err(|e| GatewayError::from(ProviderError::Http(e)))?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&raw)
            .map_err(|e| GatewayError::from(ProviderError::Parse(e.to_string())))?;
        parsed.into_model_response().map_err(GatewayError::from)
    }

    async fn complete_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> Result<StreamHandle, GatewayError> {
        let body = self.build_request(messages, tools, true);
        debug!(model = %body.model, messages = body.messages.len(), "Model request (streaming)");

        let response = self.post(&body).await.map_err(GatewayError::from)?;
        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(stream_chunks(response, tx));
        Ok(StreamHandle::new(rx))
    }
}
