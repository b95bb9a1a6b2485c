//! Run Chat use case
//!
//! Orchestrates one conversational exchange as the state machine:
//!
//! | Phase             | Work                                              |
//! |-------------------|---------------------------------------------------|
//! | AwaitingModel     | submit transcript + tool catalog to the gateway   |
//! | ExecutingTools    | fan out the turn's tool calls, fan in the results |
//! | StreamingAnswer   | forward answer fragments to the transport         |
//! | Done / Failed     | terminal                                          |
//!
//! The transcript is owned by this invocation alone; tool rounds are
//! bounded; transient model-service errors are retried with backoff;
//! failures surface as a single terminal `Error` frame with a stable
//! reason string.

use crate::config::ChatParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::event_sink::{ChatEventSink, NullSink, TransportError};
use crate::ports::model_gateway::{GatewayError, ModelGateway};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::use_cases::shared::check_cancelled;
use jobchat_domain::{
    AgentPhase, ChatEvent, DomainError, Message, ModelResponse, StreamEvent, ToolDefinition,
    Transcript,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One inbound chat request: optional prior turns plus the new user message.
#[derive(Debug, Clone)]
pub struct ChatInput {
    pub prior_messages: Vec<Message>,
    pub user_message: String,
}

impl ChatInput {
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            prior_messages: Vec::new(),
            user_message: user_message.into(),
        }
    }

    pub fn with_history(mut self, prior_messages: Vec<Message>) -> Self {
        self.prior_messages = prior_messages;
        self
    }
}

/// The completed exchange.
#[derive(Debug, Clone)]
pub struct ChatOutput {
    /// Final answer text
    pub text: String,
    /// Names of the tools invoked, in invocation order
    pub tool_calls_used: Vec<String>,
    /// The complete record of the exchange, usable as context for a
    /// subsequent request
    pub transcript: Vec<Message>,
}

/// Terminal failure of one exchange. Never retried at this level.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Model service error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("tool loop limit exceeded")]
    ToolLoopExceeded,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ChatError {
    /// Stable, non-leaking reason string for the terminal error frame.
    pub fn reason(&self) -> &'static str {
        match self {
            ChatError::Gateway(GatewayError::AuthenticationFailed(_)) => {
                "model service authentication failed"
            }
            ChatError::Gateway(GatewayError::QuotaExceeded(_)) => "model service quota exceeded",
            ChatError::Gateway(_) => "model service unavailable",
            ChatError::ToolLoopExceeded => "tool loop limit exceeded",
            ChatError::Transport(_) => "transport failure",
            ChatError::Cancelled => "cancelled",
            ChatError::Domain(_) => "internal error",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatError::Cancelled)
    }
}

/// Use case for running one conversational exchange.
pub struct RunChatUseCase<G: ModelGateway, T: ToolExecutorPort> {
    gateway: Arc<G>,
    tools: Arc<T>,
    params: ChatParams,
    cancellation_token: Option<CancellationToken>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: ModelGateway + 'static, T: ToolExecutorPort + 'static> RunChatUseCase<G, T> {
    pub fn new(gateway: Arc<G>, tools: Arc<T>) -> Self {
        Self {
            gateway,
            tools,
            params: ChatParams::default(),
            cancellation_token: None,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_params(mut self, params: ChatParams) -> Self {
        self.params = params;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Execute the exchange in buffered mode: the caller receives the
    /// complete answer at once.
    pub async fn execute(&self, input: ChatInput) -> Result<ChatOutput, ChatError> {
        self.run(input, &NullSink, false).await
    }

    /// Execute the exchange in streaming mode: answer fragments and tool
    /// notices are emitted to `sink` as they happen, terminated by exactly
    /// one `Done` or `Error` frame.
    pub async fn execute_streaming(
        &self,
        input: ChatInput,
        sink: &dyn ChatEventSink,
    ) -> Result<ChatOutput, ChatError> {
        self.run(input, sink, true).await
    }

    async fn run(
        &self,
        input: ChatInput,
        sink: &dyn ChatEventSink,
        streaming: bool,
    ) -> Result<ChatOutput, ChatError> {
        match self.drive(input, sink, streaming).await {
            Ok(output) => {
                sink.emit(&ChatEvent::Done).await?;
                Ok(output)
            }
            Err(e) => {
                self.logger.log(ConversationEvent::new(
                    "chat_failed",
                    serde_json::json!({ "reason": e.reason() }),
                ));
                // A dead transport or a cancelled caller gets no further
                // frames; every other failure yields one terminal Error.
                if !matches!(e, ChatError::Transport(_) | ChatError::Cancelled) {
                    let _ = sink.emit(&ChatEvent::error(e.reason())).await;
                }
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        input: ChatInput,
        sink: &dyn ChatEventSink,
        streaming: bool,
    ) -> Result<ChatOutput, ChatError> {
        let mut transcript = Transcript::with_history(input.prior_messages);
        transcript.push_user(&input.user_message);

        // Stable catalog order keeps requests reproducible across runs.
        let mut catalog: Vec<ToolDefinition> = self.tools.tool_spec().all().cloned().collect();
        catalog.sort_by(|a, b| a.name.cmp(&b.name));

        let mut tool_calls_used: Vec<String> = Vec::new();
        let mut rounds: u32 = 0;

        info!(message = %input.user_message, tools = catalog.len(), "Starting chat exchange");

        let answer = loop {
            debug!(phase = %AgentPhase::AwaitingModel, round = rounds, "Requesting model turn");
            let response = self
                .call_model_with_retry(transcript.messages(), &catalog, sink, streaming)
                .await?;

            let calls = response.tool_calls();
            if calls.is_empty() {
                debug!(phase = %AgentPhase::StreamingAnswer, "Model returned the final answer");
                break response.text_content();
            }

            rounds += 1;
            if rounds > self.params.max_tool_rounds {
                warn!(
                    rounds,
                    limit = self.params.max_tool_rounds,
                    "Tool loop bound exceeded"
                );
                return Err(ChatError::ToolLoopExceeded);
            }

            debug!(
                phase = %AgentPhase::ExecutingTools,
                round = rounds,
                count = calls.len(),
                "Executing tool calls"
            );
            transcript.push_assistant_tool_calls(calls.clone());

            for call in &calls {
                self.logger.log(ConversationEvent::new(
                    "tool_call",
                    serde_json::json!({
                        "call_id": call.call_id,
                        "tool": call.tool_name,
                        "args": call.arguments,
                    }),
                ));
                sink.emit(&ChatEvent::tool_invoked(&call.tool_name)).await?;
            }

            check_cancelled(&self.cancellation_token)?;
            let results = self.tools.execute_batch(&calls).await;

            for result in results {
                self.logger.log(ConversationEvent::new(
                    "tool_result",
                    serde_json::json!({
                        "call_id": result.call_id,
                        "tool": result.tool_name,
                        "success": result.is_success(),
                    }),
                ));
                tool_calls_used.push(result.tool_name.clone());
                let payload = result.payload().to_string();
                transcript.push_tool_result(result.call_id, payload)?;
            }
        };

        transcript.push_assistant(&answer);
        info!(
            turns = transcript.len(),
            tools_used = tool_calls_used.len(),
            "Chat exchange complete"
        );

        Ok(ChatOutput {
            text: answer,
            tool_calls_used,
            transcript: transcript.into_messages(),
        })
    }

    /// One AwaitingModel step, with bounded retry on transient errors.
    ///
    /// In streaming mode, text deltas are forwarded to the sink as they
    /// arrive. Retries apply only to failures of the request itself; an
    /// error after fragments have been delivered is not replayed.
    async fn call_model_with_retry(
        &self,
        messages: &[Message],
        catalog: &[ToolDefinition],
        sink: &dyn ChatEventSink,
        streaming: bool,
    ) -> Result<ModelResponse, ChatError> {
        let mut attempt: u32 = 0;
        let response = loop {
            check_cancelled(&self.cancellation_token)?;

            let outcome = if streaming {
                self.stream_one_turn(messages, catalog, sink).await
            } else {
                self.gateway
                    .complete(messages, catalog)
                    .await
                    .map_err(ChatError::Gateway)
            };

            match outcome {
                Ok(response) => break response,
                Err(ChatError::Gateway(e))
                    if e.is_transient() && attempt < self.params.max_model_retries =>
                {
                    let delay = self.params.retry_delay(attempt);
                    warn!(error = %e, attempt, delay_ms = delay.as_millis() as u64,
                        "Transient model service error, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        };

        self.logger.log(ConversationEvent::new(
            "model_response",
            serde_json::json!({
                "tool_calls": response.tool_calls().len(),
                "bytes": response.text_content().len(),
            }),
        ));
        Ok(response)
    }

    /// Drive one streaming model turn, forwarding deltas to the sink.
    ///
    /// An adapter that buffers internally may complete without having
    /// yielded deltas; whatever text the deltas did not cover is emitted
    /// as a final fragment so the caller always sees the full answer.
    async fn stream_one_turn(
        &self,
        messages: &[Message],
        catalog: &[ToolDefinition],
        sink: &dyn ChatEventSink,
    ) -> Result<ModelResponse, ChatError> {
        let handle = self
            .gateway
            .complete_streaming(messages, catalog)
            .await
            .map_err(ChatError::Gateway)?;
        let mut receiver = handle.receiver;
        let mut forwarded = String::new();

        loop {
            let event = if let Some(ref token) = self.cancellation_token {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => return Err(ChatError::Cancelled),
                    event = receiver.recv() => event,
                }
            } else {
                receiver.recv().await
            };

            match event {
                Some(StreamEvent::Delta(chunk)) => {
                    sink.emit(&ChatEvent::fragment(chunk.as_str())).await?;
                    forwarded.push_str(&chunk);
                }
                Some(StreamEvent::CompletedResponse(response)) => {
                    let full = response.text_content();
                    if let Some(rest) = full.strip_prefix(forwarded.as_str())
                        && !rest.is_empty()
                    {
                        sink.emit(&ChatEvent::fragment(rest)).await?;
                    }
                    return Ok(response);
                }
                Some(StreamEvent::Error(e)) => {
                    // Fragments may already be delivered; never replayed.
                    return Err(ChatError::Gateway(GatewayError::RequestFailed(e)));
                }
                None => {
                    return Err(ChatError::Gateway(GatewayError::MalformedResponse(
                        "stream closed before completion".to_string(),
                    )));
                }
            }
        }
    }
}
