//! Tool Executor port
//!
//! Defines the interface for dispatching model-requested tool calls.
//! `execute` never fails: every outcome — unknown tool, invalid arguments,
//! handler error, timeout — is a `ToolResult`, which is conversational data
//! the model can react to.

use async_trait::async_trait;
use futures::stream::{FuturesUnordered, StreamExt};
use jobchat_domain::{ToolCall, ToolError, ToolResult, ToolSpec};
use std::collections::HashMap;

/// Port for tool dispatch
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Dispatch a single tool call. Infallible by construction.
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Dispatch all calls of one model turn concurrently (fan-out) and
    /// return the results in the order the calls were requested (fan-in).
    ///
    /// Results are collected as handlers finish and then re-attached by
    /// `call_id`, so transcript ordering is deterministic regardless of
    /// handler latency variance.
    async fn execute_batch(&self, calls: &[ToolCall]) -> Vec<ToolResult> {
        let mut pending: FuturesUnordered<_> = calls
            .iter()
            .map(|call| async move { (call.call_id.clone(), self.execute(call).await) })
            .collect();

        let mut by_id: HashMap<String, ToolResult> = HashMap::with_capacity(calls.len());
        while let Some((call_id, result)) = pending.next().await {
            by_id.insert(call_id, result);
        }

        calls
            .iter()
            .map(|call| {
                by_id.remove(&call.call_id).unwrap_or_else(|| {
                    // Unreachable unless the model reused a call_id within one turn
                    ToolResult::failure(
                        &call.call_id,
                        &call.tool_name,
                        ToolError::execution_failed(format!(
                            "duplicate call id '{}' in one turn",
                            call.call_id
                        )),
                    )
                })
            })
            .collect()
    }
}
