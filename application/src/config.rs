//! Execution parameters for the chat orchestrator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunable bounds for one chat exchange.
///
/// The tool-loop bound exists to stop a model that keeps requesting tools
/// without converging; the retry knobs apply to transient model-service
/// errors only (permanent errors fail immediately).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatParams {
    /// Maximum number of tool-calling round trips per exchange
    pub max_tool_rounds: u32,
    /// Extra attempts after a transient model-service error
    pub max_model_retries: u32,
    /// Base delay before the first retry; doubles per attempt
    pub retry_base_delay_ms: u64,
    /// Time budget for a single tool handler invocation
    pub tool_timeout_secs: u64,
}

impl ChatParams {
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms << attempt)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            max_tool_rounds: 4,
            max_model_retries: 2,
            retry_base_delay_ms: 250,
            tool_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = ChatParams::default();
        assert_eq!(params.max_tool_rounds, 4);
        assert_eq!(params.max_model_retries, 2);
    }

    #[test]
    fn retry_delay_doubles() {
        let params = ChatParams::default();
        assert_eq!(params.retry_delay(0), Duration::from_millis(250));
        assert_eq!(params.retry_delay(1), Duration::from_millis(500));
        assert_eq!(params.retry_delay(2), Duration::from_millis(1000));
    }
}
