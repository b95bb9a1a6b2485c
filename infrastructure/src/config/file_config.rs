//! Typed configuration tree.

use crate::provider::ProviderConfig;
use jobchat_application::ChatParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration, merged from defaults, config files, and environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model service connection
    pub provider: ProviderConfig,
    /// Orchestration bounds
    pub chat: ChatConfig,
    /// Structured logging
    pub log: LogConfig,
}

/// `[chat]` section: bounds for one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub max_tool_rounds: u32,
    pub max_model_retries: u32,
    pub retry_base_delay_ms: u64,
    pub tool_timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        let params = ChatParams::default();
        Self {
            max_tool_rounds: params.max_tool_rounds,
            max_model_retries: params.max_model_retries,
            retry_base_delay_ms: params.retry_base_delay_ms,
            tool_timeout_secs: params.tool_timeout_secs,
        }
    }
}

impl ChatConfig {
    pub fn to_params(&self) -> ChatParams {
        ChatParams {
            max_tool_rounds: self.max_tool_rounds,
            max_model_retries: self.max_model_retries,
            retry_base_delay_ms: self.retry_base_delay_ms,
            tool_timeout_secs: self.tool_timeout_secs,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path for the JSONL conversation log; `None` disables it
    pub conversation_log: Option<PathBuf>,
}
