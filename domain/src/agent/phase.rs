//! Orchestrator state machine phases.

use serde::{Deserialize, Serialize};

/// Phase of one chat orchestration.
///
/// ```text
/// AwaitingModel ──tool calls──▶ ExecutingTools ──results──▶ AwaitingModel
///       │                                                      │
///       └──text──▶ StreamingAnswer ──▶ Done          round bound exceeded
///                                                              │
///                     (any phase) ──unrecoverable──▶         Failed
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    /// Waiting for the model to answer or request tools
    AwaitingModel,
    /// Dispatching the tool calls of one model turn
    ExecutingTools,
    /// Forwarding the final answer's fragments to the caller
    StreamingAnswer,
    /// Exchange completed
    Done,
    /// Exchange failed
    Failed,
}

impl AgentPhase {
    pub fn as_str(&self) -> &str {
        match self {
            AgentPhase::AwaitingModel => "awaiting_model",
            AgentPhase::ExecutingTools => "executing_tools",
            AgentPhase::StreamingAnswer => "streaming_answer",
            AgentPhase::Done => "done",
            AgentPhase::Failed => "failed",
        }
    }

    /// Check if this phase is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentPhase::Done | AgentPhase::Failed)
    }
}

impl std::fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases() {
        assert!(AgentPhase::Done.is_terminal());
        assert!(AgentPhase::Failed.is_terminal());
        assert!(!AgentPhase::AwaitingModel.is_terminal());
        assert!(!AgentPhase::ExecutingTools.is_terminal());
        assert!(!AgentPhase::StreamingAnswer.is_terminal());
    }

    #[test]
    fn phase_display() {
        assert_eq!(AgentPhase::ExecutingTools.to_string(), "executing_tools");
    }
}
