//! Transcript types for CareerPilot
//!
//! This module defines the value types that make up a session transcript:
//! turns, tool invocation records, and their outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Terminal state of one processing cycle.
///
/// Every processed input ends in exactly one of these; the dispatcher has no
/// path that leaves a cycle without producing a turn carrying one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Direct conversational reply, no tool involved
    Answered,
    /// The agent asked the user for clarification (ambiguous request or
    /// missing arguments); no tool was invoked
    Clarification,
    /// A tool was invoked and produced a usable result
    ToolSucceeded,
    /// A tool was invoked but faulted or exceeded its timeout
    ToolFailed,
    /// The reasoner backend failed or timed out; generic recovery reply
    ReasonerUnavailable,
}

/// Raw result of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum InvocationResult {
    /// The tool returned a structured textual result
    Succeeded { output: String },
    /// The tool faulted during execution
    Failed { error: String },
    /// The tool exceeded its per-invocation timeout
    TimedOut,
}

/// Record of one tool invocation: which tool, the arguments actually used,
/// and the raw result. Exists only when the dispatcher chose to invoke a
/// tool for that turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationRecord {
    /// Name of the invoked tool
    pub tool: String,
    /// The validated arguments the tool was called with
    pub arguments: Value,
    /// Raw outcome of the invocation
    pub result: InvocationResult,
}

impl ToolInvocationRecord {
    /// Record a successful invocation.
    pub fn succeeded(tool: &str, arguments: Value, output: &str) -> Self {
        Self {
            tool: tool.to_string(),
            arguments,
            result: InvocationResult::Succeeded {
                output: output.to_string(),
            },
        }
    }

    /// Record a faulted invocation.
    pub fn failed(tool: &str, arguments: Value, error: &str) -> Self {
        Self {
            tool: tool.to_string(),
            arguments,
            result: InvocationResult::Failed {
                error: error.to_string(),
            },
        }
    }

    /// Record an invocation that exceeded its timeout.
    pub fn timed_out(tool: &str, arguments: Value) -> Self {
        Self {
            tool: tool.to_string(),
            arguments,
            result: InvocationResult::TimedOut,
        }
    }

    /// Returns `true` if the invocation produced a usable result.
    pub fn is_success(&self) -> bool {
        matches!(self.result, InvocationResult::Succeeded { .. })
    }
}

/// One complete user-input/agent-response exchange.
///
/// Immutable once created; the dispatcher produces exactly one per processed
/// input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Unique identifier for this turn
    pub id: Uuid,
    /// The raw user input that started the cycle
    pub user_input: String,
    /// The agent's final response text
    pub response: String,
    /// Tool invocation record, present only when a tool was invoked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation: Option<ToolInvocationRecord>,
    /// Terminal state of the cycle that produced this turn
    pub outcome: TurnOutcome,
    /// When this turn was created
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(
        user_input: &str,
        response: &str,
        invocation: Option<ToolInvocationRecord>,
        outcome: TurnOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_input: user_input.to_string(),
            response: response.to_string(),
            invocation,
            outcome,
            created_at: Utc::now(),
        }
    }

    /// A direct conversational reply with no tool involvement.
    pub fn answered(user_input: &str, response: &str) -> Self {
        Self::new(user_input, response, None, TurnOutcome::Answered)
    }

    /// A clarification request (ambiguity or missing arguments).
    pub fn clarification(user_input: &str, response: &str) -> Self {
        Self::new(user_input, response, None, TurnOutcome::Clarification)
    }

    /// A turn that carries a tool invocation; the outcome is derived from
    /// the record's result.
    pub fn with_invocation(
        user_input: &str,
        response: &str,
        record: ToolInvocationRecord,
    ) -> Self {
        let outcome = if record.is_success() {
            TurnOutcome::ToolSucceeded
        } else {
            TurnOutcome::ToolFailed
        };
        Self::new(user_input, response, Some(record), outcome)
    }

    /// A turn recording a reasoner failure with the generic recovery reply.
    pub fn reasoner_failure(user_input: &str, response: &str) -> Self {
        Self::new(user_input, response, None, TurnOutcome::ReasonerUnavailable)
    }

    /// Returns `true` if this turn carries a tool invocation record.
    pub fn has_invocation(&self) -> bool {
        self.invocation.is_some()
    }
}
