//! Configuration type definitions for CareerPilot
//!
//! All types implement serde traits for JSON serialization and have sensible
//! defaults, so a missing or partial config file always yields a usable
//! configuration.

use serde::{Deserialize, Serialize};

use crate::tools::registry::DEFAULT_TOOL_NAMES;

/// Main configuration struct for CareerPilot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Agent defaults (model, temperature, phase timeouts)
    pub agent: AgentDefaults,
    /// Reasoner backend configuration
    pub reasoner: ReasonerConfig,
    /// Tool enablement configuration
    pub tools: ToolsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Default agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentDefaults {
    /// Default model to use
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens for responses
    pub max_tokens: u32,
    /// Timeout (seconds) for each reasoner call (selection, extraction, composition)
    pub reasoner_timeout_secs: u64,
    /// Timeout (seconds) for a single tool invocation
    pub tool_timeout_secs: u64,
    /// How many recent turns to render into reasoner prompts. 0 = all.
    pub context_turns: usize,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            model: "llama3.2".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            reasoner_timeout_secs: 60,
            tool_timeout_secs: 120,
            context_turns: 20,
        }
    }
}

/// Reasoner backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Backend identifier. Currently only "ollama" is supported.
    pub backend: String,
    /// Base URL of the backend API.
    pub base_url: String,
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            backend: "ollama".to_string(),
            base_url: "http://localhost:11434".to_string(),
        }
    }
}

/// Tool enablement configuration.
///
/// Names listed here must exist in the registry; unknown names fail session
/// construction with a hard error rather than being silently ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Names of tools the agent may use this session.
    pub enabled: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_TOOL_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable pretty printing
    Pretty,
    /// Compact `[timestamp] [LEVEL] target message` lines
    Compact,
    /// Structured JSON lines for log aggregators
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Log level filter (overridden by `RUST_LOG` when set)
    pub level: String,
    /// Optional log file path; stderr/stdout when unset
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Compact,
            level: "info".to_string(),
            file: None,
        }
    }
}
