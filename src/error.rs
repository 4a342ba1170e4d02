//! Error types for CareerPilot
//!
//! This module defines all error types used throughout the crate.
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Reasoner Error Classification
// ============================================================================

/// Structured classification of reasoner (language-generation backend) faults.
///
/// The dispatcher converts every one of these into a user-visible,
/// memory-consistent turn; none of them escapes a processing cycle.
#[derive(Debug)]
pub enum ReasonerError {
    /// Backend unreachable or returned a server-side failure
    Unavailable(String),
    /// Backend replied, but the output failed structural validation
    Malformed(String),
    /// Call exceeded the configured phase timeout
    Timeout(String),
}

impl fmt::Display for ReasonerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonerError::Unavailable(msg) => write!(f, "backend unavailable: {}", msg),
            ReasonerError::Malformed(msg) => write!(f, "malformed output: {}", msg),
            ReasonerError::Timeout(msg) => write!(f, "timed out: {}", msg),
        }
    }
}

impl ReasonerError {
    /// Returns `true` if this fault was a timeout rather than a hard failure.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ReasonerError::Timeout(_))
    }
}

impl From<ReasonerError> for CareerError {
    fn from(err: ReasonerError) -> Self {
        CareerError::Reasoner(err)
    }
}

// ============================================================================
// Primary Error Type
// ============================================================================

/// The primary error type for CareerPilot operations.
///
/// Propagation policy: only configuration-time faults (`Config`,
/// `DuplicateTool`, `UnknownTool`) are allowed to reach the caller of a
/// session as hard failures. `MissingArguments`, `Tool`, and `Reasoner`
/// faults are caught at the dispatcher boundary and folded into turns.
#[derive(Error, Debug)]
pub enum CareerError {
    /// Configuration-related errors (invalid config, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A tool with this name is already registered
    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    /// Requested or enabled tool name is not in the registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Argument extraction could not produce all required fields for a tool
    #[error("Missing arguments for {tool}: {}", fields.join(", "))]
    MissingArguments { tool: String, fields: Vec<String> },

    /// Tool execution errors (invalid arguments at execution time, tool faults)
    #[error("Tool error: {0}")]
    Tool(String),

    /// Reasoner fault with classification (unavailable, malformed, timeout)
    #[error("Reasoner error: {0}")]
    Reasoner(ReasonerError),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for CareerPilot operations.
pub type Result<T> = std::result::Result<T, CareerError>;
