//! Reasoner module - the opaque language-generation collaborator
//!
//! The dispatcher never talks to a model API directly; it goes through the
//! [`Reasoner`] trait. A backend implements three operations: tool selection,
//! argument extraction, and free-form generation. Backends may be slow,
//! non-deterministic, and fallible — callers bound every call with a timeout
//! and validate structure before acting on output.
//!
//! Injecting the trait keeps the dispatcher's control flow independently
//! testable with a deterministic stand-in implementation.

pub mod ollama;

pub use ollama::OllamaReasoner;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::tools::ToolSchema;

/// Compact description of one enabled tool, sent to the reasoner so it can
/// decide whether (and which) tool applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// The name of the tool (unique within the enabled set)
    pub name: String,
    /// Human-readable description of what the tool does
    pub description: String,
    /// JSON Schema describing the tool's arguments
    pub parameters: Value,
}

impl ToolDescriptor {
    /// Create a new tool descriptor.
    pub fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

/// Prompt context for a reasoner call: system preamble, rendered transcript,
/// and the current user input.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// System preamble describing the agent and its task
    pub system: String,
    /// Rendered prior turns, oldest first (empty on the first turn)
    pub transcript: String,
    /// The current raw user input
    pub input: String,
}

impl PromptContext {
    /// Create a context with no transcript.
    pub fn new(system: &str, input: &str) -> Self {
        Self {
            system: system.to_string(),
            transcript: String::new(),
            input: input.to_string(),
        }
    }

    /// Attach a rendered transcript.
    pub fn with_transcript(mut self, transcript: &str) -> Self {
        self.transcript = transcript.to_string();
        self
    }
}

/// Outcome of the selection phase.
///
/// A closed set: the reasoner either names exactly one tool, declines to use
/// any, or reports that it cannot disambiguate. Ambiguity is surfaced to the
/// user as a clarification, never resolved by guessing.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Exactly one tool matches the request
    Tool {
        /// Name of the selected tool
        name: String,
        /// Backend-reported confidence in [0.0, 1.0]
        confidence: f32,
    },
    /// No tool applies; answer conversationally
    None,
    /// Several tools plausibly match; ask the user which one they meant
    Ambiguous {
        /// Names of the candidate tools
        candidates: Vec<String>,
    },
}

impl Selection {
    /// Returns the selected tool name, if exactly one was chosen.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Selection::Tool { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Options for generation requests.
///
/// Use the builder pattern to construct options.
#[derive(Debug, Clone, Default)]
pub struct GenOptions {
    /// Model override (backend default if None)
    pub model: Option<String>,
    /// Temperature for sampling (0.0 = deterministic, higher = creative)
    pub temperature: Option<f32>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
}

impl GenOptions {
    /// Create new default generation options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Trait for language-generation backends.
///
/// Selection and extraction must behave as pure functions of the context and
/// tool descriptions passed in — backends hold no conversational state of
/// their own; everything they know about the dialogue arrives through the
/// [`PromptContext`].
#[async_trait]
pub trait Reasoner: Send + Sync {
    /// Decide whether the request matches the intent of exactly one of the
    /// given tools, or none.
    async fn select(
        &self,
        ctx: &PromptContext,
        tools: &[ToolDescriptor],
        opts: &GenOptions,
    ) -> Result<Selection>;

    /// Derive a tool's arguments from the input and transcript context.
    ///
    /// Returns a JSON object keyed by field name. Absent or null fields mean
    /// the information was not present; backends must not invent values.
    async fn extract(
        &self,
        schema: &ToolSchema,
        ctx: &PromptContext,
        opts: &GenOptions,
    ) -> Result<Value>;

    /// Generate free-form text for the given prompt.
    ///
    /// Used for direct conversational replies, result narration, and by the
    /// domain tools themselves.
    async fn generate(&self, prompt: &str, opts: &GenOptions) -> Result<String>;

    /// Get the backend name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Get the default model for this backend.
    fn default_model(&self) -> &str;
}
