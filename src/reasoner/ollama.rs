//! Ollama Reasoner Implementation
//!
//! This module implements the [`Reasoner`] trait against the Ollama chat API
//! (`/api/chat`), handling request construction, JSON-mode prompting for the
//! structured phases, and strict validation of what comes back. Selection and
//! extraction request `format: "json"` so the model replies with a single
//! JSON object; the reply is still validated before anything acts on it.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ReasonerError, Result};
use crate::tools::ToolSchema;

use super::{GenOptions, PromptContext, Reasoner, Selection, ToolDescriptor};

/// The default Ollama endpoint.
const OLLAMA_API_URL: &str = "http://localhost:11434";

/// The default model to use.
const DEFAULT_MODEL: &str = "llama3.2";

// ============================================================================
// Ollama API Request/Response Types
// ============================================================================

/// Ollama chat request body.
#[derive(Debug, Serialize)]
struct OllamaRequest {
    /// Model identifier
    model: String,
    /// Conversation messages (system + user)
    messages: Vec<OllamaMessage>,
    /// Always false; we consume complete responses
    stream: bool,
    /// Constrain the reply to a JSON object when set to "json"
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    /// Sampling options
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

/// A message in Ollama's chat format.
#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    /// Role: "system", "user", or "assistant"
    role: String,
    /// Message content
    content: String,
}

/// Sampling options.
#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate (Ollama's name for max_tokens)
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama chat response body.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

/// Ollama error response body.
#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// Wire shape of the selection phase's JSON reply.
#[derive(Debug, Deserialize)]
struct SelectionWire {
    #[serde(default)]
    tool: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
    #[serde(default)]
    candidates: Option<Vec<String>>,
}

// ============================================================================
// Ollama Reasoner
// ============================================================================

/// Reasoner backed by a local Ollama server.
pub struct OllamaReasoner {
    /// API base URL
    base_url: String,
    /// Default model when the caller doesn't override
    default_model: String,
    /// HTTP client for making requests
    client: Client,
}

impl OllamaReasoner {
    /// Create a reasoner against the default local endpoint.
    pub fn new() -> Self {
        Self::with_base_url(OLLAMA_API_URL, DEFAULT_MODEL)
    }

    /// Create a reasoner with a custom base URL and default model.
    ///
    /// A trailing slash on the base URL is removed.
    pub fn with_base_url(base_url: &str, default_model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: default_model.to_string(),
            client: Client::new(),
        }
    }

    /// Send one chat request and return the raw reply content.
    async fn chat(
        &self,
        system: &str,
        user: &str,
        opts: &GenOptions,
        json_mode: bool,
    ) -> Result<String> {
        let model = opts
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());

        let request = OllamaRequest {
            model: model.clone(),
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            stream: false,
            format: json_mode.then(|| "json".to_string()),
            options: Some(OllamaOptions {
                temperature: opts.temperature,
                num_predict: opts.max_tokens,
            }),
        };

        debug!(model = %model, json_mode, "Sending Ollama chat request");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| ReasonerError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            warn!(%status, error = %message, "Ollama returned an error");
            return Err(ReasonerError::Unavailable(format!("{}: {}", status, message)).into());
        }

        let parsed: OllamaResponse = response
            .json()
            .await
            .map_err(|e| ReasonerError::Malformed(e.to_string()))?;

        Ok(parsed.message.content)
    }

    /// Build the system prompt for the selection phase.
    fn selection_prompt(tools: &[ToolDescriptor]) -> String {
        let mut listing = String::new();
        for tool in tools {
            listing.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }
        format!(
            "You route user requests for a career-advice assistant. Decide whether the \
             latest request matches the intent of exactly one of these tools, or none.\n\
             \n\
             Tools:\n{}\
             \n\
             Reply with a single JSON object:\n\
             {{\"tool\": \"<name>\" or null, \"confidence\": <0.0-1.0>, \
             \"candidates\": [\"<name>\", ...]}}\n\
             \n\
             Set \"tool\" only when the request clearly matches one tool's intent. If no \
             tool applies, use null with an empty \"candidates\" list. If several tools \
             plausibly match and you cannot decide, use null and list the contenders in \
             \"candidates\". Never pick a tool that is not in the list above.",
            listing
        )
    }

    /// Build the system prompt for the extraction phase.
    fn extraction_prompt(schema: &ToolSchema) -> String {
        format!(
            "Extract the tool arguments described by this JSON Schema from the \
             conversation. Use information stated by the user anywhere in the \
             conversation; do not invent values.\n\
             \n\
             Schema:\n{}\n\
             \n\
             Reply with a single JSON object containing only the fields you actually \
             found. Omit or set to null any field the user has not provided.",
            schema.to_json_schema()
        )
    }

    /// Render the conversation for the user message of a structured phase.
    fn render_context(ctx: &PromptContext) -> String {
        if ctx.transcript.is_empty() {
            format!("User request:\n{}", ctx.input)
        } else {
            format!(
                "Conversation so far:\n{}\n\nLatest user request:\n{}",
                ctx.transcript, ctx.input
            )
        }
    }

    /// Parse and validate the selection reply.
    ///
    /// `tools` is the enabled set; a reply naming anything else is malformed.
    fn parse_selection(raw: &str, tools: &[ToolDescriptor]) -> Result<Selection> {
        let cleaned = strip_code_fence(raw);
        let wire: SelectionWire = serde_json::from_str(cleaned)
            .map_err(|e| ReasonerError::Malformed(format!("selection reply: {}", e)))?;

        let known = |name: &str| tools.iter().any(|t| t.name == name);

        if let Some(name) = wire.tool.as_deref() {
            let name = name.trim();
            if !name.is_empty() && name != "null" && name != "none" {
                if !known(name) {
                    return Err(ReasonerError::Malformed(format!(
                        "selection reply named unknown tool '{}'",
                        name
                    ))
                    .into());
                }
                return Ok(Selection::Tool {
                    name: name.to_string(),
                    confidence: wire.confidence.unwrap_or(0.0).clamp(0.0, 1.0),
                });
            }
        }

        let candidates: Vec<String> = wire
            .candidates
            .unwrap_or_default()
            .into_iter()
            .filter(|c| known(c))
            .collect();
        if candidates.len() >= 2 {
            return Ok(Selection::Ambiguous { candidates });
        }

        Ok(Selection::None)
    }
}

impl Default for OllamaReasoner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Reasoner for OllamaReasoner {
    async fn select(
        &self,
        ctx: &PromptContext,
        tools: &[ToolDescriptor],
        opts: &GenOptions,
    ) -> Result<Selection> {
        if tools.is_empty() {
            return Ok(Selection::None);
        }
        let system = Self::selection_prompt(tools);
        let user = Self::render_context(ctx);
        let raw = self.chat(&system, &user, opts, true).await?;
        Self::parse_selection(&raw, tools)
    }

    async fn extract(
        &self,
        schema: &ToolSchema,
        ctx: &PromptContext,
        opts: &GenOptions,
    ) -> Result<Value> {
        let system = Self::extraction_prompt(schema);
        let user = Self::render_context(ctx);
        let raw = self.chat(&system, &user, opts, true).await?;

        let cleaned = strip_code_fence(&raw);
        let value: Value = serde_json::from_str(cleaned)
            .map_err(|e| ReasonerError::Malformed(format!("extraction reply: {}", e)))?;
        if !value.is_object() {
            return Err(
                ReasonerError::Malformed("extraction reply is not a JSON object".into()).into(),
            );
        }
        Ok(value)
    }

    async fn generate(&self, prompt: &str, opts: &GenOptions) -> Result<String> {
        self.chat(&prompt_system_preamble(), prompt, opts, false)
            .await
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

/// System preamble for free-form generation.
fn prompt_system_preamble() -> String {
    "You are a helpful, concise career-advice assistant.".to_string()
}

/// Strip a Markdown code fence from a model reply, if present.
///
/// Models sometimes wrap JSON in ```json ... ``` even in JSON mode.
fn strip_code_fence(s: &str) -> &str {
    let trimmed = s.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}
