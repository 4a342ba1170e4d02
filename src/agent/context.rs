//! Context builder for dispatcher cycles
//!
//! This module renders the session transcript and builds the prompts the
//! dispatcher sends to the reasoner: the shared [`PromptContext`] for the
//! structured phases, the direct-reply prompt, and the narration prompt that
//! combines a tool's structured result with conversational phrasing.

use crate::memory::MemorySnapshot;
use crate::reasoner::PromptContext;

/// Default system prompt for the CareerPilot agent
const DEFAULT_SYSTEM_PROMPT: &str = "You are CareerPilot, a career-advice assistant. \
You help with skill gaps, resumes, salary expectations, and interview preparation. \
Be concise, concrete, and honest about uncertainty.";

/// Builder for the prompt context of one processing cycle.
///
/// The transcript rendering is bounded by `context_turns`: only the most
/// recent N turns are included in prompts (0 = all). The underlying memory
/// is never trimmed; the bound applies to rendering only.
pub struct ContextBuilder {
    /// The system prompt to use
    system_prompt: String,
    /// How many recent turns to render. 0 = all.
    context_turns: usize,
}

impl ContextBuilder {
    /// Create a new context builder with the default system prompt.
    pub fn new() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            context_turns: 0,
        }
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Bound transcript rendering to the most recent `n` turns (0 = all).
    pub fn with_context_turns(mut self, n: usize) -> Self {
        self.context_turns = n;
        self
    }

    /// Get the current system prompt.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Build the prompt context for one cycle.
    pub fn build(&self, snapshot: &MemorySnapshot, input: &str) -> PromptContext {
        PromptContext::new(&self.system_prompt, input)
            .with_transcript(&self.render_transcript(snapshot))
    }

    /// Render the transcript as role-tagged lines, oldest first.
    ///
    /// Turns that invoked a tool are tagged with the tool's name so the
    /// reasoner can see what has already been computed.
    pub fn render_transcript(&self, snapshot: &MemorySnapshot) -> String {
        let turns = snapshot.turns();
        let start = if self.context_turns > 0 && turns.len() > self.context_turns {
            turns.len() - self.context_turns
        } else {
            0
        };

        let mut rendered = String::new();
        for turn in &turns[start..] {
            rendered.push_str(&format!("User: {}\n", turn.user_input));
            match &turn.invocation {
                Some(record) => rendered.push_str(&format!(
                    "Assistant (via {}): {}\n",
                    record.tool, turn.response
                )),
                None => rendered.push_str(&format!("Assistant: {}\n", turn.response)),
            }
        }
        rendered.trim_end().to_string()
    }

    /// Prompt for a direct conversational reply when no tool was selected.
    pub fn reply_prompt(&self, ctx: &PromptContext) -> String {
        if ctx.transcript.is_empty() {
            format!("Reply to the user.\n\nUser: {}", ctx.input)
        } else {
            format!(
                "Continue the conversation.\n\n{}\nUser: {}",
                ctx.transcript, ctx.input
            )
        }
    }

    /// Prompt that combines a tool's structured result with narrative
    /// phrasing for the final response.
    pub fn narration_prompt(&self, tool_name: &str, result: &str, input: &str) -> String {
        format!(
            "The user asked: {}\n\
             \n\
             The {} tool produced this result:\n\
             ---\n{}\n---\n\
             \n\
             Present the result to the user. Keep the substance and structure intact, \
             add a brief conversational framing, and do not invent information that is \
             not in the result.",
            input, tool_name, result
        )
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
