//! Dispatcher - one processing cycle of the agent loop
//!
//! Given the raw user input, a memory snapshot, and the enabled tool set,
//! the dispatcher runs one cycle: decide whether exactly one tool applies,
//! extract its arguments, execute it inside a bounded scope, and compose the
//! final response. The cycle is infallible from the caller's point of view:
//! every reasoner or tool fault is converted into a user-visible turn, and
//! exactly one turn comes out of every cycle.
//!
//! Cycle states: Idle -> Selecting -> {NoToolSelected | ToolSelected} ->
//! ExtractingArgs -> {ArgsReady | ArgsMissing} -> Executing ->
//! {Succeeded | Failed} -> Composing -> Idle.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CareerError, ReasonerError};
use crate::memory::{MemorySnapshot, ToolInvocationRecord, Turn};
use crate::reasoner::{GenOptions, PromptContext, Reasoner, Selection};
use crate::tools::{CareerTool, EnabledTools};

use super::context::ContextBuilder;

/// Fallback response when the reasoner backend is unreachable or returns
/// output we cannot act on.
const REASONER_DOWN_REPLY: &str =
    "Sorry - I'm having trouble reaching my reasoning backend right now. \
     Please try again in a moment.";

/// Phase timeouts for one cycle.
#[derive(Debug, Clone)]
pub struct DispatcherLimits {
    /// Bound on each reasoner call (selection, extraction, composition)
    pub reasoner_timeout: Duration,
    /// Bound on a single tool invocation
    pub tool_timeout: Duration,
}

impl Default for DispatcherLimits {
    fn default() -> Self {
        Self {
            reasoner_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(120),
        }
    }
}

/// Result of one processing cycle: the response text for the caller and the
/// single turn to append to memory.
#[derive(Debug)]
pub struct CycleResult {
    /// Final response text
    pub response: String,
    /// The turn recording this cycle
    pub turn: Turn,
}

impl CycleResult {
    fn new(turn: Turn) -> Self {
        Self {
            response: turn.response.clone(),
            turn,
        }
    }
}

/// The agent loop's decision core.
///
/// Holds no conversational state: everything it knows about the dialogue
/// arrives through the memory snapshot, so a cycle is a pure function of
/// (input, transcript, enabled tools) up to the reasoner's own
/// non-determinism.
pub struct Dispatcher {
    /// Language-generation collaborator
    reasoner: Arc<dyn Reasoner>,
    /// Prompt construction
    context_builder: ContextBuilder,
    /// Phase timeouts
    limits: DispatcherLimits,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(reasoner: Arc<dyn Reasoner>, limits: DispatcherLimits) -> Self {
        Self {
            reasoner,
            context_builder: ContextBuilder::new(),
            limits,
        }
    }

    /// Create a dispatcher with a custom context builder.
    pub fn with_context_builder(
        reasoner: Arc<dyn Reasoner>,
        limits: DispatcherLimits,
        context_builder: ContextBuilder,
    ) -> Self {
        Self {
            reasoner,
            context_builder,
            limits,
        }
    }

    /// Run one processing cycle.
    ///
    /// Infallible: faults become turns. Exactly one turn is produced per
    /// call; the caller is responsible for appending it to memory.
    pub async fn run_cycle(
        &self,
        input: &str,
        snapshot: &MemorySnapshot,
        tools: &EnabledTools,
        opts: &GenOptions,
    ) -> CycleResult {
        let ctx = self.context_builder.build(snapshot, input);

        // Selection phase
        debug!(enabled = tools.len(), "Selecting");
        let selection = match self.select(&ctx, tools, opts).await {
            Ok(selection) => selection,
            Err(e) => {
                warn!(error = %e, "Selection failed");
                return CycleResult::new(Turn::reasoner_failure(input, REASONER_DOWN_REPLY));
            }
        };

        let (name, confidence) = match selection {
            Selection::None => {
                debug!("No tool selected");
                return self.direct_reply(input, &ctx, opts).await;
            }
            Selection::Ambiguous { candidates } => {
                debug!(?candidates, "Ambiguous selection");
                let response = ambiguity_reply(&candidates);
                return CycleResult::new(Turn::clarification(input, &response));
            }
            Selection::Tool { name, confidence } => (name, confidence),
        };

        // Enabled-set enforcement: a selection outside the enabled view is
        // malformed reasoner output, not an invocation.
        let Some(tool) = tools.get(&name) else {
            warn!(tool = %name, "Reasoner selected a tool outside the enabled set");
            let response = format!(
                "That looks like a job for the {} tool, but it isn't enabled in this \
                 session. Enable it and ask again, or rephrase your request.",
                name
            );
            return CycleResult::new(Turn::clarification(input, &response));
        };
        let tool = Arc::clone(tool);
        debug!(tool = %name, confidence, "Tool selected");

        // Argument extraction phase
        let schema = tool.schema();
        let raw_args = match self.extract(&schema, &ctx, opts).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(tool = %name, error = %e, "Extraction failed");
                return CycleResult::new(Turn::reasoner_failure(input, REASONER_DOWN_REPLY));
            }
        };

        let args = match schema.validate(&name, &raw_args) {
            Ok(args) => args,
            Err(CareerError::MissingArguments { fields, .. }) => {
                debug!(tool = %name, ?fields, "Arguments missing");
                let response = missing_args_reply(&*tool, &fields);
                return CycleResult::new(Turn::clarification(input, &response));
            }
            Err(e) => {
                warn!(tool = %name, error = %e, "Argument validation failed");
                return CycleResult::new(Turn::reasoner_failure(input, REASONER_DOWN_REPLY));
            }
        };

        // Execution phase
        let record = self.execute(&*tool, args, opts).await;

        // Composition phase
        self.compose(input, record, opts).await
    }

    async fn select(
        &self,
        ctx: &PromptContext,
        tools: &EnabledTools,
        opts: &GenOptions,
    ) -> crate::error::Result<Selection> {
        if tools.is_empty() {
            return Ok(Selection::None);
        }
        let descriptors = tools.descriptors();
        match tokio::time::timeout(
            self.limits.reasoner_timeout,
            self.reasoner.select(ctx, &descriptors, opts),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ReasonerError::Timeout("selection phase".into()).into()),
        }
    }

    async fn extract(
        &self,
        schema: &crate::tools::ToolSchema,
        ctx: &PromptContext,
        opts: &GenOptions,
    ) -> crate::error::Result<Value> {
        match tokio::time::timeout(
            self.limits.reasoner_timeout,
            self.reasoner.extract(schema, ctx, opts),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ReasonerError::Timeout("extraction phase".into()).into()),
        }
    }

    /// Execute the tool inside a scoped-and-bounded boundary: a timeout plus
    /// a catch-all on the tool's own error path.
    async fn execute(
        &self,
        tool: &dyn CareerTool,
        args: Value,
        opts: &GenOptions,
    ) -> ToolInvocationRecord {
        let name = tool.name().to_string();
        let start = std::time::Instant::now();

        match tokio::time::timeout(self.limits.tool_timeout, tool.execute(&args, opts)).await {
            Ok(Ok(output)) => {
                info!(
                    tool = %name,
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Tool executed successfully"
                );
                ToolInvocationRecord::succeeded(&name, args, &output.text)
            }
            Ok(Err(e)) => {
                warn!(
                    tool = %name,
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Tool execution failed"
                );
                ToolInvocationRecord::failed(&name, args, &e.to_string())
            }
            Err(_) => {
                warn!(
                    tool = %name,
                    timeout_secs = self.limits.tool_timeout.as_secs(),
                    "Tool execution timed out"
                );
                ToolInvocationRecord::timed_out(&name, args)
            }
        }
    }

    /// Compose the final response for a cycle that attempted a tool.
    async fn compose(
        &self,
        input: &str,
        record: ToolInvocationRecord,
        opts: &GenOptions,
    ) -> CycleResult {
        use crate::memory::InvocationResult;

        let response = match &record.result {
            InvocationResult::Succeeded { output } => {
                let prompt = self
                    .context_builder
                    .narration_prompt(&record.tool, output, input);
                match tokio::time::timeout(
                    self.limits.reasoner_timeout,
                    self.reasoner.generate(&prompt, opts),
                )
                .await
                {
                    Ok(Ok(narrated)) => narrated,
                    // Narration is best-effort: fall back to the tool's own text
                    Ok(Err(e)) => {
                        warn!(tool = %record.tool, error = %e, "Narration failed, returning raw result");
                        output.clone()
                    }
                    Err(_) => {
                        warn!(tool = %record.tool, "Narration timed out, returning raw result");
                        output.clone()
                    }
                }
            }
            InvocationResult::Failed { error } => format!(
                "I tried to run the {} tool but it failed ({}). You could try again or \
                 rephrase your request.",
                record.tool, error
            ),
            InvocationResult::TimedOut => format!(
                "The {} tool took longer than its {} second budget, so I stopped it. \
                 Please try again.",
                record.tool,
                self.limits.tool_timeout.as_secs()
            ),
        };

        CycleResult::new(Turn::with_invocation(input, &response, record))
    }

    /// Direct conversational reply when no tool was selected.
    async fn direct_reply(
        &self,
        input: &str,
        ctx: &PromptContext,
        opts: &GenOptions,
    ) -> CycleResult {
        let prompt = self.context_builder.reply_prompt(ctx);
        match tokio::time::timeout(
            self.limits.reasoner_timeout,
            self.reasoner.generate(&prompt, opts),
        )
        .await
        {
            Ok(Ok(response)) => CycleResult::new(Turn::answered(input, &response)),
            Ok(Err(e)) => {
                warn!(error = %e, "Direct reply failed");
                CycleResult::new(Turn::reasoner_failure(input, REASONER_DOWN_REPLY))
            }
            Err(_) => {
                warn!("Direct reply timed out");
                CycleResult::new(Turn::reasoner_failure(input, REASONER_DOWN_REPLY))
            }
        }
    }

}

/// Clarification text when several tools plausibly match.
fn ambiguity_reply(candidates: &[String]) -> String {
    format!(
        "Your request could match more than one of my tools: {}. \
         Could you tell me which one you'd like me to use?",
        candidates.join(", ")
    )
}

/// Clarification text naming every missing required field.
fn missing_args_reply(tool: &dyn CareerTool, fields: &[String]) -> String {
    let schema = tool.schema();
    let mut wanted = Vec::with_capacity(fields.len());
    for field in schema.fields() {
        if fields.contains(&field.name) {
            wanted.push(format!("- {} ({})", field.name, field.description));
        }
    }
    format!(
        "I can run the {} tool for you, but I still need:\n{}\n\
         Could you provide those?",
        tool.name(),
        wanted.join("\n")
    )
}
