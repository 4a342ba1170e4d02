//! Session module - configuration and memory for one interaction period
//!
//! A [`SessionController`] owns exactly one [`Memory`] and the configuration
//! that governs it: which tools are enabled, which model to use, and the
//! generation temperature. It wires one dispatcher cycle per processed input
//! and appends the single resulting turn.
//!
//! Processing is strictly sequential: `process` takes `&mut self`, so two
//! cycles can never interleave against the same memory. Independent sessions
//! share only the immutable tool registry, by reference.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::agent::{ContextBuilder, Dispatcher, DispatcherLimits};
use crate::config::Config;
use crate::error::Result;
use crate::memory::Memory;
use crate::reasoner::{GenOptions, Reasoner};
use crate::tools::{EnabledTools, ToolRegistry};

/// Per-session configuration: enabled tool names and generation knobs.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Names of tools the agent may use
    pub enabled_tools: Vec<String>,
    /// Generation temperature
    pub temperature: f32,
    /// Model identifier for the reasoner backend
    pub model: String,
    /// Maximum tokens per generation
    pub max_tokens: u32,
}

impl SessionOptions {
    /// Build session options from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            enabled_tools: config.tools.enabled.clone(),
            temperature: config.agent.temperature,
            model: config.agent.model.clone(),
            max_tokens: config.agent.max_tokens,
        }
    }

    fn gen_options(&self) -> GenOptions {
        GenOptions::new()
            .with_model(&self.model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens)
    }
}

/// Owns configuration and memory for one user session.
///
/// Created at session start, discarded at session end; there is no
/// persistence and no cross-session sharing.
pub struct SessionController {
    /// Unique session identifier
    id: Uuid,
    /// The full tool registry, shared read-only across sessions
    registry: Arc<ToolRegistry>,
    /// The dispatcher for this session
    dispatcher: Dispatcher,
    /// Current session options
    options: SessionOptions,
    /// Enabled-tool view, validated against the registry
    enabled: EnabledTools,
    /// The session transcript
    memory: Memory,
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl SessionController {
    /// Create a session over the given registry and reasoner.
    ///
    /// # Errors
    /// Fails with [`crate::error::CareerError::UnknownTool`] if the
    /// configuration enables a tool name the registry doesn't have. This is
    /// a hard configuration-time failure, never silently ignored.
    pub fn new(
        registry: Arc<ToolRegistry>,
        reasoner: Arc<dyn Reasoner>,
        config: &Config,
    ) -> Result<Self> {
        let options = SessionOptions::from_config(config);
        let enabled = registry.enabled(&options.enabled_tools)?;

        let limits = DispatcherLimits {
            reasoner_timeout: std::time::Duration::from_secs(config.agent.reasoner_timeout_secs),
            tool_timeout: std::time::Duration::from_secs(config.agent.tool_timeout_secs),
        };
        let context_builder =
            ContextBuilder::new().with_context_turns(config.agent.context_turns);
        let dispatcher = Dispatcher::with_context_builder(reasoner, limits, context_builder);

        let id = Uuid::new_v4();
        info!(session = %id, tools = enabled.len(), "Session created");

        Ok(Self {
            id,
            registry,
            dispatcher,
            options,
            enabled,
            memory: Memory::new(),
        })
    }

    /// Process one user input through a full dispatcher cycle.
    ///
    /// Appends exactly one turn to memory and returns the response text.
    /// The append happens after the cycle completes, so cancelling the
    /// in-flight future leaves memory untouched - a turn is recorded fully
    /// or not at all.
    pub async fn process(&mut self, input: &str) -> String {
        let snapshot = self.memory.snapshot();
        let gen = self.options.gen_options();

        debug!(session = %self.id, turn = self.memory.len() + 1, "Processing input");
        let result = self
            .dispatcher
            .run_cycle(input, &snapshot, &self.enabled, &gen)
            .await;

        self.memory.append(result.turn);
        result.response
    }

    /// Clear the session transcript. Idempotent.
    pub fn reset(&mut self) {
        info!(session = %self.id, "Session reset");
        self.memory.clear();
    }

    /// Replace the session options between cycles.
    ///
    /// Never applies mid-cycle: `&mut self` means no cycle is in flight.
    ///
    /// # Errors
    /// Fails with [`crate::error::CareerError::UnknownTool`] if an enabled
    /// name is absent from the registry; the previous options are kept.
    pub fn configure(&mut self, options: SessionOptions) -> Result<()> {
        let enabled = self.registry.enabled(&options.enabled_tools)?;
        debug!(session = %self.id, tools = enabled.len(), "Session reconfigured");
        self.enabled = enabled;
        self.options = options;
        Ok(())
    }

    /// This session's unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The session transcript.
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// The current session options.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Names of the currently enabled tools.
    pub fn enabled_tools(&self) -> Vec<&str> {
        self.enabled.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::memory::TurnOutcome;
    use crate::reasoner::{PromptContext, Selection, ToolDescriptor};
    use crate::tools::ToolSchema;
    use async_trait::async_trait;
    use serde_json::Value;

    /// Reasoner that never selects a tool and echoes a fixed reply.
    struct EchoReasoner;

    #[async_trait]
    impl Reasoner for EchoReasoner {
        async fn select(
            &self,
            _ctx: &PromptContext,
            _tools: &[ToolDescriptor],
            _opts: &GenOptions,
        ) -> Result<Selection> {
            Ok(Selection::None)
        }
        async fn extract(
            &self,
            _schema: &ToolSchema,
            _ctx: &PromptContext,
            _opts: &GenOptions,
        ) -> Result<Value> {
            Ok(serde_json::json!({}))
        }
        async fn generate(&self, _prompt: &str, _opts: &GenOptions) -> Result<String> {
            Ok("echo reply".to_string())
        }
        fn name(&self) -> &str {
            "echo"
        }
        fn default_model(&self) -> &str {
            "echo"
        }
    }

    fn controller(config: &Config) -> Result<SessionController> {
        let reasoner: Arc<dyn Reasoner> = Arc::new(EchoReasoner);
        let registry = Arc::new(ToolRegistry::with_career_tools(Arc::clone(&reasoner)));
        SessionController::new(registry, reasoner, config)
    }

    #[tokio::test]
    async fn test_process_appends_one_turn_per_input() {
        let mut session = controller(&Config::default()).unwrap();

        session.process("one").await;
        session.process("two").await;
        session.process("three").await;

        assert_eq!(session.memory().len(), 3);
        let snapshot = session.memory().snapshot();
        assert_eq!(snapshot.turns()[0].user_input, "one");
        assert_eq!(snapshot.turns()[2].user_input, "three");
    }

    #[tokio::test]
    async fn test_process_returns_response_text() {
        let mut session = controller(&Config::default()).unwrap();
        let response = session.process("hello").await;
        assert_eq!(response, "echo reply");
        assert_eq!(
            session.memory().last().unwrap().outcome,
            TurnOutcome::Answered
        );
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let mut session = controller(&Config::default()).unwrap();
        session.process("hello").await;
        assert_eq!(session.memory().len(), 1);

        session.reset();
        assert!(session.memory().is_empty());
        session.reset();
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_new_with_unknown_enabled_tool_fails() {
        let mut config = Config::default();
        config.tools.enabled.push("web_search".to_string());
        let err = controller(&config).unwrap_err();
        assert!(err.to_string().contains("web_search"));
    }

    #[test]
    fn test_configure_validates_and_keeps_previous_on_error() {
        let mut session = controller(&Config::default()).unwrap();
        let before = session.enabled_tools().len();

        let mut options = SessionOptions::from_config(&Config::default());
        options.enabled_tools = vec!["ghost".to_string()];
        assert!(session.configure(options).is_err());
        assert_eq!(session.enabled_tools().len(), before);
    }

    #[test]
    fn test_configure_applies_new_enabled_set() {
        let mut session = controller(&Config::default()).unwrap();

        let mut options = SessionOptions::from_config(&Config::default());
        options.enabled_tools = vec!["salary_estimator".to_string()];
        options.temperature = 0.1;
        session.configure(options).unwrap();

        assert_eq!(session.enabled_tools(), vec!["salary_estimator"]);
        assert_eq!(session.options().temperature, 0.1);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = controller(&Config::default()).unwrap();
        let b = controller(&Config::default()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_session_options_from_config() {
        let config = Config::default();
        let options = SessionOptions::from_config(&config);
        assert_eq!(options.model, config.agent.model);
        assert_eq!(options.enabled_tools.len(), 4);

        let gen = options.gen_options();
        assert_eq!(gen.model.as_deref(), Some(config.agent.model.as_str()));
        assert_eq!(gen.temperature, Some(config.agent.temperature));
    }
}
