//! Integration tests for CareerPilot
//!
//! These tests drive full dispatcher cycles through a `SessionController`
//! with a deterministic scripted reasoner, verifying the end-to-end
//! properties of the agent loop: transcript growth, enabled-set enforcement,
//! clarification behavior, timeout recovery, and reset semantics.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use careerpilot::memory::InvocationResult;
use careerpilot::reasoner::{GenOptions, PromptContext, Reasoner, Selection, ToolDescriptor};
use careerpilot::tools::ToolSchema;
use careerpilot::{
    CareerError, Config, SessionController, SessionOptions, ToolRegistry, TurnOutcome,
};

// ============================================================================
// Scripted reasoner
// ============================================================================

/// Deterministic reasoner stand-in.
///
/// Selection and extraction return fixed scripted values; generation returns
/// a fixed reply, except that prompts containing `hang_on` sleep far past
/// any test timeout to simulate a hung tool backend.
struct ScriptedReasoner {
    selection: Selection,
    extraction: Value,
    reply: String,
    hang_on: Option<String>,
}

impl ScriptedReasoner {
    fn conversational() -> Self {
        Self {
            selection: Selection::None,
            extraction: json!({}),
            reply: "sure, happy to help".to_string(),
            hang_on: None,
        }
    }

    fn selecting(tool: &str, extraction: Value) -> Self {
        Self {
            selection: Selection::Tool {
                name: tool.to_string(),
                confidence: 0.9,
            },
            extraction,
            reply: "here is what I found".to_string(),
            hang_on: None,
        }
    }

    fn with_hang_on(mut self, marker: &str) -> Self {
        self.hang_on = Some(marker.to_string());
        self
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn select(
        &self,
        _ctx: &PromptContext,
        _tools: &[ToolDescriptor],
        _opts: &GenOptions,
    ) -> careerpilot::Result<Selection> {
        Ok(self.selection.clone())
    }

    async fn extract(
        &self,
        _schema: &ToolSchema,
        _ctx: &PromptContext,
        _opts: &GenOptions,
    ) -> careerpilot::Result<Value> {
        Ok(self.extraction.clone())
    }

    async fn generate(&self, prompt: &str, _opts: &GenOptions) -> careerpilot::Result<String> {
        if let Some(marker) = &self.hang_on {
            if prompt.contains(marker) {
                tokio::time::sleep(Duration::from_secs(300)).await;
            }
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn default_model(&self) -> &str {
        "scripted"
    }
}

fn session_with(reasoner: ScriptedReasoner, config: &Config) -> SessionController {
    let reasoner: Arc<dyn Reasoner> = Arc::new(reasoner);
    let registry = Arc::new(ToolRegistry::with_career_tools(Arc::clone(&reasoner)));
    SessionController::new(registry, reasoner, config).unwrap()
}

// ============================================================================
// Transcript growth
// ============================================================================

#[tokio::test]
async fn test_n_processed_inputs_yield_n_turns_in_call_order() {
    let mut session = session_with(ScriptedReasoner::conversational(), &Config::default());

    let inputs = ["one", "two", "three", "four", "five"];
    for input in inputs {
        session.process(input).await;
    }

    let snapshot = session.memory().snapshot();
    assert_eq!(snapshot.len(), inputs.len());
    for (turn, input) in snapshot.turns().iter().zip(inputs) {
        assert_eq!(turn.user_input, input);
    }
}

// ============================================================================
// Enabled-set enforcement
// ============================================================================

#[tokio::test]
async fn test_disabled_tool_selection_never_produces_a_record() {
    // The reasoner insists on the resume scorer, but only the salary
    // estimator is enabled this session.
    let mut config = Config::default();
    config.tools.enabled = vec!["salary_estimator".to_string()];

    let mut session = session_with(
        ScriptedReasoner::selecting("resume_scorer", json!({"target_role": "SRE", "resume": "x"})),
        &config,
    );

    session.process("score my resume please").await;

    let turn = session.memory().last().unwrap().clone();
    assert!(turn.invocation.is_none());
    assert_eq!(turn.outcome, TurnOutcome::Clarification);
}

// ============================================================================
// Missing arguments
// ============================================================================

#[tokio::test]
async fn test_missing_arguments_yield_clarification_without_record() {
    // "Score my resume" with no resume content and no target role supplied:
    // extraction finds nothing, so the agent must ask, not invoke.
    let mut session = session_with(
        ScriptedReasoner::selecting("resume_scorer", json!({})),
        &Config::default(),
    );

    let response = session.process("Score my resume").await;

    assert!(response.contains("target_role"));
    assert!(response.contains("resume"));

    let turn = session.memory().last().unwrap().clone();
    assert_eq!(turn.outcome, TurnOutcome::Clarification);
    assert!(turn.invocation.is_none());
}

#[tokio::test]
async fn test_partial_arguments_still_ask_for_the_rest() {
    let mut session = session_with(
        ScriptedReasoner::selecting("salary_estimator", json!({"title": "Data Scientist"})),
        &Config::default(),
    );

    let response = session.process("what could I earn?").await;

    let turn = session.memory().last().unwrap().clone();
    assert_eq!(turn.outcome, TurnOutcome::Clarification);
    assert!(turn.invocation.is_none());
    assert!(response.contains("location"));
    assert!(response.contains("years_experience"));
    // The field that was provided is not asked for again
    assert!(!response.contains("- title"));
}

// ============================================================================
// Tool timeout
// ============================================================================

#[tokio::test]
async fn test_tool_timeout_ends_cycle_without_propagating() {
    // The salary estimator's generation hangs far beyond the one-second tool
    // budget; the cycle must end in a degraded turn, not an unhandled fault.
    let mut config = Config::default();
    config.agent.tool_timeout_secs = 1;

    let reasoner = ScriptedReasoner::selecting(
        "salary_estimator",
        json!({"title": "Data Scientist", "location": "SF", "years_experience": 1}),
    )
    .with_hang_on("compensation advisor");

    let mut session = session_with(reasoner, &config);
    let response = session.process("estimate my salary").await;

    assert!(response.contains("longer than"));

    let turn = session.memory().last().unwrap().clone();
    assert_eq!(turn.outcome, TurnOutcome::ToolFailed);
    let record = turn.invocation.unwrap();
    assert_eq!(record.tool, "salary_estimator");
    assert_eq!(record.result, InvocationResult::TimedOut);
}

// ============================================================================
// Reset
// ============================================================================

#[tokio::test]
async fn test_reset_twice_yields_empty_memory_both_times() {
    let mut session = session_with(ScriptedReasoner::conversational(), &Config::default());
    session.process("hello").await;
    session.process("again").await;

    session.reset();
    assert!(session.memory().is_empty());
    session.reset();
    assert!(session.memory().is_empty());

    // The session remains usable after reset
    session.process("fresh start").await;
    assert_eq!(session.memory().len(), 1);
}

// ============================================================================
// End-to-end: salary estimation
// ============================================================================

#[tokio::test]
async fn test_salary_estimation_end_to_end() {
    // Only the salary estimator is enabled; the other three are disabled.
    let mut config = Config::default();
    config.tools.enabled = vec!["salary_estimator".to_string()];

    let reasoner = ScriptedReasoner::selecting(
        "salary_estimator",
        json!({
            "title": "Data Scientist",
            "location": "San Francisco Bay Area",
            "years_experience": 1
        }),
    );

    let mut session = session_with(reasoner, &config);
    let response = session
        .process(
            "Job Title: Data Scientist, Location: San Francisco Bay Area, YOE: 1, \
             Estimate realistic salary ranges",
        )
        .await;

    assert!(!response.is_empty());

    let turn = session.memory().last().unwrap().clone();
    assert_eq!(turn.outcome, TurnOutcome::ToolSucceeded);
    let record = turn.invocation.unwrap();
    assert_eq!(record.tool, "salary_estimator");
    assert_eq!(record.arguments["title"], "Data Scientist");
    assert_eq!(record.arguments["location"], "San Francisco Bay Area");
    assert_eq!(record.arguments["years_experience"], 1);
    assert!(record.is_success());
}

// ============================================================================
// Ambiguity
// ============================================================================

#[tokio::test]
async fn test_ambiguous_selection_surfaces_clarification() {
    let reasoner = ScriptedReasoner {
        selection: Selection::Ambiguous {
            candidates: vec![
                "skills_gap_analyzer".to_string(),
                "interview_question_generator".to_string(),
            ],
        },
        extraction: json!({}),
        reply: "unused".to_string(),
        hang_on: None,
    };

    let mut session = session_with(reasoner, &Config::default());
    let response = session.process("help me get ready for a new role").await;

    assert!(response.contains("skills_gap_analyzer"));
    assert!(response.contains("interview_question_generator"));

    let turn = session.memory().last().unwrap().clone();
    assert_eq!(turn.outcome, TurnOutcome::Clarification);
    assert!(turn.invocation.is_none());
}

// ============================================================================
// Registry configuration
// ============================================================================

#[tokio::test]
async fn test_duplicate_registration_fails_and_leaves_registry_unchanged() {
    let reasoner: Arc<dyn Reasoner> = Arc::new(ScriptedReasoner::conversational());
    let mut registry = ToolRegistry::with_career_tools(Arc::clone(&reasoner));
    assert_eq!(registry.len(), 4);

    let duplicate = Arc::new(careerpilot::tools::SalaryEstimatorTool::new(reasoner));
    let err = registry.register(duplicate).unwrap_err();

    assert!(matches!(err, CareerError::DuplicateTool(ref name) if name == "salary_estimator"));
    assert_eq!(registry.len(), 4);
}

#[tokio::test]
async fn test_unknown_enabled_tool_is_a_hard_configuration_failure() {
    let mut config = Config::default();
    config.tools.enabled = vec!["salary_estimator".to_string(), "time_machine".to_string()];

    let reasoner: Arc<dyn Reasoner> = Arc::new(ScriptedReasoner::conversational());
    let registry = Arc::new(ToolRegistry::with_career_tools(Arc::clone(&reasoner)));
    let err = SessionController::new(registry, reasoner, &config).unwrap_err();

    assert!(matches!(err, CareerError::UnknownTool(ref name) if name == "time_machine"));
}

// ============================================================================
// Reconfiguration between cycles
// ============================================================================

#[tokio::test]
async fn test_configure_changes_enabled_set_between_cycles() {
    let mut session = session_with(
        ScriptedReasoner::selecting(
            "salary_estimator",
            json!({"title": "SRE", "location": "Berlin", "years_experience": 4}),
        ),
        &Config::default(),
    );

    // First cycle with everything enabled invokes the tool
    session.process("salary for an SRE in Berlin, 4 years").await;
    assert_eq!(
        session.memory().last().unwrap().outcome,
        TurnOutcome::ToolSucceeded
    );

    // Disable the estimator and ask again: same selection, no invocation
    let mut options = SessionOptions::from_config(&Config::default());
    options.enabled_tools = vec!["resume_scorer".to_string()];
    session.configure(options).unwrap();

    session.process("salary for an SRE in Berlin, 4 years").await;
    let turn = session.memory().last().unwrap().clone();
    assert!(turn.invocation.is_none());
    assert_eq!(turn.outcome, TurnOutcome::Clarification);
}

// ============================================================================
// Parallel sessions
// ============================================================================

#[tokio::test]
async fn test_independent_sessions_share_only_the_registry() {
    let reasoner: Arc<dyn Reasoner> = Arc::new(ScriptedReasoner::conversational());
    let registry = Arc::new(ToolRegistry::with_career_tools(Arc::clone(&reasoner)));
    let config = Config::default();

    let mut a =
        SessionController::new(Arc::clone(&registry), Arc::clone(&reasoner), &config).unwrap();
    let mut b = SessionController::new(registry, reasoner, &config).unwrap();

    let (ra, rb) = tokio::join!(a.process("from session a"), b.process("from session b"));
    assert!(!ra.is_empty());
    assert!(!rb.is_empty());

    assert_eq!(a.memory().len(), 1);
    assert_eq!(b.memory().len(), 1);
    assert_eq!(a.memory().last().unwrap().user_input, "from session a");
    assert_eq!(b.memory().last().unwrap().user_input, "from session b");
    assert_ne!(a.id(), b.id());
}
