//! Tools module - the career tools exposed to the agent loop
//!
//! A tool is a named, schema-described, stateless function: given validated
//! arguments it produces a structured textual result. The dispatcher resolves
//! tools through the [`ToolRegistry`] and invokes exactly zero or one per
//! processing cycle.
//!
//! # Built-in tools
//!
//! - `skills_gap_analyzer`: compare current skills against a target job
//! - `resume_scorer`: score a resume 0-10 for a target role
//! - `salary_estimator`: estimate a realistic base salary range
//! - `interview_question_generator`: generate practice interview questions

pub mod interview;
pub mod registry;
pub mod resume_score;
pub mod salary;
pub mod schema;
pub mod skills_gap;

pub use interview::InterviewQuestionTool;
pub use registry::{EnabledTools, ToolRegistry, DEFAULT_TOOL_NAMES};
pub use resume_score::ResumeScorerTool;
pub use salary::SalaryEstimatorTool;
pub use schema::{ArgField, ArgKind, ToolSchema};
pub use skills_gap::SkillsGapTool;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::reasoner::{GenOptions, ToolDescriptor};

/// Structured textual result of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    /// The tool's full result text
    pub text: String,
}

impl ToolOutput {
    /// Create a new tool output.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Trait that all career tools implement.
///
/// Tools are stateless across invocations: a handle to the reasoner backend
/// is configuration, not state, and `execute` takes only validated arguments
/// plus generation options.
#[async_trait]
pub trait CareerTool: Send + Sync {
    /// Get the tool name. Unique within a registry.
    fn name(&self) -> &str;

    /// Get the tool description, sent to the reasoner to guide selection.
    fn description(&self) -> &str;

    /// Get the tool's argument schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with validated arguments.
    ///
    /// Callers are responsible for validating `args` against [`schema`]
    /// first; `execute` may assume required fields are present.
    ///
    /// [`schema`]: CareerTool::schema
    async fn execute(&self, args: &Value, opts: &GenOptions) -> Result<ToolOutput>;

    /// Descriptor for this tool, as sent to the reasoner.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            self.name(),
            self.description(),
            self.schema().to_json_schema(),
        )
    }
}

impl std::fmt::Debug for dyn CareerTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CareerTool")
            .field("name", &self.name())
            .finish()
    }
}

/// Render a validated string argument, or an empty string when absent.
///
/// Tools use this for optional fields that were filled from defaults or
/// left out entirely.
pub(crate) fn arg_str<'a>(args: &'a Value, name: &str) -> &'a str {
    args.get(name).and_then(|v| v.as_str()).unwrap_or("")
}
