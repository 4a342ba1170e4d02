//! Resume scorer tool
//!
//! Scores a resume out of 10 for a target role and produces actionable
//! feedback.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::reasoner::{GenOptions, Reasoner};

use super::{arg_str, ArgField, ArgKind, CareerTool, ToolOutput, ToolSchema};

/// Score a resume 0-10 for a target role.
pub struct ResumeScorerTool {
    reasoner: Arc<dyn Reasoner>,
}

impl ResumeScorerTool {
    /// Create the tool with the given reasoner backend.
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }

    fn build_prompt(args: &Value) -> String {
        format!(
            "You are an expert resume reviewer for top tech companies.\n\
             \n\
             Task:\n\
             1. Score the resume out of 10 for the specified target role.\n\
             2. Briefly explain the score.\n\
             3. List concrete, actionable improvements:\n\
                - content (projects, impact, metrics)\n\
                - structure & clarity\n\
                - keywords & ATS-friendliness\n\
             4. Provide a revised sample bullet or small section as an example.\n\
             \n\
             Be concise but specific.\n\
             \n\
             Target Role: {}\n\
             Resume:\n{}",
            arg_str(args, "target_role"),
            arg_str(args, "resume"),
        )
    }
}

#[async_trait]
impl CareerTool for ResumeScorerTool {
    fn name(&self) -> &str {
        "resume_scorer"
    }

    fn description(&self) -> &str {
        "Score a resume out of 10 for a target role and provide detailed, actionable \
         feedback. Use when the user asks to evaluate, review, or improve a resume or CV."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(vec![
            ArgField::required("target_role", ArgKind::String, "The role the resume targets"),
            ArgField::required(
                "resume",
                ArgKind::String,
                "The resume text or bullet points to score",
            ),
        ])
    }

    async fn execute(&self, args: &Value, opts: &GenOptions) -> Result<ToolOutput> {
        let prompt = Self::build_prompt(args);
        let text = self.reasoner.generate(&prompt, opts).await?;
        Ok(ToolOutput::new(text))
    }
}
