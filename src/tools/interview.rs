//! Interview question generator tool
//!
//! Generates technical and behavioral practice questions for a role and
//! seniority level.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::Result;
use crate::reasoner::{GenOptions, Reasoner};

use super::{arg_str, ArgField, ArgKind, CareerTool, ToolOutput, ToolSchema};

/// Generate practice interview questions for a role and level.
pub struct InterviewQuestionTool {
    reasoner: Arc<dyn Reasoner>,
}

impl InterviewQuestionTool {
    /// Create the tool with the given reasoner backend.
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }

    fn build_prompt(args: &Value) -> String {
        let mut spec = format!(
            "Role: {}\nLevel: {}\nQuestion Types: {}\nNumber of Questions: {}\n",
            arg_str(args, "role"),
            arg_str(args, "level"),
            arg_str(args, "question_types"),
            args.get("count").and_then(|v| v.as_i64()).unwrap_or(10),
        );
        let focus = arg_str(args, "focus_areas");
        if !focus.is_empty() {
            spec.push_str(&format!("Focus Areas: {}\n", focus));
        }

        format!(
            "You are an expert interviewer.\n\
             \n\
             Task:\n\
             1. Generate interview questions for the given role and level.\n\
             2. Include the requested mix of technical and/or behavioral questions.\n\
             3. Group questions by category (e.g., Technical - Python, Technical - SQL, \
             Behavioral).\n\
             4. For each question, optionally add:\n\
                - a short hint or what the interviewer is looking for,\n\
                - difficulty tag (easy/medium/hard).\n\
             \n\
             Input:\n{}",
            spec
        )
    }
}

#[async_trait]
impl CareerTool for InterviewQuestionTool {
    fn name(&self) -> &str {
        "interview_question_generator"
    }

    fn description(&self) -> &str {
        "Generate technical and behavioral interview questions for a given role and \
         difficulty. Use when the user wants practice questions or mock interview \
         preparation."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(vec![
            ArgField::required(
                "role",
                ArgKind::String,
                "Target role, e.g. Data Scientist or Backend Engineer",
            ),
            ArgField::optional("level", ArgKind::String, "junior / mid / senior / intern")
                .with_default(json!("mid")),
            ArgField::optional(
                "focus_areas",
                ArgKind::String,
                "Topics to emphasize, e.g. SQL, system design, ML basics",
            ),
            ArgField::optional(
                "question_types",
                ArgKind::String,
                "technical / behavioral / both",
            )
            .with_default(json!("both")),
            ArgField::optional("count", ArgKind::Integer, "How many questions to generate")
                .with_default(json!(10)),
        ])
    }

    async fn execute(&self, args: &Value, opts: &GenOptions) -> Result<ToolOutput> {
        let prompt = Self::build_prompt(args);
        let text = self.reasoner.generate(&prompt, opts).await?;
        Ok(ToolOutput::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoner::{PromptContext, Selection, ToolDescriptor};
    use std::sync::Mutex;

    struct CannedReasoner {
        last_prompt: Mutex<String>,
    }

    #[async_trait]
    impl Reasoner for CannedReasoner {
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
            Ok(json!({}))
        }
        async fn generate(&self, prompt: &str, _opts: &GenOptions) -> Result<String> {
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            Ok("Q1 ...".to_string())
        }
        fn name(&self) -> &str {
            "canned"
        }
        fn default_model(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn test_execute_renders_defaults() {
        let reasoner = Arc::new(CannedReasoner {
            last_prompt: Mutex::new(String::new()),
        });
        let tool = InterviewQuestionTool::new(Arc::clone(&reasoner) as Arc<dyn Reasoner>);

        // Validated args as the dispatcher would pass them: defaults applied
        let args = tool
            .schema()
            .validate("interview_question_generator", &json!({"role": "Data Scientist"}))
            .unwrap();
        let out = tool.execute(&args, &GenOptions::new()).await.unwrap();
        assert_eq!(out.text, "Q1 ...");

        let prompt = reasoner.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("Role: Data Scientist"));
        assert!(prompt.contains("Level: mid"));
        assert!(prompt.contains("Question Types: both"));
        assert!(prompt.contains("Number of Questions: 10"));
        assert!(!prompt.contains("Focus Areas:"));
    }

    #[test]
    fn test_schema_only_role_required() {
        let tool = InterviewQuestionTool::new(Arc::new(CannedReasoner {
            last_prompt: Mutex::new(String::new()),
        }));
        assert_eq!(tool.schema().required_names(), vec!["role"]);
        assert_eq!(tool.name(), "interview_question_generator");
    }
}
