//! Skills-gap analyzer tool
//!
//! Compares the user's current skills against a target job's requirements
//! and produces a structured learning path.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::reasoner::{GenOptions, Reasoner};

use super::{arg_str, ArgField, ArgKind, CareerTool, ToolOutput, ToolSchema};

/// Analyze the gap between current skills and a target role.
pub struct SkillsGapTool {
    reasoner: Arc<dyn Reasoner>,
}

impl SkillsGapTool {
    /// Create the tool with the given reasoner backend.
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }

    fn build_prompt(args: &Value) -> String {
        let mut profile = format!(
            "Target Role: {}\nUser Skills:\n{}\n",
            arg_str(args, "target_role"),
            arg_str(args, "user_skills"),
        );
        let location = arg_str(args, "location");
        if !location.is_empty() {
            profile.push_str(&format!("Location: {}\n", location));
        }
        if let Some(years) = args.get("years_experience").and_then(|v| v.as_i64()) {
            profile.push_str(&format!("Years of Experience: {}\n", years));
        }
        let jd = arg_str(args, "job_description");
        if !jd.is_empty() {
            profile.push_str(&format!("Target Job Description:\n{}\n", jd));
        }

        format!(
            "You are a senior career coach and technical mentor.\n\
             \n\
             Task: Compare the user's current skills against the target job and identify:\n\
             1. Strong matches\n\
             2. Partial matches\n\
             3. Clear gaps\n\
             4. A step-by-step learning path (ordered roadmap) to close the gaps.\n\
             5. Recommended resources or practice project ideas.\n\
             \n\
             Be concrete and structured. Use short sections and bullet points.\n\
             \n\
             User & Job Info:\n{}",
            profile
        )
    }
}

#[async_trait]
impl CareerTool for SkillsGapTool {
    fn name(&self) -> &str {
        "skills_gap_analyzer"
    }

    fn description(&self) -> &str {
        "Analyze the gap between a user's current skills and a target job's requirements \
         and generate a structured learning path. Use when the user asks about skill gaps, \
         a learning roadmap, or how to reach a specific role."
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(vec![
            ArgField::required("target_role", ArgKind::String, "The role the user is aiming for"),
            ArgField::required(
                "user_skills",
                ArgKind::String,
                "The user's current skills, one per line or comma-separated",
            ),
            ArgField::optional(
                "job_description",
                ArgKind::String,
                "Target job description or requirement bullets",
            ),
            ArgField::optional("location", ArgKind::String, "City or country"),
            ArgField::optional(
                "years_experience",
                ArgKind::Integer,
                "Years of professional experience",
            ),
        ])
    }

    async fn execute(&self, args: &Value, opts: &GenOptions) -> Result<ToolOutput> {
        let prompt = Self::build_prompt(args);
        let text = self.reasoner.generate(&prompt, opts).await?;
        Ok(ToolOutput::new(text))
    }
}
