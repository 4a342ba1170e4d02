//! Tool registry for CareerPilot
//!
//! The registry holds the fixed set of available tools. It is mutated only
//! during setup (registration); the dispatcher sees it through an
//! [`EnabledTools`] view restricted to the session's enabled names and never
//! mutates it.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::error::{CareerError, Result};
use crate::reasoner::{Reasoner, ToolDescriptor};

use super::{
    CareerTool, InterviewQuestionTool, ResumeScorerTool, SalaryEstimatorTool, SkillsGapTool,
};

/// Names of the built-in career tools, in registration order.
pub const DEFAULT_TOOL_NAMES: [&str; 4] = [
    "skills_gap_analyzer",
    "resume_scorer",
    "salary_estimator",
    "interview_question_generator",
];

/// A registry that holds the available tools.
///
/// Tool names are unique: registering a second tool under an existing name
/// fails with [`CareerError::DuplicateTool`] and leaves the registry
/// unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let mut registry = ToolRegistry::new();
/// registry.register(Arc::new(SalaryEstimatorTool::new(reasoner)))?;
///
/// let enabled = registry.enabled(&["salary_estimator".to_string()])?;
/// assert_eq!(enabled.len(), 1);
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn CareerTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the four built-in career tools, each wired to
    /// the given reasoner backend.
    pub fn with_career_tools(reasoner: Arc<dyn Reasoner>) -> Self {
        let mut registry = Self::new();
        // Registration over a fresh registry cannot collide
        registry
            .register(Arc::new(SkillsGapTool::new(Arc::clone(&reasoner))))
            .expect("fresh registry");
        registry
            .register(Arc::new(ResumeScorerTool::new(Arc::clone(&reasoner))))
            .expect("fresh registry");
        registry
            .register(Arc::new(SalaryEstimatorTool::new(Arc::clone(&reasoner))))
            .expect("fresh registry");
        registry
            .register(Arc::new(InterviewQuestionTool::new(reasoner)))
            .expect("fresh registry");
        registry
    }

    /// Register a new tool.
    ///
    /// # Errors
    /// Fails with [`CareerError::DuplicateTool`] if a tool with the same
    /// name is already present; the registry is left unchanged.
    pub fn register(&mut self, tool: Arc<dyn CareerTool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(CareerError::DuplicateTool(name));
        }
        info!(tool = %name, "Registering tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Get a tool by name.
    ///
    /// # Errors
    /// Fails with [`CareerError::UnknownTool`] if no tool has that name.
    pub fn get(&self, name: &str) -> Result<Arc<dyn CareerTool>> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| CareerError::UnknownTool(name.to_string()))
    }

    /// Return the view restricted to the given enabled names.
    ///
    /// Validates at configuration time: every requested name must exist in
    /// the full registry.
    ///
    /// # Errors
    /// Fails with [`CareerError::UnknownTool`] naming the first absent tool;
    /// absent names are never silently ignored.
    pub fn enabled(&self, names: &[String]) -> Result<EnabledTools> {
        let mut tools = Vec::with_capacity(names.len());
        for name in names {
            tools.push(self.get(name)?);
        }
        Ok(EnabledTools { tools })
    }

    /// Check if a tool exists in the registry.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the names of all registered tools.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The sub-registry a session is allowed to use: the tools whose names were
/// enabled at configuration time, in enablement order.
///
/// Read-only; the dispatcher resolves selections against this view, which
/// makes enabled-set enforcement structural rather than a runtime check
/// against the full registry.
#[derive(Clone, Debug)]
pub struct EnabledTools {
    tools: Vec<Arc<dyn CareerTool>>,
}

impl EnabledTools {
    /// An empty enabled set (no tool may be invoked).
    pub fn none() -> Self {
        Self { tools: Vec::new() }
    }

    /// Look up an enabled tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn CareerTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Whether a tool of this name is enabled.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Descriptors for all enabled tools, for the reasoner.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    /// Names of all enabled tools, in enablement order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Number of enabled tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are enabled.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::reasoner::GenOptions;
    use crate::tools::{ToolOutput, ToolSchema};
    use async_trait::async_trait;
    use serde_json::Value;

    struct StubTool {
        name: &'static str,
    }

    #[async_trait]
    impl CareerTool for StubTool {
        fn name(&self) -> &str {
            self.name
        }
        fn description(&self) -> &str {
            "stub"
        }
        fn schema(&self) -> ToolSchema {
            ToolSchema::new(vec![])
        }
        async fn execute(&self, _args: &Value, _opts: &GenOptions) -> Result<ToolOutput> {
            Ok(ToolOutput::new("ok"))
        }
    }

    fn stub(name: &'static str) -> Arc<dyn CareerTool> {
        Arc::new(StubTool { name })
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("alpha")).unwrap();

        assert!(registry.has("alpha"));
        assert_eq!(registry.get("alpha").unwrap().name(), "alpha");
    }

    #[test]
    fn test_get_unknown_fails() {
        let registry = ToolRegistry::new();
        let err = registry.get("nope").unwrap_err();
        assert!(matches!(err, CareerError::UnknownTool(ref n) if n == "nope"));
    }

    #[test]
    fn test_duplicate_registration_leaves_registry_unchanged() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("alpha")).unwrap();

        let err = registry.register(stub("alpha")).unwrap_err();
        assert!(matches!(err, CareerError::DuplicateTool(ref n) if n == "alpha"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_enabled_subset() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("alpha")).unwrap();
        registry.register(stub("beta")).unwrap();
        registry.register(stub("gamma")).unwrap();

        let enabled = registry.enabled(&["beta".to_string(), "alpha".to_string()]).unwrap();
        assert_eq!(enabled.len(), 2);
        assert_eq!(enabled.names(), vec!["beta", "alpha"]);
        assert!(enabled.contains("alpha"));
        assert!(!enabled.contains("gamma"));
    }

    #[test]
    fn test_enabled_unknown_name_fails() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("alpha")).unwrap();

        let err = registry
            .enabled(&["alpha".to_string(), "ghost".to_string()])
            .unwrap_err();
        assert!(matches!(err, CareerError::UnknownTool(ref n) if n == "ghost"));
    }

    #[test]
    fn test_enabled_none() {
        let enabled = EnabledTools::none();
        assert!(enabled.is_empty());
        assert!(enabled.descriptors().is_empty());
    }

    #[test]
    fn test_enabled_descriptors() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("alpha")).unwrap();

        let enabled = registry.enabled(&["alpha".to_string()]).unwrap();
        let descriptors = enabled.descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "alpha");
        assert_eq!(descriptors[0].description, "stub");
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = ToolRegistry::new();
        registry.register(stub("zulu")).unwrap();
        registry.register(stub("alpha")).unwrap();
        assert_eq!(registry.names(), vec!["alpha", "zulu"]);
    }
}
