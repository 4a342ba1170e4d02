//! Configuration management for CareerPilot
//!
//! Configuration is loaded from `~/.careerpilot/config.json` with environment
//! variable overrides using the pattern `CAREERPILOT_SECTION_KEY`.

mod types;

pub use types::*;

use std::path::{Path, PathBuf};

use crate::error::Result;

impl Config {
    /// Returns the CareerPilot configuration directory path (~/.careerpilot)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".careerpilot")
    }

    /// Returns the path to the config file (~/.careerpilot/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Environment variables follow the pattern: CAREERPILOT_SECTION_KEY
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("CAREERPILOT_AGENT_MODEL") {
            self.agent.model = val;
        }
        if let Ok(val) = std::env::var("CAREERPILOT_AGENT_TEMPERATURE") {
            if let Ok(v) = val.parse() {
                self.agent.temperature = v;
            }
        }
        if let Ok(val) = std::env::var("CAREERPILOT_AGENT_MAX_TOKENS") {
            if let Ok(v) = val.parse() {
                self.agent.max_tokens = v;
            }
        }
        if let Ok(val) = std::env::var("CAREERPILOT_AGENT_REASONER_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                self.agent.reasoner_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("CAREERPILOT_AGENT_TOOL_TIMEOUT_SECS") {
            if let Ok(v) = val.parse() {
                self.agent.tool_timeout_secs = v;
            }
        }
        if let Ok(val) = std::env::var("CAREERPILOT_REASONER_BASE_URL") {
            self.reasoner.base_url = val;
        }
        if let Ok(val) = std::env::var("CAREERPILOT_TOOLS_ENABLED") {
            self.tools.enabled = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(val) = std::env::var("CAREERPILOT_LOG_LEVEL") {
            self.logging.level = val;
        }
    }
}
