//! CareerPilot - conversational career-advice agent
//!
//! A tool-routing agent loop with per-session conversational memory. Free-text
//! input goes through one dispatcher cycle: select at most one career tool,
//! extract its arguments, execute it inside a bounded scope, and compose the
//! final response, folding the result back into the session transcript.

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod memory;
pub mod reasoner;
pub mod session;
pub mod tools;
pub mod utils;

pub use agent::{CycleResult, Dispatcher, DispatcherLimits};
pub use config::Config;
pub use error::{CareerError, ReasonerError, Result};
pub use memory::{Memory, MemorySnapshot, ToolInvocationRecord, Turn, TurnOutcome};
pub use reasoner::{GenOptions, OllamaReasoner, Reasoner, Selection, ToolDescriptor};
pub use session::{SessionController, SessionOptions};
pub use tools::{CareerTool, EnabledTools, ToolRegistry};
