//! CLI for CareerPilot.
//!
//! The command-line front-end is a thin collaborator: it loads configuration,
//! wires the registry, reasoner, and session together, and shuttles text in
//! and out of `SessionController::process`.

mod chat;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::reasoner::{OllamaReasoner, Reasoner};
use crate::tools::ToolRegistry;
use crate::utils::logging::init_logging;

/// Conversational career-advice agent
#[derive(Parser)]
#[command(name = "careerpilot", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Chat with the agent (interactive when no message is given)
    Chat {
        /// Single message to process instead of starting the REPL
        message: Option<String>,
    },
    /// List the registered tools and their argument schemas
    Tools,
    /// Print the effective configuration
    Config,
}

/// CLI entry point.
pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load().with_context(|| "Failed to load configuration")?;
    init_logging(&config.logging);

    match cli.command.unwrap_or(Command::Chat { message: None }) {
        Command::Chat { message } => chat::cmd_chat(&config, message).await,
        Command::Tools => cmd_tools(&config),
        Command::Config => cmd_config(&config),
    }
}

/// Build the reasoner backend named in the configuration.
pub(crate) fn build_reasoner(config: &Config) -> Result<Arc<dyn Reasoner>> {
    match config.reasoner.backend.as_str() {
        "ollama" => Ok(Arc::new(OllamaReasoner::with_base_url(
            &config.reasoner.base_url,
            &config.agent.model,
        ))),
        other => bail!("Unknown reasoner backend '{}' (supported: ollama)", other),
    }
}

fn cmd_tools(config: &Config) -> Result<()> {
    let reasoner = build_reasoner(config)?;
    let registry = ToolRegistry::with_career_tools(reasoner);

    for name in registry.names() {
        let tool = registry.get(name)?;
        println!("{}", tool.name());
        println!("  {}", tool.description());
        for field in tool.schema().fields() {
            let marker = if field.required { "required" } else { "optional" };
            match &field.default {
                Some(default) => println!(
                    "  - {} ({}, {}, default {}): {}",
                    field.name,
                    field.kind.type_name(),
                    marker,
                    default,
                    field.description
                ),
                None => println!(
                    "  - {} ({}, {}): {}",
                    field.name,
                    field.kind.type_name(),
                    marker,
                    field.description
                ),
            }
        }
        println!();
    }
    Ok(())
}

fn cmd_config(config: &Config) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
