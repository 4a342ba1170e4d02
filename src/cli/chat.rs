//! Chat command handler (interactive + single-message mode).

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::session::SessionController;
use crate::tools::ToolRegistry;

use super::build_reasoner;

/// Interactive or single-message chat mode.
pub(crate) async fn cmd_chat(config: &Config, message: Option<String>) -> Result<()> {
    let reasoner = build_reasoner(config)?;
    let registry = Arc::new(ToolRegistry::with_career_tools(Arc::clone(&reasoner)));
    let mut session = SessionController::new(registry, reasoner, config)
        .with_context(|| "Failed to create session")?;

    if let Some(msg) = message {
        // Single message mode
        let response = session.process(&msg).await;
        println!("{}", response);
        return Ok(());
    }

    // Interactive mode
    println!("CareerPilot - career advice agent");
    println!(
        "Ask about skill gaps, resumes, salaries, or interview prep. Enabled tools: {}.",
        session.enabled_tools().join(", ")
    );
    println!("Commands: /reset clears the conversation, /tools lists tools, 'quit' or 'exit' stops.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => {
                // EOF
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "quit" || input == "exit" {
                    println!("Goodbye!");
                    break;
                }
                if input == "/reset" {
                    session.reset();
                    println!("Conversation cleared.");
                    println!();
                    continue;
                }
                if input == "/tools" {
                    println!("Enabled tools: {}", session.enabled_tools().join(", "));
                    println!();
                    continue;
                }

                let response = session.process(input).await;
                println!();
                println!("{}", response);
                println!();
            }
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }
    }

    Ok(())
}
