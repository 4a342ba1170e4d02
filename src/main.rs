//! CareerPilot CLI - conversational career-advice agent
//!
//! All CLI logic lives in the `cli` module. This file is just the entry point.

use careerpilot::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
