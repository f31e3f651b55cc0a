//! One-shot question handler
//!
//! Runs a single question through the agent and exits. Unlike chat, a
//! failed turn here is fatal so scripts get a non-zero exit status.

use crate::commands::{build_agent, render_event};
use crate::config::Config;
use crate::error::Result;

/// Ask a single question and print the answer
///
/// # Arguments
///
/// * `config` - Validated configuration (consumed)
/// * `query` - The question to run through the agent
///
/// # Errors
///
/// Returns error if the stack cannot be assembled or the turn fails
pub async fn run_ask(config: Config, query: &str) -> Result<()> {
    tracing::info!("Running one-shot question");

    let mut agent = build_agent(&config)?;
    agent.run_turn(query, |event| render_event(&event)).await?;

    Ok(())
}
