/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat` — Interactive chat session
- `ask`  — One-shot question

Both handlers assemble the same stack: provider, tool registry, system
prompt, and the agent loop. They differ only in how input arrives and how
long the session lives.
*/

use crate::agent::{Agent, AgentEvent};
use crate::config::Config;
use crate::error::Result;
use crate::prompts::build_system_prompt;
use crate::providers::create_provider;
use crate::tools::build_default_registry;
use colored::Colorize;

pub mod ask;
pub mod chat;

/// Assembles an agent from validated configuration
///
/// # Errors
///
/// Returns error if the provider or the weather HTTP client cannot be
/// constructed
pub fn build_agent(config: &Config) -> Result<Agent> {
    let provider = create_provider(&config.provider)?;
    let registry = build_default_registry(&config.weather)?;
    let system_prompt = build_system_prompt(&registry);

    Ok(Agent::new(
        provider,
        registry,
        &system_prompt,
        config.agent.max_iterations,
    ))
}

/// Renders one agent progress event to the terminal
pub fn render_event(event: &AgentEvent) {
    match event {
        AgentEvent::Thought(text) => {
            println!("{}", format!("Thought: {}", text).cyan());
        }
        AgentEvent::Action { tool, input } => {
            println!("{}", format!("Action: {}: {}", tool, input).yellow());
        }
        AgentEvent::Observation(text) => {
            println!("{}", text.dimmed());
        }
        AgentEvent::FinalAnswer(text) => {
            println!("\n{}\n", text.green());
        }
    }
}
