//! Interactive chat session handler
//!
//! Instantiates the provider and tool stack, then runs a readline loop
//! submitting each question to the agent. A failed turn is reported and the
//! session continues; the transcript persists across questions so follow-ups
//! can reference earlier answers.

use crate::commands::{build_agent, render_event};
use crate::config::Config;
use crate::error::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Start an interactive chat session
///
/// # Arguments
///
/// * `config` - Validated configuration (consumed)
pub async fn run_chat(config: Config) -> Result<()> {
    tracing::info!("Starting interactive chat session");

    let mut agent = build_agent(&config)?;

    let mut rl = DefaultEditor::new()?;
    print_welcome_banner(&agent.model());

    loop {
        match rl.readline("weather> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                    break;
                }

                rl.add_history_entry(trimmed)?;

                if let Err(e) = agent.run_turn(trimmed, |event| render_event(&event)).await {
                    eprintln!("{}", format!("Something went wrong: {}\n", e).red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                tracing::error!("Readline error: {:?}", err);
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Display the welcome banner at the start of a chat session
fn print_welcome_banner(model: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║              Weathervane Interactive Chat                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Model: {}", model);
    println!("Ask about current weather, forecasts, or calculations.");
    println!("Type 'exit' or 'quit' to leave\n");
}
