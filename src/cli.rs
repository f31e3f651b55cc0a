//! Command-line interface definitions for Weathervane
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};

/// Weathervane - a weather assistant driven by a reasoning loop
#[derive(Parser, Debug)]
#[command(name = "weathervane")]
#[command(about = "Ask about the weather in natural language", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,
    },
    /// Ask a single question and exit
    Ask {
        /// The question to ask
        query: String,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,
    },
}
