//! Weathervane - weather assistant CLI library
//!
//! This library provides the core functionality for the Weathervane weather
//! assistant, including the reasoning loop, the LLM provider abstraction,
//! the weather API client, tool management, and configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `agent`: Reasoning loop, transcript management, and the action protocol
//! - `providers`: LLM provider abstraction and the Groq implementation
//! - `tools`: Weather lookup and calculation tools plus the dispatch registry
//! - `weather`: OpenWeatherMap HTTP client and forecast aggregation
//! - `prompts`: System prompt construction
//! - `config`: Configuration management and validation
//! - `error`: Error types and result alias
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use weathervane::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     // Agent usage would go here
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod tools;
pub mod weather;

// Re-export commonly used types
pub use agent::{Agent, AgentEvent};
pub use config::Config;
pub use error::{Result, WeathervaneError};
pub use providers::{Message, Provider};
