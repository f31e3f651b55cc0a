//! LLM provider abstraction for Weathervane
//!
//! Defines the Provider trait plus the Groq implementation used in
//! production. Tests substitute scripted providers through the same trait.

pub mod base;
pub mod groq;

pub use base::{CompletionResponse, Message, Provider, TokenUsage};
pub use groq::GroqProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Creates the configured provider
///
/// # Arguments
///
/// * `config` - Provider configuration (model, temperature, key, api_base)
///
/// # Errors
///
/// Returns error if provider construction fails (e.g. missing API key)
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    let provider = GroqProvider::new(config.clone())?;
    Ok(Box::new(provider))
}
