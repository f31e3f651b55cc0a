//! Groq provider implementation for Weathervane
//!
//! This module implements the Provider trait against Groq's OpenAI-compatible
//! chat-completions endpoint. The transcript is sent as-is; the reply text is
//! read from the first choice. No retries happen here: a failed call is fatal
//! for the current turn.

use crate::config::ProviderConfig;
use crate::error::{Result, WeathervaneError};
use crate::providers::{CompletionResponse, Message, Provider, TokenUsage};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Groq API provider
///
/// Connects to Groq's hosted inference endpoint (or any OpenAI-compatible
/// server via the `api_base` override) to generate completions for the
/// ReACT loop.
///
/// # Examples
///
/// ```no_run
/// use weathervane::config::ProviderConfig;
/// use weathervane::providers::{GroqProvider, Provider, Message};
///
/// # async fn example() -> weathervane::error::Result<()> {
/// let config = ProviderConfig {
///     api_key: Some("gsk_test".to_string()),
///     ..ProviderConfig::default()
/// };
/// let provider = GroqProvider::new(config)?;
/// let messages = vec![Message::user("Question: weather in London?")];
/// let completion = provider.complete(&messages).await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
pub struct GroqProvider {
    client: Client,
    config: ProviderConfig,
    api_base: String,
}

/// Request structure for the chat-completions endpoint
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

/// Response structure from the chat-completions endpoint
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

/// One completion choice
#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Message payload within a choice
#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

/// Token accounting reported by the API
#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl GroqProvider {
    /// Create a new Groq provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Provider configuration with model, temperature, and key
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing or HTTP client
    /// initialization fails
    pub fn new(config: ProviderConfig) -> Result<Self> {
        if config.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(
                WeathervaneError::Provider("Groq API key not provided".to_string()).into(),
            );
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent(concat!("weathervane/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                WeathervaneError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        let api_base = config
            .api_base
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        tracing::info!(
            "Initialized Groq provider: model={}, api_base={}",
            config.model,
            api_base
        );

        Ok(Self {
            client,
            config,
            api_base,
        })
    }

    /// The endpoint URL for chat completions
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for GroqProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        };

        let url = self.completions_url();
        tracing::debug!("Requesting completion: {} ({} messages)", url, messages.len());

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| WeathervaneError::Provider("Groq API key not provided".to_string()))?;

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| WeathervaneError::Provider(format!("Request to Groq failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Groq returned error {}: {}", status, error_text);
            return Err(WeathervaneError::Provider(format!(
                "Groq returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            WeathervaneError::Provider(format!("Failed to parse Groq response: {}", e))
        })?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            WeathervaneError::Provider("Groq response contained no choices".to_string())
        })?;

        let message = Message::assistant(choice.message.content);

        if let Some(usage) = completion.usage {
            tracing::debug!(
                "Completion usage: prompt={}, completion={}",
                usage.prompt_tokens,
                usage.completion_tokens
            );
            Ok(CompletionResponse::with_usage(
                message,
                TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
            ))
        } else {
            Ok(CompletionResponse::new(message))
        }
    }

    fn current_model(&self) -> String {
        self.config.model.clone()
    }
}
