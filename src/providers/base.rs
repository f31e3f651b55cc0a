//! Base provider trait and common types for Weathervane
//!
//! This module defines the Provider trait that the LLM backend must implement,
//! along with the role-tagged message type and completion response structures.
//! The agent's tool dispatch happens over a text grammar, so messages carry
//! plain content only; the role set is {system, user, assistant}.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message structure for the conversation transcript
///
/// Represents one role-tagged message exchanged with the LLM provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Creates a new user message
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::providers::Message;
    ///
    /// let msg = Message::user("What's the weather in London?");
    /// assert_eq!(msg.role, "user");
    /// ```
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new assistant message
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::providers::Message;
    ///
    /// let msg = Message::assistant("Thought: I need the current weather.");
    /// assert_eq!(msg.role, "assistant");
    /// ```
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Creates a new system message
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::providers::Message;
    ///
    /// let msg = Message::system("You run in a loop of Thought, Action, PAUSE, Observation.");
    /// assert_eq!(msg.role, "system");
    /// ```
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Token usage information from a completion
///
/// Tracks the number of tokens used in prompts and completions,
/// as reported by the LLM provider.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of tokens in the prompt
    pub prompt_tokens: usize,
    /// Number of tokens in the completion
    pub completion_tokens: usize,
    /// Total tokens used (prompt + completion)
    pub total_tokens: usize,
}

impl TokenUsage {
    /// Create a new TokenUsage instance
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::providers::TokenUsage;
    ///
    /// let usage = TokenUsage::new(100, 50);
    /// assert_eq!(usage.total_tokens, 150);
    /// ```
    pub fn new(prompt_tokens: usize, completion_tokens: usize) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Completion response with message and optional token usage
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The response message from the model
    pub message: Message,
    /// Optional token usage information
    pub usage: Option<TokenUsage>,
}

impl CompletionResponse {
    /// Create a new CompletionResponse without usage data
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::providers::{CompletionResponse, Message};
    ///
    /// let response = CompletionResponse::new(Message::assistant("Answer: 18°C"));
    /// assert!(response.usage.is_none());
    /// ```
    pub fn new(message: Message) -> Self {
        Self {
            message,
            usage: None,
        }
    }

    /// Create a new CompletionResponse with token usage
    pub fn with_usage(message: Message, usage: TokenUsage) -> Self {
        Self {
            message,
            usage: Some(usage),
        }
    }
}

/// Provider trait for LLM backends
///
/// The agent drives one completion per loop iteration through this trait.
/// A failed completion is fatal for the current turn; no retries happen at
/// this layer.
///
/// # Examples
///
/// ```no_run
/// use weathervane::providers::{Provider, Message, CompletionResponse};
/// use weathervane::error::Result;
/// use async_trait::async_trait;
///
/// struct MyProvider;
///
/// #[async_trait]
/// impl Provider for MyProvider {
///     async fn complete(&self, _messages: &[Message]) -> Result<CompletionResponse> {
///         Ok(CompletionResponse::new(Message::assistant("Answer: done")))
///     }
///
///     fn current_model(&self) -> String {
///         "my-model".to_string()
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Completes a conversation with the given messages
    ///
    /// # Arguments
    ///
    /// * `messages` - The full transcript, system prompt first
    ///
    /// # Returns
    ///
    /// Returns the assistant's reply along with token usage when available
    ///
    /// # Errors
    ///
    /// Returns error if the API call fails or the response is invalid
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse>;

    /// Name of the currently configured model, for logging and display
    fn current_model(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_user() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_user_with_string() {
        let msg = Message::user(String::from("Hello"));
        assert_eq!(msg.content, "Hello");
    }

    #[test]
    fn test_message_assistant() {
        let msg = Message::assistant("Hi there");
        assert_eq!(msg.role, "assistant");
        assert_eq!(msg.content, "Hi there");
    }

    #[test]
    fn test_message_system() {
        let msg = Message::system("System prompt");
        assert_eq!(msg.role, "system");
        assert_eq!(msg.content, "System prompt");
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::user("Test");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"content\":\"Test\""));
    }

    #[test]
    fn test_token_usage_new() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.prompt_tokens, 100);
        assert_eq!(usage.completion_tokens, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn test_token_usage_zero() {
        let usage = TokenUsage::new(0, 0);
        assert_eq!(usage.total_tokens, 0);
    }

    #[test]
    fn test_completion_response_new() {
        let response = CompletionResponse::new(Message::assistant("Hello!"));
        assert_eq!(response.message.role, "assistant");
        assert!(response.usage.is_none());
    }

    #[test]
    fn test_completion_response_with_usage() {
        let usage = TokenUsage::new(100, 50);
        let response = CompletionResponse::with_usage(Message::assistant("Hello!"), usage);
        assert!(response.usage.is_some());
        assert_eq!(response.usage.unwrap().total_tokens, 150);
    }

    #[test]
    fn test_provider_trait_object_safety() {
        struct MockProvider;

        #[async_trait]
        impl Provider for MockProvider {
            async fn complete(&self, _messages: &[Message]) -> Result<CompletionResponse> {
                Ok(CompletionResponse::new(Message::assistant("test")))
            }

            fn current_model(&self) -> String {
                "mock".to_string()
            }
        }

        let provider: Box<dyn Provider> = Box::new(MockProvider);
        assert_eq!(provider.current_model(), "mock");

        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let response = provider.complete(&[Message::user("hi")]).await.unwrap();
            assert_eq!(response.message.content, "test");
        });
    }
}
