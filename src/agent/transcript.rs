//! Conversation transcript management
//!
//! The transcript is the ordered message list sent to the provider on every
//! iteration. It always starts with the system prompt and grows strictly by
//! appending; nothing is ever rewritten or dropped mid-session, so repeated
//! questions in a chat session share earlier context.

use crate::providers::base::Message;

/// Ordered message history for one agent session
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript seeded with the system prompt
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::agent::Transcript;
    ///
    /// let transcript = Transcript::new("You run in a loop.");
    /// assert_eq!(transcript.len(), 1);
    /// ```
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Append the user's question, framed for the loop protocol
    pub fn add_user_question(&mut self, question: &str) {
        self.messages
            .push(Message::user(format!("Question: {}", question)));
    }

    /// Append a raw assistant reply
    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Append an observation, carried in a user-role message
    ///
    /// The model only distinguishes observations from questions by the
    /// "Observation:" text prefix, which the caller supplies.
    pub fn add_observation(&mut self, observation_text: impl Into<String>) {
        self.messages.push(Message::user(observation_text));
    }

    /// The full message list, system prompt first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages including the system prompt
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the transcript is empty
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
