//! Agent progress events
//!
//! The loop reports its progress through these values instead of printing
//! directly, so the chat REPL, one-shot command, and tests each render a
//! turn their own way.

/// A single step of agent progress within one turn
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Reasoning text the model emitted before acting
    Thought(String),
    /// A tool is about to be invoked
    Action {
        /// Action name selected by the model
        tool: String,
        /// Raw argument string passed to the tool
        input: String,
    },
    /// The observation text fed back into the transcript
    Observation(String),
    /// The final answer closing the turn
    FinalAnswer(String),
}
