//! Agent module for Weathervane
//!
//! This module contains the reasoning loop and its supporting pieces: the
//! transcript of role-tagged messages, the action protocol parser, and the
//! progress events the loop emits for rendering.

pub mod core;
pub mod events;
pub mod protocol;
pub mod transcript;

pub use core::{Agent, DEFAULT_MAX_ITERATIONS};
pub use events::AgentEvent;
pub use protocol::{extract_thought, final_answer_text, parse_reply, ParsedReply};
pub use transcript::Transcript;
