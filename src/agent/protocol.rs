//! Text protocol parsing for agent replies
//!
//! The model speaks a line-oriented protocol: a reply either carries an
//! `Action: <name>: <input>` line requesting a tool, or it is a final
//! answer, conventionally prefixed with `Answer:`. Only the first action
//! line in a reply counts; anything after it is ignored for dispatch.

use regex::Regex;
use std::sync::OnceLock;

/// Structured classification of one model reply
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    /// No action line anywhere in the reply; the turn is over
    FinalAnswer,
    /// A well-formed action request
    ToolCall {
        /// Action name as written by the model
        name: String,
        /// Raw argument string, surrounding whitespace trimmed
        input: String,
    },
    /// An action line is present but does not fit `Action: <name>: <input>`
    Malformed {
        /// The offending line, for the corrective observation
        line: String,
    },
}

fn action_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^action:\s*([a-z_]+)\s*:\s*(.+)$").expect("static regex compiles")
    })
}

/// Classifies a model reply against the action protocol
///
/// A reply without any action line is a final answer, never an error. When
/// an action line exists, only the first one is considered.
///
/// # Examples
///
/// ```
/// use weathervane::agent::{parse_reply, ParsedReply};
///
/// let reply = "Thought: I should look this up.\nAction: get_weather: Kalutara\nPAUSE";
/// assert_eq!(
///     parse_reply(reply),
///     ParsedReply::ToolCall {
///         name: "get_weather".to_string(),
///         input: "Kalutara".to_string(),
///     }
/// );
/// ```
pub fn parse_reply(reply: &str) -> ParsedReply {
    for line in reply.lines() {
        let line = line.trim();
        if !line.to_lowercase().starts_with("action:") {
            continue;
        }

        return match action_regex().captures(line) {
            Some(captures) => ParsedReply::ToolCall {
                name: captures[1].to_string(),
                input: captures[2].trim().to_string(),
            },
            None => ParsedReply::Malformed {
                line: line.to_string(),
            },
        };
    }

    ParsedReply::FinalAnswer
}

/// Extracts the first `Thought:` line content, if any
pub fn extract_thought(reply: &str) -> Option<String> {
    for line in reply.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("Thought:") {
            return Some(rest.trim().to_string());
        }
    }
    None
}

/// The display form of a final reply
///
/// Strips everything up to and including the first `Answer:` marker when
/// one exists; otherwise the whole reply is the answer.
pub fn final_answer_text(reply: &str) -> String {
    if let Some(idx) = reply.find("Answer:") {
        reply[idx + "Answer:".len()..].trim().to_string()
    } else {
        reply.trim().to_string()
    }
}
