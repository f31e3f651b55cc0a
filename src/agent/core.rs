//! The agent reasoning loop
//!
//! One turn runs up to `max_iterations` completions. Each reply is parsed
//! against the action protocol: a tool call is dispatched through the
//! registry and its observation appended to the transcript; a reply without
//! an action line ends the turn as the final answer. An exhausted iteration
//! budget ends the turn with the last reply, degraded but never hung.

use crate::agent::events::AgentEvent;
use crate::agent::protocol::{self, ParsedReply};
use crate::agent::transcript::Transcript;
use crate::error::Result;
use crate::providers::Provider;
use crate::tools::{Observation, ToolRegistry};
use tracing::{debug, info, warn};

/// Default iteration bound for one agent turn
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// The ReACT-style agent driving provider completions and tool dispatch
pub struct Agent {
    provider: Box<dyn Provider>,
    registry: ToolRegistry,
    transcript: Transcript,
    max_iterations: usize,
}

impl Agent {
    /// Creates an agent with a seeded transcript
    ///
    /// # Arguments
    ///
    /// * `provider` - LLM backend used for every completion
    /// * `registry` - Fixed tool registry for action dispatch
    /// * `system_prompt` - Loop instructions placed first in the transcript
    /// * `max_iterations` - Completion budget per turn, at least 1
    pub fn new(
        provider: Box<dyn Provider>,
        registry: ToolRegistry,
        system_prompt: &str,
        max_iterations: usize,
    ) -> Self {
        Self {
            provider,
            registry,
            transcript: Transcript::new(system_prompt),
            max_iterations: max_iterations.max(1),
        }
    }

    /// The transcript accumulated so far, system prompt first
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Name of the model answering this session
    pub fn model(&self) -> String {
        self.provider.current_model()
    }

    /// Runs one question through the reasoning loop
    ///
    /// Progress is reported through `on_event`; the returned string is the
    /// display form of the final answer. The transcript retains the full
    /// exchange, so later calls on the same agent see earlier turns.
    ///
    /// # Errors
    ///
    /// Returns error when a provider completion fails. Tool failures never
    /// surface here; they are folded into observations and the loop
    /// continues.
    pub async fn run_turn(
        &mut self,
        question: &str,
        mut on_event: impl FnMut(AgentEvent),
    ) -> Result<String> {
        self.transcript.add_user_question(question);
        info!("Starting turn, budget of {} iterations", self.max_iterations);

        let mut reply = String::new();
        for iteration in 1..=self.max_iterations {
            debug!(
                "Iteration {}/{}, transcript length {}",
                iteration,
                self.max_iterations,
                self.transcript.len()
            );

            let response = self.provider.complete(self.transcript.messages()).await?;
            reply = response.message.content;
            self.transcript.add_assistant(reply.clone());

            if let Some(usage) = response.usage {
                debug!("Completion used {} tokens", usage.total_tokens);
            }
            if let Some(thought) = protocol::extract_thought(&reply) {
                on_event(AgentEvent::Thought(thought));
            }

            let observation = match protocol::parse_reply(&reply) {
                ParsedReply::FinalAnswer => {
                    let answer = protocol::final_answer_text(&reply);
                    info!("Turn finished after {} iteration(s)", iteration);
                    on_event(AgentEvent::FinalAnswer(answer.clone()));
                    return Ok(answer);
                }
                ParsedReply::ToolCall { name, input } => {
                    on_event(AgentEvent::Action {
                        tool: name.clone(),
                        input: input.clone(),
                    });
                    self.dispatch(&name, &input).await
                }
                ParsedReply::Malformed { line } => {
                    warn!("Malformed action line: {}", line);
                    Observation::error(format!(
                        "Could not parse action line '{}'. Use the form 'Action: tool_name: input'.",
                        line
                    ))
                }
            };

            let text = observation.to_message();
            on_event(AgentEvent::Observation(text.clone()));
            self.transcript.add_observation(text);
        }

        // Budget exhausted; surface whatever the model last said
        warn!(
            "Iteration budget of {} exhausted without a final answer",
            self.max_iterations
        );
        let answer = protocol::final_answer_text(&reply);
        on_event(AgentEvent::FinalAnswer(answer.clone()));
        Ok(answer)
    }

    /// Invokes the named tool, or describes the failure as an observation
    async fn dispatch(&self, name: &str, input: &str) -> Observation {
        match self.registry.get(name) {
            Some(tool) => {
                debug!("Dispatching '{}' with input '{}'", name, input);
                tool.invoke(input).await
            }
            None => {
                warn!("Model requested unknown action '{}'", name);
                Observation::error(format!(
                    "Unknown action '{}'. Available actions: {}",
                    name,
                    self.registry.names().join(", ")
                ))
            }
        }
    }
}
