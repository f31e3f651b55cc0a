//! System prompt construction
//!
//! The system prompt teaches the model the Thought / Action / PAUSE /
//! Observation loop and enumerates the available actions from the registry,
//! so the prompt always matches what the dispatcher can actually run.

use crate::tools::ToolRegistry;
use chrono::Local;

/// Builds the loop-protocol system prompt for a session
///
/// Action descriptions come from the registry in sorted order, so the
/// prompt is deterministic for a given tool set.
///
/// # Arguments
///
/// * `registry` - The tool registry whose actions the prompt advertises
pub fn build_system_prompt(registry: &ToolRegistry) -> String {
    let mut actions = String::new();
    for (name, description) in registry.descriptions() {
        actions.push_str(&format!("{}:\n{}\n\n", name, description));
    }

    let today = Local::now().format("%Y-%m-%d");

    format!(
        "You run in a loop of Thought, Action, PAUSE, Observation.\n\
         At the end of the loop you output an Answer.\n\
         Use Thought to describe your reasoning about the question you have been asked.\n\
         Use Action to run one of the actions available to you, then return PAUSE.\n\
         Observation will be the result of running that action.\n\
         \n\
         Your available actions are:\n\
         \n\
         {actions}\
         Always use the exact format 'Action: action_name: input' on its own line.\n\
         Request one action at a time and wait for its Observation before continuing.\n\
         When you have enough information, reply with 'Answer:' followed by your final answer.\n\
         If the weather data is unavailable, say so in your answer instead of guessing.\n\
         \n\
         Example session:\n\
         \n\
         Question: What is the weather like in London?\n\
         Thought: I should look up the current weather for London.\n\
         Action: get_weather: London\n\
         PAUSE\n\
         \n\
         You will be called again with this:\n\
         \n\
         Observation: {{\"city\":\"London\",\"temperature\":14.2,\"weather_condition\":\"Clouds\"}}\n\
         \n\
         You then output:\n\
         \n\
         Answer: The weather in London is currently cloudy at 14.2 degrees Celsius.\n\
         \n\
         Today's date is {today}.",
        actions = actions,
        today = today,
    )
}
