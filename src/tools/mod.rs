//! Tools module for Weathervane
//!
//! This module contains the tool capability trait, the observation value
//! tools produce, the registry the agent dispatches through, and the three
//! tool implementations (current weather, forecast, calculation).
//!
//! Tool failures are values: a handler returns an error-carrying Observation
//! instead of an Err, so a broken weather lookup or an unparseable
//! calculation never aborts the agent's turn.

pub mod calculate;
pub mod get_forecast;
pub mod get_weather;

use crate::config::WeatherConfig;
use crate::error::Result;
use crate::weather::WeatherApi;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// A JSON observation produced by a tool
///
/// Observations are re-inserted into the transcript as plain text for the
/// model's next iteration. Failures travel inside the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    payload: serde_json::Value,
}

impl Observation {
    /// Create an observation from a JSON payload
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::tools::Observation;
    ///
    /// let obs = Observation::new(serde_json::json!({"result": -0.7}));
    /// assert!(!obs.is_error());
    /// ```
    pub fn new(payload: serde_json::Value) -> Self {
        Self { payload }
    }

    /// Create an error observation carrying a description string
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::tools::Observation;
    ///
    /// let obs = Observation::error("Unknown action 'get_wind'");
    /// assert!(obs.is_error());
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            payload: serde_json::json!({ "error": message.into() }),
        }
    }

    /// Whether this observation carries an error field
    pub fn is_error(&self) -> bool {
        self.payload.get("error").is_some()
    }

    /// The raw JSON payload
    pub fn payload(&self) -> &serde_json::Value {
        &self.payload
    }

    /// Renders the observation as transcript text
    ///
    /// # Examples
    ///
    /// ```
    /// use weathervane::tools::Observation;
    ///
    /// let obs = Observation::new(serde_json::json!({"result": 83.3}));
    /// assert_eq!(obs.to_message(), r#"Observation: {"result":83.3}"#);
    /// ```
    pub fn to_message(&self) -> String {
        format!("Observation: {}", self.payload)
    }
}

/// Tool capability trait
///
/// Each of the fixed tools implements this trait. The argument is an opaque
/// string; parsing it is entirely the handler's responsibility. `invoke`
/// is infallible by contract: handlers fold their failures into the
/// returned Observation.
///
/// # Examples
///
/// ```no_run
/// use weathervane::tools::{Observation, ToolHandler};
/// use async_trait::async_trait;
///
/// struct EchoTool;
///
/// #[async_trait]
/// impl ToolHandler for EchoTool {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn description(&self) -> &str {
///         "Echoes its input. Usage: echo: [text]"
///     }
///
///     async fn invoke(&self, input: &str) -> Observation {
///         Observation::new(serde_json::json!({"echo": input}))
///     }
/// }
/// ```
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// The action name the model uses to select this tool
    fn name(&self) -> &str;

    /// One-line usage description interpolated into the system prompt
    fn description(&self) -> &str;

    /// Executes the tool against a raw argument string
    async fn invoke(&self, input: &str) -> Observation;
}

/// Tool registry mapping action names to handlers
///
/// The registry is fixed at construction time for a session; the agent loop
/// treats it as the single source of dispatch truth.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool handler under its own name
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        self.tools.insert(handler.name().to_string(), handler);
    }

    /// Get a tool handler by action name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.tools.get(name).cloned()
    }

    /// Registered action names, sorted for deterministic output
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// (name, description) pairs, sorted by name
    ///
    /// Used by the prompt builder so the system prompt is stable across runs.
    pub fn descriptions(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .tools
            .values()
            .map(|t| (t.name().to_string(), t.description().to_string()))
            .collect();
        pairs.sort();
        pairs
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the fixed registry of the three weather-agent tools
///
/// # Arguments
///
/// * `config` - Weather API configuration shared by the two lookup tools
///
/// # Errors
///
/// Returns error if the weather HTTP client cannot be constructed
pub fn build_default_registry(config: &WeatherConfig) -> Result<ToolRegistry> {
    let api = Arc::new(WeatherApi::new(config.clone())?);

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(get_weather::CurrentWeatherTool::new(api.clone())));
    registry.register(Arc::new(get_forecast::ForecastTool::new(api)));
    registry.register(Arc::new(calculate::CalculationTool::new()));

    Ok(registry)
}
