//! Current weather lookup tool
//!
//! Fetches current conditions for a location through the shared weather API
//! client. On any failure the tool returns a fixed unavailability payload so
//! the agent loop can keep going.

use crate::tools::{Observation, ToolHandler};
use crate::weather::WeatherApi;
use async_trait::async_trait;
use std::sync::Arc;

/// Sentinel condition value signaling the lookup failed
pub const UNAVAILABLE_CONDITION: &str = "unavailable";

/// Tool fetching current weather conditions for a city
pub struct CurrentWeatherTool {
    api: Arc<WeatherApi>,
}

impl CurrentWeatherTool {
    /// Create the tool over a shared weather API client
    pub fn new(api: Arc<WeatherApi>) -> Self {
        Self { api }
    }

    /// The fallback payload returned when the lookup fails
    fn fallback(location: &str, reason: &str) -> Observation {
        Observation::new(serde_json::json!({
            "city": location,
            "weather_condition": UNAVAILABLE_CONDITION,
            "error": reason,
        }))
    }
}

#[async_trait]
impl ToolHandler for CurrentWeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Fetches current weather for a city. Usage: get_weather: [city name]"
    }

    async fn invoke(&self, input: &str) -> Observation {
        let location = input.trim();
        if location.is_empty() {
            return Observation::error("get_weather requires a city name");
        }

        match self.api.current(location).await {
            Ok(conditions) => match serde_json::to_value(&conditions) {
                Ok(payload) => Observation::new(payload),
                Err(e) => Self::fallback(location, &e.to_string()),
            },
            Err(e) => {
                tracing::warn!("Weather lookup failed for '{}': {}", location, e);
                Self::fallback(location, &e.to_string())
            }
        }
    }
}
