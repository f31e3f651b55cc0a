//! Multi-day forecast lookup tool
//!
//! Fetches the aggregated forecast for a location. The argument is a
//! location, optionally followed by a trailing comma-separated day count
//! ("London, 3"); a non-numeric trailing token stays part of the location,
//! so "Paris, FR" works as a plain location query.

use crate::tools::{get_weather::UNAVAILABLE_CONDITION, Observation, ToolHandler};
use crate::weather::WeatherApi;
use async_trait::async_trait;
use std::sync::Arc;

/// Tool fetching a multi-day forecast for a city
pub struct ForecastTool {
    api: Arc<WeatherApi>,
}

impl ForecastTool {
    /// Create the tool over a shared weather API client
    pub fn new(api: Arc<WeatherApi>) -> Self {
        Self { api }
    }

    /// Splits the argument into (location, requested days)
    ///
    /// A trailing comma-separated integer token is the day count; anything
    /// else belongs to the location. Defaults to the API maximum.
    fn parse_input<'a>(&self, input: &'a str) -> (&'a str, usize) {
        let default_days = self.api.max_forecast_days();

        if let Some((head, tail)) = input.rsplit_once(',') {
            if let Ok(days) = tail.trim().parse::<usize>() {
                return (head.trim(), days);
            }
        }

        (input.trim(), default_days)
    }

    /// The fallback payload returned when the lookup fails
    fn fallback(location: &str, reason: &str) -> Observation {
        Observation::new(serde_json::json!({
            "city": location,
            "weather_condition": UNAVAILABLE_CONDITION,
            "forecast": [],
            "error": reason,
        }))
    }
}

#[async_trait]
impl ToolHandler for ForecastTool {
    fn name(&self) -> &str {
        "get_forecast"
    }

    fn description(&self) -> &str {
        "Fetches a daily forecast for a city (up to 5 days). Usage: get_forecast: [city name] or get_forecast: [city name], [days]"
    }

    async fn invoke(&self, input: &str) -> Observation {
        let (location, days) = self.parse_input(input);
        if location.is_empty() {
            return Observation::error("get_forecast requires a city name");
        }

        match self.api.forecast(location, days).await {
            Ok(report) => match serde_json::to_value(&report) {
                Ok(payload) => Observation::new(payload),
                Err(e) => Self::fallback(location, &e.to_string()),
            },
            Err(e) => {
                tracing::warn!("Forecast lookup failed for '{}': {}", location, e);
                Self::fallback(location, &e.to_string())
            }
        }
    }
}
