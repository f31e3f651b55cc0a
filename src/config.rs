//! Configuration management for Weathervane
//!
//! This module handles loading, parsing, validating, and merging
//! configuration from a YAML file, environment variables, and CLI overrides.
//! Validation happens once at startup so that missing API keys fail fast
//! instead of surfacing mid-turn.

use crate::error::{Result, WeathervaneError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Environment variable holding the LLM API key
pub const MODEL_API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding the LLM model name
pub const MODEL_NAME_ENV: &str = "GROQ_MODEL";
/// Environment variable holding the weather API key
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Main configuration structure for Weathervane
///
/// Holds everything the agent and tools need: LLM provider settings,
/// weather API settings, and agent loop behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// LLM provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Weather data API configuration
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Agent loop configuration
    #[serde(default)]
    pub agent: AgentConfig,
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model identifier to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (0.0 keeps the loop grammar deterministic)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional API base URL override (useful for tests and local mocks)
    ///
    /// When set, this base is used to build the `/chat/completions` endpoint,
    /// which allows tests to point the provider at a mock server.
    #[serde(default)]
    pub api_base: Option<String>,

    /// API key, normally supplied via `GROQ_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            api_base: None,
            api_key: None,
        }
    }
}

/// Weather data API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Units for temperature and wind speed (metric, imperial, standard)
    #[serde(default = "default_units")]
    pub units: String,

    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u64,

    /// Maximum forecast days the provider supports
    #[serde(default = "default_forecast_days")]
    pub max_forecast_days: usize,

    /// API key, normally supplied via `OPENWEATHERMAP_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_weather_timeout() -> u64 {
    15
}

fn default_forecast_days() -> usize {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            units: default_units(),
            timeout_seconds: default_weather_timeout(),
            max_forecast_days: default_forecast_days(),
            api_key: None,
        }
    }
}

/// Agent loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum loop iterations per user turn before degrading to the
    /// last assistant reply
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_max_iterations() -> usize {
    crate::agent::DEFAULT_MAX_ITERATIONS
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file and merges environment variables
    ///
    /// A missing file is not an error; defaults are used so that a purely
    /// environment-driven setup works. Environment variables take precedence
    /// over file values for API keys and the model name.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Config = serde_yaml::from_str(&contents)?;
            tracing::debug!("Loaded configuration from {}", path.display());
            config
        } else {
            tracing::debug!(
                "Configuration file {} not found, using defaults",
                path.display()
            );
            Config::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Merges recognized environment variables into the configuration
    ///
    /// `GROQ_API_KEY` and `OPENWEATHERMAP_API_KEY` override file-provided
    /// keys; `GROQ_MODEL` overrides the model name.
    pub fn merge_env(&mut self) {
        if let Ok(key) = std::env::var(MODEL_API_KEY_ENV) {
            if !key.is_empty() {
                self.provider.api_key = Some(key);
            }
        }
        if let Ok(model) = std::env::var(MODEL_NAME_ENV) {
            if !model.is_empty() {
                self.provider.model = model;
            }
        }
        if let Ok(key) = std::env::var(WEATHER_API_KEY_ENV) {
            if !key.is_empty() {
                self.weather.api_key = Some(key);
            }
        }
    }

    /// Applies a CLI model override, if provided
    pub fn apply_model_override(&mut self, model: Option<String>) {
        if let Some(model) = model {
            self.provider.model = model;
        }
    }

    /// Validates the configuration, failing fast on missing credentials
    ///
    /// # Errors
    ///
    /// Returns `WeathervaneError::Config` if an API key is missing, a URL is
    /// malformed, the units value is unrecognized, or limits are out of range
    pub fn validate(&self) -> Result<()> {
        if self
            .provider
            .api_key
            .as_deref()
            .map_or(true, |k| k.trim().is_empty())
        {
            return Err(WeathervaneError::Config(format!(
                "LLM API key not provided; set the {} environment variable",
                MODEL_API_KEY_ENV
            ))
            .into());
        }

        if self
            .weather
            .api_key
            .as_deref()
            .map_or(true, |k| k.trim().is_empty())
        {
            return Err(WeathervaneError::Config(format!(
                "Weather API key not provided; set the {} environment variable",
                WEATHER_API_KEY_ENV
            ))
            .into());
        }

        if self.provider.model.trim().is_empty() {
            return Err(WeathervaneError::Config("model name must not be empty".to_string()).into());
        }

        if let Some(api_base) = &self.provider.api_base {
            Url::parse(api_base).map_err(|e| {
                WeathervaneError::Config(format!("invalid provider api_base '{}': {}", api_base, e))
            })?;
        }

        Url::parse(&self.weather.base_url).map_err(|e| {
            WeathervaneError::Config(format!(
                "invalid weather base_url '{}': {}",
                self.weather.base_url, e
            ))
        })?;

        match self.weather.units.as_str() {
            "metric" | "imperial" | "standard" => {}
            other => {
                return Err(WeathervaneError::Config(format!(
                    "unrecognized units '{}' (expected metric, imperial, or standard)",
                    other
                ))
                .into());
            }
        }

        if self.agent.max_iterations == 0 {
            return Err(
                WeathervaneError::Config("max_iterations must be greater than 0".to_string())
                    .into(),
            );
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(WeathervaneError::Config(format!(
                "temperature {} out of range (expected 0.0..=2.0)",
                self.provider.temperature
            ))
            .into());
        }

        Ok(())
    }
}
