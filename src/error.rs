//! Error types for Weathervane
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Weathervane operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, provider interactions, and agent execution.
/// Tool-level failures are deliberately absent: tools fold their failures
/// into observation values instead of raising (see `tools::Observation`).
#[derive(Error, Debug)]
pub enum WeathervaneError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (LLM API calls, authentication, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Weather API errors (transport, non-2xx status, decode failures)
    #[error("Weather API error: {0}")]
    WeatherApi(String),

    /// Tool registry errors (registration conflicts, lookup failures)
    #[error("Tool error: {0}")]
    Tool(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Weathervane operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = WeathervaneError::Config("missing api key".to_string());
        assert_eq!(error.to_string(), "Configuration error: missing api key");
    }

    #[test]
    fn test_provider_error_display() {
        let error = WeathervaneError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_weather_api_error_display() {
        let error = WeathervaneError::WeatherApi("city not found".to_string());
        assert_eq!(error.to_string(), "Weather API error: city not found");
    }

    #[test]
    fn test_tool_error_display() {
        let error = WeathervaneError::Tool("duplicate name".to_string());
        assert_eq!(error.to_string(), "Tool error: duplicate name");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: WeathervaneError = io_error.into();
        assert!(matches!(error, WeathervaneError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let error: WeathervaneError = json_error.into();
        assert!(matches!(error, WeathervaneError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: WeathervaneError = yaml_error.into();
        assert!(matches!(error, WeathervaneError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WeathervaneError>();
    }
}
