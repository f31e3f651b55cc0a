//! OpenWeatherMap client for Weathervane
//!
//! This module wraps the two weather endpoints the tools need: current
//! conditions and the 5-day/3-hour forecast. Provider responses are decoded
//! into typed structs; the forecast's 3-hourly samples are aggregated into
//! one representative entry per calendar day.
//!
//! # Aggregation rule
//!
//! Samples are grouped by calendar date in the city's local timezone (the
//! provider reports a UTC offset per city). Each day's representative entry
//! is the sample whose local time-of-day is nearest to 12:00; ties resolve
//! toward the earlier sample. This is deterministic for a fixed response.

use crate::config::WeatherConfig;
use crate::error::{Result, WeathervaneError};
use chrono::{DateTime, FixedOffset, TimeZone, Timelike, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Current conditions for a resolved location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Resolved city name
    pub city: String,
    /// ISO country code
    pub country: String,
    /// Temperature in the configured units (Celsius for metric)
    pub temperature: f64,
    /// Apparent temperature
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Wind speed in the configured units
    pub wind_speed: f64,
    /// Short condition label (e.g. "Clouds", "Rain")
    pub weather_condition: String,
    /// Longer condition description (e.g. "scattered clouds")
    pub description: String,
    /// Timestamp of the observation, formatted `%Y-%m-%d %H:%M:%S`
    pub timestamp: String,
}

/// One aggregated forecast day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Calendar date (`%Y-%m-%d`, city-local)
    pub date: String,
    /// Local time of the representative sample (`%H:%M`)
    pub time: String,
    /// Temperature of the representative sample
    pub temperature: f64,
    /// Apparent temperature of the representative sample
    pub feels_like: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Short condition label
    pub weather_condition: String,
    /// Longer condition description
    pub description: String,
}

/// Aggregated multi-day forecast for a resolved location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Resolved city name
    pub city: String,
    /// ISO country code
    pub country: String,
    /// Ordered per-day entries, earliest first
    pub forecast: Vec<DailyEntry>,
}

// Wire structs for the OpenWeatherMap responses. Only the fields the tools
// surface are decoded; everything else is ignored.

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    sys: SysSection,
    main: MainSection,
    wind: WindSection,
    weather: Vec<WeatherSection>,
}

#[derive(Debug, Deserialize, Default)]
struct SysSection {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: f64,
}

#[derive(Debug, Deserialize, Default)]
struct WindSection {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherSection {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: CitySection,
    list: Vec<ForecastSample>,
}

#[derive(Debug, Deserialize)]
struct CitySection {
    name: String,
    #[serde(default)]
    country: String,
    /// UTC offset in seconds for the city
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastSample {
    /// Sample time as a UTC epoch timestamp
    dt: i64,
    main: MainSection,
    weather: Vec<WeatherSection>,
}

/// HTTP client for the weather data API
///
/// One instance is shared by the weather and forecast tools. All failures
/// are surfaced as `WeathervaneError::WeatherApi`; the tools translate them
/// into fallback observations so the agent loop never aborts on weather
/// unavailability.
pub struct WeatherApi {
    client: Client,
    config: WeatherConfig,
}

impl WeatherApi {
    /// Create a new weather API client
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: WeatherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("weathervane/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                WeathervaneError::WeatherApi(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Maximum forecast days supported by the configured provider
    pub fn max_forecast_days(&self) -> usize {
        self.config.max_forecast_days
    }

    /// Fetches current conditions for a location
    ///
    /// # Arguments
    ///
    /// * `location` - Location query, may include comma-separated qualifiers
    ///   (e.g. "Paris, FR")
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or decode failure
    pub async fn current(&self, location: &str) -> Result<CurrentConditions> {
        let raw: CurrentResponse = self.get_json("weather", location).await?;

        let condition = raw.weather.into_iter().next().unwrap_or(WeatherSection {
            main: "Unknown".to_string(),
            description: String::new(),
        });

        Ok(CurrentConditions {
            city: raw.name,
            country: raw.sys.country,
            temperature: raw.main.temp,
            feels_like: raw.main.feels_like,
            humidity: raw.main.humidity,
            wind_speed: raw.wind.speed,
            weather_condition: condition.main,
            description: condition.description,
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    /// Fetches a multi-day forecast for a location
    ///
    /// # Arguments
    ///
    /// * `location` - Location query
    /// * `days` - Number of days requested; clamped to 1..=max_forecast_days
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or decode failure
    pub async fn forecast(&self, location: &str, days: usize) -> Result<ForecastReport> {
        let raw: ForecastResponse = self.get_json("forecast", location).await?;

        let days = days.clamp(1, self.config.max_forecast_days);
        let offset = FixedOffset::east_opt(raw.city.timezone).unwrap_or_else(|| {
            tracing::warn!("Invalid timezone offset {} from API", raw.city.timezone);
            FixedOffset::east_opt(0).expect("zero offset is valid")
        });

        Ok(ForecastReport {
            city: raw.city.name,
            country: raw.city.country,
            forecast: aggregate_daily(&raw.list, offset, days),
        })
    }

    /// Issues one GET against the given endpoint with standard query params
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        location: &str,
    ) -> Result<T> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            WeathervaneError::WeatherApi("Weather API key not configured".to_string())
        })?;

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);
        tracing::debug!("Weather request: {} q={}", url, location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", location),
                ("appid", api_key),
                ("units", &self.config.units),
            ])
            .send()
            .await
            .map_err(|e| WeathervaneError::WeatherApi(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API returned {}: {}", status, body);
            return Err(WeathervaneError::WeatherApi(format!(
                "Weather API returned {}: {}",
                status, body
            ))
            .into());
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeathervaneError::WeatherApi(format!("Failed to decode response: {}", e)).into())
    }
}

/// Seconds past local midnight for noon
const NOON_SECONDS: i64 = 12 * 3600;

/// Collapses 3-hourly samples into one representative entry per day
///
/// Samples are grouped by city-local calendar date; per day the sample whose
/// local time-of-day is nearest to noon wins (earlier sample on a tie).
/// Output order follows first appearance, which matches the provider's
/// chronological ordering.
fn aggregate_daily(samples: &[ForecastSample], offset: FixedOffset, days: usize) -> Vec<DailyEntry> {
    // (date, best sample's local time, distance to noon, entry)
    let mut per_day: Vec<(String, i64, DailyEntry)> = Vec::new();

    for sample in samples {
        let local: DateTime<FixedOffset> = match offset.timestamp_opt(sample.dt, 0).single() {
            Some(ts) => ts,
            None => continue,
        };

        let date = local.format("%Y-%m-%d").to_string();
        let seconds_into_day = i64::from(local.num_seconds_from_midnight());
        let distance = (seconds_into_day - NOON_SECONDS).abs();

        let condition = sample.weather.first();
        let entry = DailyEntry {
            date: date.clone(),
            time: local.format("%H:%M").to_string(),
            temperature: sample.main.temp,
            feels_like: sample.main.feels_like,
            humidity: sample.main.humidity,
            weather_condition: condition.map(|w| w.main.clone()).unwrap_or_default(),
            description: condition.map(|w| w.description.clone()).unwrap_or_default(),
        };

        match per_day.iter_mut().find(|(d, _, _)| *d == date) {
            Some((_, best_distance, best_entry)) => {
                if distance < *best_distance {
                    *best_distance = distance;
                    *best_entry = entry;
                }
            }
            None => per_day.push((date, distance, entry)),
        }
    }

    per_day
        .into_iter()
        .take(days)
        .map(|(_, _, entry)| entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(dt: i64, temp: f64, condition: &str) -> ForecastSample {
        ForecastSample {
            dt,
            main: MainSection {
                temp,
                feels_like: temp - 1.0,
                humidity: 70.0,
            },
            weather: vec![WeatherSection {
                main: condition.to_string(),
                description: condition.to_lowercase(),
            }],
        }
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // 2025-05-05 00:00:00 UTC
    const DAY_START: i64 = 1746403200;

    #[test]
    fn test_aggregate_picks_nearest_to_noon() {
        let samples = vec![
            sample(DAY_START, 10.0, "Clear"),                // 00:00
            sample(DAY_START + 9 * 3600, 14.0, "Clouds"),    // 09:00
            sample(DAY_START + 12 * 3600, 18.5, "Rain"),     // 12:00
            sample(DAY_START + 21 * 3600, 12.0, "Clear"),    // 21:00
        ];

        let daily = aggregate_daily(&samples, utc(), 5);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, "2025-05-05");
        assert_eq!(daily[0].time, "12:00");
        assert_eq!(daily[0].temperature, 18.5);
        assert_eq!(daily[0].weather_condition, "Rain");
    }

    #[test]
    fn test_aggregate_tie_prefers_earlier_sample() {
        // 09:00 and 15:00 are both three hours from noon
        let samples = vec![
            sample(DAY_START + 9 * 3600, 14.0, "Clouds"),
            sample(DAY_START + 15 * 3600, 19.0, "Clear"),
        ];

        let daily = aggregate_daily(&samples, utc(), 5);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].time, "09:00");
        assert_eq!(daily[0].temperature, 14.0);
    }

    #[test]
    fn test_aggregate_one_entry_per_day_ordered() {
        let samples = vec![
            sample(DAY_START + 12 * 3600, 18.5, "Clouds"),
            sample(DAY_START + 36 * 3600, 19.2, "Clear"),
            sample(DAY_START + 60 * 3600, 17.8, "Rain"),
        ];

        let daily = aggregate_daily(&samples, utc(), 5);
        assert_eq!(daily.len(), 3);
        assert_eq!(daily[0].date, "2025-05-05");
        assert_eq!(daily[1].date, "2025-05-06");
        assert_eq!(daily[2].date, "2025-05-07");
    }

    #[test]
    fn test_aggregate_respects_day_limit() {
        let samples: Vec<ForecastSample> = (0..8)
            .map(|d| sample(DAY_START + d * 86400 + 12 * 3600, 15.0, "Clear"))
            .collect();

        let daily = aggregate_daily(&samples, utc(), 3);
        assert_eq!(daily.len(), 3);
    }

    #[test]
    fn test_aggregate_uses_city_offset() {
        // 23:00 UTC lands on the next local day at UTC+5
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let samples = vec![sample(DAY_START + 23 * 3600, 16.0, "Clear")];

        let daily = aggregate_daily(&samples, offset, 5);
        assert_eq!(daily[0].date, "2025-05-06");
        assert_eq!(daily[0].time, "04:00");
    }

    #[test]
    fn test_aggregate_empty_samples() {
        let daily = aggregate_daily(&[], utc(), 5);
        assert!(daily.is_empty());
    }

    #[test]
    fn test_current_response_decoding() {
        let json = r#"{
            "name": "London",
            "sys": {"country": "GB"},
            "main": {"temp": 18.5, "feels_like": 17.9, "humidity": 75},
            "wind": {"speed": 5.2},
            "weather": [{"main": "Clouds", "description": "scattered clouds"}]
        }"#;
        let raw: CurrentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.name, "London");
        assert_eq!(raw.sys.country, "GB");
        assert_eq!(raw.main.temp, 18.5);
        assert_eq!(raw.wind.speed, 5.2);
        assert_eq!(raw.weather[0].main, "Clouds");
    }

    #[test]
    fn test_forecast_response_decoding() {
        let json = r#"{
            "city": {"name": "London", "country": "GB", "timezone": 3600},
            "list": [
                {"dt": 1746403200, "main": {"temp": 18.5}, "weather": [{"main": "Clouds"}]}
            ]
        }"#;
        let raw: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.city.name, "London");
        assert_eq!(raw.city.timezone, 3600);
        assert_eq!(raw.list.len(), 1);
    }

    #[test]
    fn test_new_client() {
        let config = WeatherConfig {
            api_key: Some("owm_test".to_string()),
            ..WeatherConfig::default()
        };
        let api = WeatherApi::new(config).unwrap();
        assert_eq!(api.max_forecast_days(), 5);
    }
}
