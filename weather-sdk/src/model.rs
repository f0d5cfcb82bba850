use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

/// A validated, non-blank city name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(city: impl Into<String>) -> Result<Self> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(WeatherError::BlankCity);
        }
        Ok(Self(city))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CityQuery {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// Current conditions as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherRecord {
    pub city_name: String,
    pub temperature_celsius: f32,
    pub description: String,
    pub observed_at_epoch_seconds: i64,
}

/// One hour of forecast as reported by the provider.
///
/// `local_timestamp` is kept in the provider's `yyyy-MM-ddTHH:mm:ss` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastRecord {
    pub local_timestamp: String,
    pub temperature_celsius: f32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub city_name: String,
    pub temperature_celsius: f32,
    pub description: String,
    pub local_observation_time: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyWeather {
    pub temperature_celsius: f32,
    pub description: String,
    pub local_timestamp: DateTime<Local>,
}

/// Result of one aggregate fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherInfo {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyWeather>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_accepts_non_blank_names() {
        for name in ["Berlin", "Munich", " Rio de Janeiro ", "東京"] {
            let city = CityQuery::new(name).expect("non-blank name must be accepted");
            assert_eq!(city.as_str(), name);
        }
    }

    #[test]
    fn city_query_rejects_blank_names() {
        for name in ["", " ", "\t\n", "   "] {
            let err = CityQuery::new(name).unwrap_err();
            assert!(matches!(err, WeatherError::BlankCity));
            assert_eq!(err.to_string(), "City name cannot be empty");
        }
    }
}
