use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::{CurrentWeather, HourlyWeather, WeatherInfo};

/// Weather information ready to be displayed, every value pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherUiModel {
    pub current_weather: CurrentWeatherUiModel,
    pub hourly_forecast: Vec<HourlyWeatherUiModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentWeatherUiModel {
    pub city_name: String,
    pub temp: String,
    pub description: String,
    pub current_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyWeatherUiModel {
    pub temp: String,
    pub description: String,
    pub time: String,
}

/// Maps domain weather data to [`WeatherUiModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherUiMapper;

impl WeatherUiMapper {
    pub fn to_ui_model(&self, info: &WeatherInfo) -> WeatherUiModel {
        WeatherUiModel {
            current_weather: current_to_ui(&info.current),
            hourly_forecast: info.hourly.iter().map(hourly_to_ui).collect(),
        }
    }
}

fn current_to_ui(weather: &CurrentWeather) -> CurrentWeatherUiModel {
    CurrentWeatherUiModel {
        city_name: weather.city_name.clone(),
        temp: format_temperature(weather.temperature_celsius),
        description: weather.description.clone(),
        current_time: format_time(&weather.local_observation_time),
    }
}

fn hourly_to_ui(weather: &HourlyWeather) -> HourlyWeatherUiModel {
    HourlyWeatherUiModel {
        temp: format_temperature(weather.temperature_celsius),
        description: weather.description.clone(),
        time: format_time(&weather.local_timestamp),
    }
}

/// Shortest decimal form of `temp`, always with a fractional part (`20.0`, `22.5`).
pub fn format_temperature(temp: f32) -> String {
    if temp.is_finite() && temp.fract() == 0.0 {
        format!("{temp:.1}")
    } else {
        temp.to_string()
    }
}

/// Zero-padded 24-hour `HH:mm` in the local time zone.
pub fn format_time(time: &DateTime<Local>) -> String {
    time.format("%H:%M").to_string()
}
