use std::{error::Error, fmt::Write};
use weather_sdk::WeatherUiModel;

/// Human-readable rendering of the weather screen.
pub fn render(model: &WeatherUiModel) -> String {
    let current = &model.current_weather;
    let mut out = String::new();

    let _ = writeln!(out, "{} at {}", current.city_name, current.current_time);
    let _ = writeln!(out, "  {}°C  {}", current.temp, current.description);

    if model.hourly_forecast.is_empty() {
        let _ = writeln!(out, "\nHourly forecast unavailable");
        return out;
    }

    let _ = writeln!(out, "\nNext {} hours", model.hourly_forecast.len());
    for hour in &model.hourly_forecast {
        let _ = writeln!(out, "  {}  {:>6}°C  {}", hour.time, hour.temp, hour.description);
    }
    out
}

/// `err` followed by its sources, separated by `: `.
pub fn error_chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, ": {cause}");
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_sdk::{
        WeatherError,
        presentation::{CurrentWeatherUiModel, HourlyWeatherUiModel},
    };

    fn berlin(hourly: Vec<HourlyWeatherUiModel>) -> WeatherUiModel {
        WeatherUiModel {
            current_weather: CurrentWeatherUiModel {
                city_name: "Berlin".to_string(),
                temp: "22.5".to_string(),
                description: "Sunny".to_string(),
                current_time: "15:30".to_string(),
            },
            hourly_forecast: hourly,
        }
    }

    #[test]
    fn renders_current_and_hourly() {
        let model = berlin(vec![
            HourlyWeatherUiModel {
                temp: "20.0".to_string(),
                description: "Clear sky".to_string(),
                time: "16:00".to_string(),
            },
            HourlyWeatherUiModel {
                temp: "-1.5".to_string(),
                description: "Snow".to_string(),
                time: "17:00".to_string(),
            },
        ]);

        let expected = "Berlin at 15:30\n  22.5°C  Sunny\n\nNext 2 hours\n  16:00    20.0°C  Clear sky\n  17:00    -1.5°C  Snow\n";
        assert_eq!(render(&model), expected);
    }

    #[test]
    fn renders_missing_forecast() {
        let out = render(&berlin(vec![]));
        assert!(out.ends_with("Hourly forecast unavailable\n"));
    }

    #[test]
    fn error_chain_includes_causes() {
        let err = WeatherError::CurrentWeatherUnavailable(Box::new(WeatherError::Status {
            endpoint: "current",
            status: 403,
            body: "API key not valid".to_string(),
        }));

        assert_eq!(
            error_chain(&err),
            "current weather not found: current request failed with status 403: API key not valid"
        );
    }
}
