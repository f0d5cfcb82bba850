//! Aggregation of current weather and hourly forecast into one [`WeatherInfo`].
//!
//! Both gateway reads run as independent tasks and are always awaited to
//! completion. The join is asymmetric: a failed or empty current-weather read
//! fails the whole fetch, a failed hourly read degrades to an empty forecast.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::{fmt::Debug, sync::Arc};
use tracing::{debug, warn};

use crate::{
    error::{Result, WeatherError},
    gateway::WeatherGateway,
    model::{
        CityQuery, CurrentWeather, CurrentWeatherRecord, HourlyForecastRecord, HourlyWeather,
        WeatherInfo,
    },
};

/// Number of forecast hours requested on every fetch.
pub const FORECAST_HOURS: u32 = 24;

/// Provider format of `HourlyForecastRecord::local_timestamp`.
pub const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[async_trait]
pub trait GetWeatherInfo: Send + Sync + Debug {
    async fn fetch_weather_info(&self, city: &CityQuery) -> Result<WeatherInfo>;
}

#[derive(Debug, Clone)]
pub struct WeatherInfoService {
    gateway: Arc<dyn WeatherGateway>,
}

impl WeatherInfoService {
    pub fn new(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl GetWeatherInfo for WeatherInfoService {
    async fn fetch_weather_info(&self, city: &CityQuery) -> Result<WeatherInfo> {
        // Spawned so that both reads settle even if the caller stops polling.
        let current_task = tokio::spawn({
            let gateway = Arc::clone(&self.gateway);
            let city = city.as_str().to_owned();
            async move { gateway.current_weather(&city).await }
        });
        let hourly_task = tokio::spawn({
            let gateway = Arc::clone(&self.gateway);
            let city = city.as_str().to_owned();
            async move { gateway.hourly_forecast(&city, FORECAST_HOURS).await }
        });

        let (current, hourly) = tokio::join!(current_task, hourly_task);

        let current = match current? {
            Ok(records) => records
                .into_iter()
                .next()
                .ok_or(WeatherError::CurrentWeatherNotFound)?,
            Err(err) => return Err(WeatherError::CurrentWeatherUnavailable(Box::new(err))),
        };

        let hourly = match hourly {
            Ok(Ok(records)) => records,
            Ok(Err(err)) => {
                warn!(%city, error = %err, "hourly forecast unavailable, continuing without it");
                Vec::new()
            }
            Err(err) => {
                warn!(%city, error = %err, "hourly forecast task failed, continuing without it");
                Vec::new()
            }
        };

        debug!(%city, hours = hourly.len(), "weather info aggregated");

        Ok(WeatherInfo {
            current: map_current(current),
            hourly: hourly.into_iter().map(map_hourly).collect(),
        })
    }
}

fn map_current(record: CurrentWeatherRecord) -> CurrentWeather {
    CurrentWeather {
        city_name: record.city_name,
        temperature_celsius: record.temperature_celsius,
        description: record.description,
        local_observation_time: observation_time_local(record.observed_at_epoch_seconds),
    }
}

fn map_hourly(record: HourlyForecastRecord) -> HourlyWeather {
    HourlyWeather {
        temperature_celsius: record.temperature_celsius,
        description: record.description,
        local_timestamp: parse_local_timestamp(&record.local_timestamp),
    }
}

/// Provider epoch seconds (UTC) expressed in the local time zone.
///
/// Out-of-range values fall back to the current time.
pub fn observation_time_local(epoch_seconds: i64) -> DateTime<Local> {
    match DateTime::from_timestamp(epoch_seconds, 0) {
        Some(utc) => utc.with_timezone(&Local),
        None => {
            warn!(epoch_seconds, "observation timestamp out of range, using now");
            Local::now()
        }
    }
}

/// Parse a provider-local `yyyy-MM-ddTHH:mm:ss` timestamp.
///
/// A malformed value (or a wall-clock time that does not exist locally) is
/// not an error: the current time is substituted.
pub fn parse_local_timestamp(timestamp: &str) -> DateTime<Local> {
    let parsed = NaiveDateTime::parse_from_str(timestamp, LOCAL_TIMESTAMP_FORMAT)
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest());

    parsed.unwrap_or_else(|| {
        warn!(%timestamp, "unparseable hourly timestamp, using now");
        Local::now()
    })
}
