use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::{
    config::GatewaySettings,
    error::{Result, WeatherError},
    model::{CurrentWeatherRecord, HourlyForecastRecord},
};

use super::WeatherGateway;

/// Weatherbit v2.0 REST client.
///
/// Every request carries the API key as the `key` query parameter.
#[derive(Debug, Clone)]
pub struct WeatherbitGateway {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherbitGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self> {
        let http = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            api_key: settings.api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T>(&self, endpoint: &'static str, query: &[(&str, &str)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, ?query, "requesting weatherbit {endpoint}");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = res.status();
        let body = res.text().await.map_err(reqwest::Error::without_url)?;
        trace!(%status, %body, "weatherbit {endpoint} response");

        if !status.is_success() {
            return Err(WeatherError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct WbWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WbCurrentItem {
    temp: f32,
    city_name: String,
    weather: WbWeather,
    ts: i64,
}

#[derive(Debug, Deserialize)]
struct WbCurrentResponse {
    #[serde(default)]
    data: Vec<WbCurrentItem>,
}

#[derive(Debug, Deserialize)]
struct WbHourlyItem {
    timestamp_local: String,
    weather: WbWeather,
    temp: f32,
}

#[derive(Debug, Deserialize)]
struct WbHourlyResponse {
    #[serde(default)]
    data: Vec<WbHourlyItem>,
}

impl From<WbCurrentItem> for CurrentWeatherRecord {
    fn from(item: WbCurrentItem) -> Self {
        Self {
            city_name: item.city_name,
            temperature_celsius: item.temp,
            description: item.weather.description,
            observed_at_epoch_seconds: item.ts,
        }
    }
}

impl From<WbHourlyItem> for HourlyForecastRecord {
    fn from(item: WbHourlyItem) -> Self {
        Self {
            local_timestamp: item.timestamp_local,
            temperature_celsius: item.temp,
            description: item.weather.description,
        }
    }
}

#[async_trait]
impl WeatherGateway for WeatherbitGateway {
    async fn current_weather(&self, city: &str) -> Result<Vec<CurrentWeatherRecord>> {
        let parsed: WbCurrentResponse = self.get_json("current", &[("city", city)]).await?;
        Ok(parsed.data.into_iter().map(Into::into).collect())
    }

    async fn hourly_forecast(&self, city: &str, hours: u32) -> Result<Vec<HourlyForecastRecord>> {
        let hours = hours.to_string();
        let parsed: WbHourlyResponse = self
            .get_json("forecast/hourly", &[("city", city), ("hours", hours.as_str())])
            .await?;
        Ok(parsed.data.into_iter().map(Into::into).collect())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
