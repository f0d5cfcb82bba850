use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    model::{CurrentWeatherRecord, HourlyForecastRecord},
};

pub mod weatherbit;

pub use weatherbit::WeatherbitGateway;

/// Read-only access to a remote weather service.
///
/// Implementations return provider-shaped records; all mapping into the
/// domain happens in the use case.
#[async_trait]
pub trait WeatherGateway: Send + Sync + Debug {
    /// Current conditions for `city`. The provider may return several records.
    async fn current_weather(&self, city: &str) -> Result<Vec<CurrentWeatherRecord>>;

    /// Hourly forecast for the next `hours` hours, in provider order.
    async fn hourly_forecast(&self, city: &str, hours: u32) -> Result<Vec<HourlyForecastRecord>>;
}
