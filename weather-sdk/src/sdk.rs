use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::{
    config::GatewaySettings,
    controller::WeatherController,
    error::Result,
    events::{EventBus, SdkEvent},
    gateway::{WeatherGateway, WeatherbitGateway},
    model::CityQuery,
    presentation::WeatherUiMapper,
    usecase::{GetWeatherInfo, WeatherInfoService},
};

/// Configuration of a single weather screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    pub city_name: String,
}

impl ScreenConfig {
    pub fn new(city_name: impl Into<String>) -> Self {
        Self { city_name: city_name.into() }
    }
}

/// Entry point for hosts: creates weather screens and publishes their
/// lifecycle events.
///
/// Dependencies are passed in explicitly; [`WeatherSdk::new`] wires the
/// Weatherbit gateway, [`WeatherSdk::with_gateway`] accepts any other.
#[derive(Debug, Clone)]
pub struct WeatherSdk {
    get_weather_info: Arc<dyn GetWeatherInfo>,
    events: EventBus,
}

impl WeatherSdk {
    pub fn new(settings: GatewaySettings) -> Result<Self> {
        let gateway = WeatherbitGateway::new(settings)?;
        Ok(Self::with_gateway(Arc::new(gateway)))
    }

    pub fn with_gateway(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self::with_use_case(Arc::new(WeatherInfoService::new(gateway)))
    }

    pub fn with_use_case(get_weather_info: Arc<dyn GetWeatherInfo>) -> Self {
        Self { get_weather_info, events: EventBus::new() }
    }

    /// Lifecycle events of every screen created by this SDK instance.
    pub fn events(&self) -> broadcast::Receiver<SdkEvent> {
        self.events.subscribe()
    }

    /// Create a screen for `config.city_name`.
    ///
    /// Fails with [`WeatherError::BlankCity`](crate::WeatherError::BlankCity)
    /// before any network activity if the city name is blank.
    pub fn create_screen(&self, config: ScreenConfig) -> Result<WeatherController> {
        let city = CityQuery::new(config.city_name)?;
        debug!(%city, "creating weather screen");

        Ok(WeatherController::new(
            city,
            Arc::clone(&self.get_weather_info),
            WeatherUiMapper,
            self.events.clone(),
        ))
    }
}
