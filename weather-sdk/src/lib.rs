//! Core library behind an embeddable "current weather + 24h forecast" screen.
//!
//! This crate defines:
//! - A gateway abstraction over the remote weather service (Weatherbit)
//! - The use case that fetches current weather and hourly forecast concurrently
//! - Presentation models and the screen controller with its lifecycle events
//! - Configuration & credentials handling
//!
//! Hosts start from [`WeatherSdk`], create a screen with
//! [`WeatherSdk::create_screen`] and listen on [`WeatherSdk::events`].

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod gateway;
pub mod model;
pub mod presentation;
pub mod sdk;
pub mod usecase;

pub use config::{Config, GatewaySettings};
pub use controller::{UiState, WeatherController};
pub use error::WeatherError;
pub use events::SdkEvent;
pub use gateway::{WeatherGateway, WeatherbitGateway};
pub use model::{CityQuery, WeatherInfo};
pub use presentation::{WeatherUiMapper, WeatherUiModel};
pub use sdk::{ScreenConfig, WeatherSdk};
pub use usecase::{GetWeatherInfo, WeatherInfoService};
