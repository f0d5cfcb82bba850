use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

/// Errors produced by the SDK, from screen construction down to the gateway.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The configured city name is empty or whitespace-only.
    #[error("City name cannot be empty")]
    BlankCity,

    /// The provider answered, but with no current-weather record.
    #[error("current weather not found")]
    CurrentWeatherNotFound,

    /// The current-weather request itself failed; the cause is kept as `source()`.
    #[error("current weather not found")]
    CurrentWeatherUnavailable(#[source] Box<WeatherError>),

    #[error("HTTP request failed")]
    Transport(#[from] reqwest::Error),

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {endpoint} JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A gateway task panicked or was aborted before it settled.
    #[error("weather fetch task failed")]
    Task(#[from] tokio::task::JoinError),
}
