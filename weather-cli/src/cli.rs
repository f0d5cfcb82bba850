use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::debug;
use weather_sdk::{
    Config, ScreenConfig, SdkEvent, UiState, WeatherSdk, config::DEFAULT_BASE_URL,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 24h forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Weatherbit API key (prompts when not given).
    Configure {
        #[arg(long)]
        api_key: Option<String>,

        /// Alternative API base URL, e.g. a local mock.
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Show current weather and the hourly forecast for a city.
    Show {
        city: String,

        /// Use this API key instead of the configured one.
        #[arg(long)]
        api_key: Option<String>,

        /// Print the screen model as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { api_key, base_url } => configure(api_key, base_url),
            Command::Show { city, api_key, json } => show(city, api_key, json).await,
        }
    }
}

fn configure(api_key: Option<String>, base_url: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = match api_key {
        Some(key) => key,
        None => inquire::Password::new("Weatherbit API key:")
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?,
    };
    if api_key.trim().is_empty() {
        return Err(anyhow!("API key cannot be empty"));
    }
    config.api_key = Some(api_key);

    if let Some(url) = base_url {
        config.base_url = (url != DEFAULT_BASE_URL).then_some(url);
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: String, api_key: Option<String>, json: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if api_key.is_some() {
        config.api_key = api_key;
    }

    let sdk = WeatherSdk::new(config.gateway_settings()?)?;
    let mut events = sdk.events();
    let screen = Arc::new(sdk.create_screen(ScreenConfig::new(city))?);
    let mut state_rx = screen.subscribe_state();

    if !json {
        eprintln!("Loading weather for {}...", screen.city());
    }
    tokio::spawn({
        let screen = Arc::clone(&screen);
        async move { screen.initialize().await }
    });

    let state = state_rx
        .wait_for(|state| !matches!(state, UiState::Loading))
        .await
        .context("Weather screen stopped before loading finished")?
        .clone();
    debug!(?state, "weather screen settled");

    if let UiState::Content(model) = &state {
        if json {
            println!("{}", serde_json::to_string_pretty(model)?);
        } else {
            print!("{}", render::render(model));
        }
        // Output is printed; this host dismisses the screen right away.
        screen.on_back_click();
    }

    match events.recv().await.context("Weather SDK event channel closed")? {
        SdkEvent::Finished => Ok(()),
        SdkEvent::FinishedWithError(err) => Err(anyhow!(render::error_chain(err.as_ref())))
            .with_context(|| format!("Could not load weather for {}", screen.city())),
    }
}
