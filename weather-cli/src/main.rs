//! Binary crate for the `weather` command-line tool.
//!
//! This crate is a host application for `weather-sdk`:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Showing the weather screen and reacting to its lifecycle events

use clap::Parser;

mod cli;
mod logging;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cmd = cli::Cli::parse();
    cmd.run().await
}
