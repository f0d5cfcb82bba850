use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the stderr subscriber.
///
/// The level is controlled by the `WEATHER_LOG` environment variable, e.g.
/// `WEATHER_LOG=weather_sdk=debug weather show Berlin`.
pub fn init() {
    let env_filter =
        EnvFilter::try_from_env("WEATHER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_timer(fmt::time::ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string())),
        )
        .init();
}
