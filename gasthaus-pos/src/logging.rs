//! Logging setup
//!
//! Console logging via `tracing`, pretty in development and JSON in
//! production. `RUST_LOG` overrides the level.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Load `.env` and initialise logging. Call once at startup.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let json_format = std::env::var("ENVIRONMENT")
        .map(|e| e == "production")
        .unwrap_or(false);

    init_logger("info", json_format)
}

/// Initialise the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: tests and embedders may have installed a subscriber already
    if json_format {
        let layer = fmt::layer().json().with_target(true);
        registry.with(layer).try_init().ok();
    } else {
        let layer = fmt::layer().with_target(true);
        registry.with(layer).try_init().ok();
    }

    Ok(())
}
