//! Catalog Admin Entry Point
//!
//! Initializes logging, loads configuration, and runs the interactive
//! console against the configured catalog API.

use anyhow::Result;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use catalog_admin::core::{Config, Console};
use catalog_admin::domains::catalog::HttpProductApi;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    config.validate()?;

    info!("Starting {} v{}", config.app.name, config.app.version);

    let api = HttpProductApi::new(&config.api)?;
    info!("Using catalog API at {}", api.base_url());

    let mut console = Console::new(
        Arc::new(api),
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );
    console.run().await?;

    info!("Shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr so they never interleave with the console on stdout.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
