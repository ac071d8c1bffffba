use anyhow::Result;
use tabular_inference::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parses a level or a full `RUST_LOG` directive list, e.g. `info,tower_http=debug`
fn log_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).map_err(|e| {
        anyhow::anyhow!(
            "Invalid log level: '{}' ({}). Use a level (error, warn, info, debug, trace) or target=level directives",
            level,
            e
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let filter = match log_filter(&log_level) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting tabular inference server with log level: {}", log_level);

    server::run(config).await?;

    Ok(())
}
