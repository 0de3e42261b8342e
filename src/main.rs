// Standard library imports
use std::path::Path;

// External crate imports
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{error, info, warn};

// Internal crate imports
use tradeservices::config_loader::AppConfig;
use tradeservices::controller::OrderController;

const TOKEN_ENV: &str = "TRADESERVICES_TOKEN";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .init();
    info!("Logger initialized");

    // Load configuration from TOML file: parent directory first, then the working directory
    let config_path = Path::new("../config.toml");
    let config = match AppConfig::from_file(config_path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config from {}: {}", config_path.display(), e);

            let alt_path = Path::new("./config.toml");
            info!("Attempting to load from alternate path: {}", alt_path.display());
            AppConfig::from_file(alt_path)?
        }
    };

    let token = std::env::var(TOKEN_ENV).with_context(|| format!("Missing {}", TOKEN_ENV))?;

    run(&token, config).await
}

async fn run(token: &str, config: AppConfig) -> Result<()> {
    let mut controller = OrderController::new(token, config.controller_config(), None)?;

    match controller.summary(false).await {
        Ok(summary) => info!("{} orders on the book, columns {:?}", summary.len(), summary.columns()),
        Err(e) => error!("Failed to fetch order summary: {}", e),
    }

    info!("Following order updates, press Ctrl+C to stop");
    tokio::signal::ctrl_c().await?;
    warn!("Ctrl+C received. Shutting down...");

    controller.shutdown().await;
    info!("Exiting program");
    Ok(())
}
