use anyhow::Result;
use svg_forge::{config, server};
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
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

    // RUST_LOG may carry a full filter directive; only the config value is validated
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(directive) => tracing_subscriber::EnvFilter::try_new(&directive)?,
        Err(_) => {
            let log_level = &config.server.logs.level;
            if let Err(e) = validate_log_level(log_level) {
                eprintln!("{}", e);
                std::process::exit(1);
            }
            tracing_subscriber::EnvFilter::try_new(log_level)?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .init();

    info!("Starting SVG forge server");
    info!(
        "Configuration loaded successfully (AI features {})",
        if config.llm.credential().is_some() {
            "enabled"
        } else {
            "disabled"
        }
    );

    server::run(config).await?;

    Ok(())
}
