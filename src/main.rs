use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod browser;
mod config;
mod export;
mod models;
mod scraper;

use config::{load_config, Config};
use scraper::Orchestrator;
use tokio::signal;

#[tokio::main]
async fn main() -> models::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let mut config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging; scoped directives quiet the noisy driver client
    // instead of suppressing warnings process-wide.
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var(
            "RUST_LOG",
            format!(
                "contact_scraper={},thirtyfour=warn,hyper=warn",
                config.logging.level
            ),
        );
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Driver endpoint discovery: the environment wins over config.yml.
    if let Ok(url) = std::env::var("WEBDRIVER_URL") {
        config.browser.webdriver_url = url;
    }

    let output_path = config.output_path();
    let orchestrator = Orchestrator::new(config);

    // Add graceful shutdown
    tokio::select! {
        result = orchestrator.run() => {
            let report = result?;
            info!("📊 Exported {} record(s)", report.records.len());
            println!("Data has been written to {}", output_path.display());
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
