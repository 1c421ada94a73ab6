
pub mod collector;
pub mod config;
pub mod event;
pub mod history;
pub mod listener;
pub mod reporter;
pub mod signature;

use config::SensorConfig;
use reporter::Reporter;
use std::sync::Arc;

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = SensorConfig::from_env()?;

    log::info!("🕵️  Deep packet inspection monitor starting");
    log::info!(
        "   Traps: HTTP {}, FTP {}, SSH {}, UDP {}",
        config.http_port,
        config.ftp_port,
        config.ssh_port,
        config.udp_port
    );
    log::info!("   Collector: {}", config.collector_url);

    let reporter = Arc::new(Reporter::new(config.collector_url.clone())?);
    listener::spawn_all(&config, reporter);

    tokio::signal::ctrl_c().await?;
    log::info!("Ctrl+C received, shutting down");
    Ok(())
}
