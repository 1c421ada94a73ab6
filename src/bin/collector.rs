//! Collector daemon - receives alert records from the sensor and serves
//! the bounded history as JSON and as a live HTML feed.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin collector
//! ```
//!
//! ## Environment Variables
//!
//! - COLLECTOR_HOST - bind host (default: 0.0.0.0)
//! - COLLECTOR_PORT - bind port (default: 3000)
//! - MAX_LOG_ENTRIES - history capacity (default: 50)
//! - RUST_LOG - logging level (optional, default: info)

use nettrap::collector;
use nettrap::config::CollectorConfig;
use nettrap::history;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = CollectorConfig::from_env()?;

    log::info!("🚀 Starting collector");
    log::info!("   Bind: {}", config.bind_addr());
    log::info!("   History capacity: {}", config.capacity);

    let log_handle = history::shared(config.capacity);
    collector::serve(log_handle, &config.bind_addr()).await
}
