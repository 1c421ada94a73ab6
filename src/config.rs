//! Configuration loaded from environment variables.
//!
//! Port numbers and endpoints are deployment concerns, not part of the
//! pipeline contract, so everything here has a default and can be
//! overridden via the environment (or a `.env` file).

use std::env;
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_port(name: &str, default: u16) -> Result<u16, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            ConfigError::InvalidValue(format!("{} must be a port number, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

fn env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            ConfigError::InvalidValue(format!("{} must be a positive integer, got '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}

fn env_millis(name: &str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| {
                ConfigError::InvalidValue(format!("{} must be milliseconds, got '{}'", name, raw))
            }),
        Err(_) => Ok(Duration::from_millis(default)),
    }
}

/// Trap ports and the collector endpoint for the sensor daemon.
#[derive(Debug, Clone)]
pub struct SensorConfig {
    pub bind_host: String,
    pub http_port: u16,
    pub ftp_port: u16,
    pub ssh_port: u16,
    pub udp_port: u16,
    pub collector_url: String,
}

impl SensorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_host: env_string("TRAP_BIND", "0.0.0.0"),
            http_port: env_port("HTTP_PORT", 8080)?,
            ftp_port: env_port("FTP_PORT", 2121)?,
            ssh_port: env_port("SSH_PORT", 2222)?,
            udp_port: env_port("UDP_PORT", 9999)?,
            collector_url: env_string("COLLECTOR_URL", "http://127.0.0.1:3000/alert"),
        })
    }
}

/// Bind address and history capacity for the collector daemon.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub host: String,
    pub port: u16,
    pub capacity: usize,
}

impl CollectorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let capacity = env_usize("MAX_LOG_ENTRIES", crate::history::DEFAULT_CAPACITY)?;
        if capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_LOG_ENTRIES must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            host: env_string("COLLECTOR_HOST", "0.0.0.0"),
            port: env_port("COLLECTOR_PORT", 3000)?,
            capacity,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Target and pacing for the demo traffic generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub target_host: String,
    pub http_port: u16,
    pub ftp_port: u16,
    pub udp_port: u16,
    pub initial_delay: Duration,
    pub attack_delay: Duration,
}

impl GeneratorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            target_host: env_string("TARGET_HOST", "127.0.0.1"),
            http_port: env_port("HTTP_PORT", 8080)?,
            ftp_port: env_port("FTP_PORT", 2121)?,
            udp_port: env_port("UDP_PORT", 9999)?,
            initial_delay: env_millis("INITIAL_DELAY_MS", 500)?,
            attack_delay: env_millis("ATTACK_DELAY_MS", 2000)?,
        })
    }
}
