//! Protocol traps.
//!
//! Each trap owns its socket exclusively and hands every captured payload
//! unit to the shared [`Reporter`]. Traps start independently: a failed
//! bind disables that one port and the rest keep serving. Per-connection
//! errors stop at the trap boundary and never reach the classifier or the
//! collector.

pub mod ftp;
pub mod http;
pub mod ssh;
pub mod udp;

use crate::config::SensorConfig;
use crate::reporter::Reporter;
use std::sync::Arc;

/// Start every trap in its own task.
pub fn spawn_all(config: &SensorConfig, reporter: Arc<Reporter>) {
    let http_addr = format!("{}:{}", config.bind_host, config.http_port);
    let http_label = format!("HTTP ({})", config.http_port);
    let http_reporter = reporter.clone();
    tokio::spawn(async move {
        if let Err(e) = http::run(http_addr, http_label, http_reporter).await {
            log::error!("❌ HTTP trap unavailable: {}", e);
        }
    });

    let ftp_addr = format!("{}:{}", config.bind_host, config.ftp_port);
    let ftp_label = format!("FTP ({})", config.ftp_port);
    let ftp_reporter = reporter.clone();
    tokio::spawn(async move {
        if let Err(e) = ftp::run(ftp_addr, ftp_label, ftp_reporter).await {
            log::error!("❌ FTP trap unavailable: {}", e);
        }
    });

    let ssh_addr = format!("{}:{}", config.bind_host, config.ssh_port);
    let ssh_label = format!("SSH ({})", config.ssh_port);
    let ssh_reporter = reporter.clone();
    tokio::spawn(async move {
        if let Err(e) = ssh::run(ssh_addr, ssh_label, ssh_reporter).await {
            log::error!("❌ SSH trap unavailable: {}", e);
        }
    });

    let udp_addr = format!("{}:{}", config.bind_host, config.udp_port);
    let udp_label = format!("UDP ({})", config.udp_port);
    tokio::spawn(async move {
        if let Err(e) = udp::run(udp_addr, udp_label, reporter).await {
            log::error!("❌ UDP trap unavailable: {}", e);
        }
    });
}
