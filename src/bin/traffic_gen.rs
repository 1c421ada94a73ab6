//! Demo traffic generator - fires a scripted mix of benign and malicious
//! probes at the sensor's trap ports so the live feed has something to
//! show.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin traffic_gen
//! ```
//!
//! ## Environment Variables
//!
//! - TARGET_HOST - sensor address (default: 127.0.0.1)
//! - HTTP_PORT / FTP_PORT / UDP_PORT - trap ports (defaults: 8080/2121/9999)
//! - INITIAL_DELAY_MS - pause between paired messages (default: 500)
//! - ATTACK_DELAY_MS - pause between probes (default: 2000)

use nettrap::config::GeneratorConfig;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = GeneratorConfig::from_env()?;
    let host = config.target_host.clone();

    log::info!("⚔️  Generating mixed traffic against {}", host);

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    log::info!("[1/6] Safe FTP login (should log green)");
    send_tcp(&host, config.ftp_port, b"USER guest\r\n").await;
    sleep(config.initial_delay).await;
    send_tcp(&host, config.ftp_port, b"PASS anonymous\r\n").await;
    sleep(config.attack_delay).await;

    log::info!("[2/6] Brute-force FTP login (should alert red)");
    send_tcp(&host, config.ftp_port, b"USER admin\r\n").await;
    sleep(config.initial_delay).await;
    send_tcp(&host, config.ftp_port, b"PASS 123456\r\n").await;
    sleep(config.attack_delay).await;

    log::info!("[3/6] Safe web request (should log green)");
    send_http(&http_client, &host, config.http_port, "/about.html").await;
    sleep(config.attack_delay).await;

    log::info!("[4/6] SQL injection probe (should alert red)");
    send_http(
        &http_client,
        &host,
        config.http_port,
        "/login?q=UNION SELECT * FROM users--",
    )
    .await;
    sleep(config.attack_delay).await;

    let udp = UdpSocket::bind("0.0.0.0:0").await?;
    let udp_target = format!("{}:{}", host, config.udp_port);

    log::info!("[5/6] Safe UDP ping (should log green)");
    send_udp(&udp, &udp_target, b"Hello Server, are you there?").await;
    sleep(config.attack_delay).await;

    log::info!("[6/6] Botnet-style command (should alert red)");
    send_udp(&udp, &udp_target, b"cmd.exe /c download_virus.exe").await;

    log::info!("✅ Simulation complete");
    Ok(())
}

/// Connect, write, close. The traps reset or hang up on purpose, so every
/// error here is expected noise.
async fn send_tcp(host: &str, port: u16, data: &[u8]) {
    let addr = format!("{}:{}", host, port);
    match TcpStream::connect(&addr).await {
        Ok(mut socket) => {
            if let Err(e) = socket.write_all(data).await {
                log::debug!("TCP write to {} failed: {}", addr, e);
            }
            let _ = socket.shutdown().await;
        }
        Err(e) => log::debug!("TCP connect to {} failed: {}", addr, e),
    }
}

/// GET a path; the trap answers 403 and that is fine.
async fn send_http(client: &reqwest::Client, host: &str, port: u16, path: &str) {
    let url = format!("http://{}:{}{}", host, port, path);
    if let Err(e) = client.get(&url).send().await {
        log::debug!("HTTP probe {} failed: {}", url, e);
    }
}

async fn send_udp(socket: &UdpSocket, target: &str, data: &[u8]) {
    if let Err(e) = socket.send_to(data, target).await {
        log::debug!("UDP probe to {} failed: {}", target, e);
    }
}
