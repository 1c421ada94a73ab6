//! Datagram trap.
//!
//! One datagram, one payload unit; the source address comes from the
//! datagram envelope.

use crate::reporter::Reporter;
use std::sync::Arc;
use tokio::net::UdpSocket;

pub async fn run(addr: String, label: String, reporter: Arc<Reporter>) -> std::io::Result<()> {
    let socket = UdpSocket::bind(&addr).await?;
    log::info!("✅ UDP trap armed on {}", addr);

    let mut buf = vec![0u8; 65535];
    loop {
        match socket.recv_from(&mut buf).await {
            Ok((n, peer)) => {
                let text = String::from_utf8_lossy(&buf[..n]);
                reporter.report(&peer.ip().to_string(), &label, &text);
            }
            Err(e) => log::debug!("UDP receive error: {}", e),
        }
    }
}
