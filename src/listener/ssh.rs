//! Banner-exchange trap.
//!
//! SSH clients open with a cleartext version banner. The trap captures
//! that first chunk as the payload unit and hangs up immediately; a peer
//! that never sends anything produces no event.

use crate::reporter::Reporter;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tokio::net::{TcpListener, TcpStream};

pub async fn run(addr: String, label: String, reporter: Arc<Reporter>) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    log::info!("✅ SSH trap armed on {}", addr);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                log::debug!("SSH accept error: {}", e);
                continue;
            }
        };

        let label = label.clone();
        let reporter = reporter.clone();
        tokio::spawn(async move {
            let source = peer.ip().to_string();
            if let Err(e) = handle(socket, &source, &label, &reporter).await {
                log::debug!("SSH connection from {} dropped: {}", source, e);
            }
        });
    }
}

async fn handle(
    mut socket: TcpStream,
    source: &str,
    label: &str,
    reporter: &Reporter,
) -> std::io::Result<()> {
    let mut buf = [0u8; 1024];
    let n = socket.read(&mut buf).await?;
    if n > 0 {
        let text = String::from_utf8_lossy(&buf[..n]);
        reporter.report(source, label, text.trim());
    }
    // Hang up: the socket drops here
    Ok(())
}
