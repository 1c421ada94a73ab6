//! Credential-exchange trap.
//!
//! Greets like a real FTP server, then treats every chunk the peer writes
//! as one payload unit until the peer hangs up. Successive messages are
//! independent: a USER and the PASS that follows are never joined into one
//! event.

use crate::reporter::Reporter;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const GREETING: &[u8] = b"220 Welcome to SecureFTP\r\n";

pub async fn run(addr: String, label: String, reporter: Arc<Reporter>) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    log::info!("✅ FTP trap armed on {}", addr);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                log::debug!("FTP accept error: {}", e);
                continue;
            }
        };

        let label = label.clone();
        let reporter = reporter.clone();
        tokio::spawn(async move {
            let source = peer.ip().to_string();
            if let Err(e) = handle(socket, &source, &label, &reporter).await {
                log::debug!("FTP connection from {} dropped: {}", source, e);
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
    socket.write_all(GREETING).await?;

    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&buf[..n]);
        reporter.report(source, label, text.trim());
    }
}
