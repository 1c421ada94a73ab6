//! Request/response trap.
//!
//! Reads one HTTP request, captures the decoded path plus the client's
//! User-Agent as a single payload unit, replies 403 and closes. Malformed
//! requests are never rejected; whatever text arrived becomes the payload.

use crate::reporter::Reporter;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Cap on how much of a request we keep; anything past this is ignored.
const MAX_REQUEST_BYTES: usize = 8192;

const DENIED: &[u8] =
    b"HTTP/1.1 403 Forbidden\r\nContent-Length: 13\r\nConnection: close\r\n\r\nAccess Denied";

pub async fn run(addr: String, label: String, reporter: Arc<Reporter>) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    log::info!("✅ HTTP trap armed on {}", addr);

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(pair) => pair,
            Err(e) => {
                log::debug!("HTTP accept error: {}", e);
                continue;
            }
        };

        let label = label.clone();
        let reporter = reporter.clone();
        tokio::spawn(async move {
            let source = peer.ip().to_string();
            if let Err(e) = handle(socket, &source, &label, &reporter).await {
                log::debug!("HTTP connection from {} dropped: {}", source, e);
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
    let mut buf = vec![0u8; MAX_REQUEST_BYTES];
    let mut read = 0;

    // Read until the header terminator or the peer stops sending.
    loop {
        if read == buf.len() {
            break;
        }
        let n = socket.read(&mut buf[read..]).await?;
        if n == 0 {
            break;
        }
        read += n;
        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }

    // A connect-and-close probe carries no request to inspect
    if read > 0 {
        let raw = String::from_utf8_lossy(&buf[..read]);
        reporter.report(source, label, &request_evidence(&raw));
    }

    socket.write_all(DENIED).await?;
    socket.shutdown().await
}

/// `URL: <decoded path> | UA: <agent>` from a raw request, best-effort.
fn request_evidence(raw: &str) -> String {
    let request_line = raw.lines().next().unwrap_or("");
    let path = percent_decode(request_path(request_line));

    let agent = raw
        .lines()
        .skip(1)
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("user-agent") {
                Some(value.trim().to_string())
            } else {
                None
            }
        })
        .unwrap_or_else(|| "Unknown".to_string());

    format!("URL: {} | UA: {}", path, agent)
}

/// Extract the request target from a request line, tolerating targets that
/// contain raw spaces.
fn request_path(line: &str) -> &str {
    let after_method = line.split_once(' ').map(|(_, rest)| rest).unwrap_or("");
    after_method
        .rsplit_once(" HTTP/")
        .map(|(path, _)| path)
        .unwrap_or(after_method)
}

/// Percent-decoding that never fails: malformed escapes pass through as-is.
fn percent_decode(input: &str) -> String {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_evidence() {
        let raw = "GET /login?q=1 HTTP/1.1\r\nHost: trap\r\nUser-Agent: sqlmap/1.7\r\n\r\n";
        assert_eq!(request_evidence(raw), "URL: /login?q=1 | UA: sqlmap/1.7");
    }

    #[test]
    fn test_missing_user_agent_defaults() {
        let raw = "GET /about.html HTTP/1.1\r\nHost: trap\r\n\r\n";
        assert_eq!(request_evidence(raw), "URL: /about.html | UA: Unknown");
    }

    #[test]
    fn test_garbage_still_produces_evidence() {
        assert_eq!(request_evidence(""), "URL:  | UA: Unknown");
        assert_eq!(request_evidence("\x01\x02\x03"), "URL:  | UA: Unknown");
    }

    #[test]
    fn test_path_with_raw_spaces_survives() {
        let line = "GET /login?q=UNION SELECT * FROM users-- HTTP/1.1";
        assert_eq!(request_path(line), "/login?q=UNION SELECT * FROM users--");
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(
            percent_decode("/login?q=UNION%20SELECT%20*%20FROM%20users--"),
            "/login?q=UNION SELECT * FROM users--"
        );
        // Malformed escapes pass through untouched
        assert_eq!(percent_decode("/a%2"), "/a%2");
        assert_eq!(percent_decode("/a%zz"), "/a%zz");
    }
}
