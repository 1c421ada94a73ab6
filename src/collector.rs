//! Alert collection service.
//!
//! Owns the shared [`TrafficLog`](crate::history::TrafficLog) handle and
//! exposes three routes: record ingestion, a JSON snapshot for external
//! consumers, and a self-refreshing HTML feed for eyeballs. Consumers of
//! the snapshot always get a well-formed (possibly empty) history - bind
//! or delivery failures elsewhere in the pipeline are invisible here.

use crate::event::Event;
use crate::history::SharedLog;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};

/// Build the collector's routes over a shared history handle.
pub fn router(history: SharedLog) -> Router {
    Router::new()
        .route("/", get(feed_page))
        .route("/alert", post(ingest_alert))
        .route("/api/events", get(api_events))
        .with_state(history)
}

/// Bind and serve until the process exits.
pub async fn serve(history: SharedLog, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    log::info!("☁️  Collector online at http://{}", bind_addr);
    axum::serve(listener, router(history)).await?;
    Ok(())
}

/// `POST /alert` - ingest one record. Always 200 with no body; eviction
/// past capacity is routine, never an error.
async fn ingest_alert(State(history): State<SharedLog>, Json(event): Json<Event>) -> StatusCode {
    if event.kind.is_safe() {
        log::info!(" [LOG] {} from {}", event.kind.as_str(), event.ip);
    } else {
        log::warn!(" [ALERT] {} from {}", event.kind.as_str(), event.ip);
    }

    history.write().await.ingest(event);
    StatusCode::OK
}

/// `GET /api/events` - the history snapshot, newest first. Read-only;
/// poll again for updates.
async fn api_events(State(history): State<SharedLog>) -> Json<Vec<Event>> {
    Json(history.read().await.snapshot())
}

/// `GET /` - live feed page, refreshed by the browser every two seconds.
async fn feed_page(State(history): State<SharedLog>) -> Html<String> {
    let events = history.read().await.snapshot();
    Html(render_feed(&events))
}

const FEED_STYLE: &str = "\
body { background-color: #0f0f0f; color: #e0e0e0; font-family: 'Courier New', monospace; padding: 20px; }\n\
h1 { border-bottom: 2px solid #555; padding-bottom: 10px; color: #fff; }\n\
.card { background: #1a1a1a; margin-bottom: 12px; padding: 12px; border-radius: 4px; border-left: 6px solid #555; }\n\
.threat { border-left-color: #ff3333; }\n\
.threat .type { color: #ff3333; font-weight: bold; font-size: 1.1em; }\n\
.safe { border-left-color: #00cc66; }\n\
.safe .type { color: #00cc66; font-weight: bold; font-size: 1.1em; }\n\
.meta { color: #888; font-size: 0.85em; margin: 4px 0; }\n\
.payload { background: #000; padding: 8px; color: #ccc; font-size: 0.8em; word-break: break-all; border: 1px solid #333; margin-top: 5px; }\n\
.empty { color: #666; text-align: center; margin-top: 50px; }";

fn render_feed(events: &[Event]) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<html>\n<head>\n");
    html.push_str("<meta http-equiv=\"refresh\" content=\"2\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<style>\n");
    html.push_str(FEED_STYLE);
    html.push_str("\n</style>\n</head>\n<body>\n<h1>🌐 LIVE TRAFFIC MONITOR</h1>\n<div id=\"feed\">\n");

    if events.is_empty() {
        html.push_str("<div class=\"empty\">Waiting for traffic...</div>\n");
    } else {
        for event in events {
            let (css, icon) = if event.kind.is_safe() {
                ("card safe", "✅")
            } else {
                ("card threat", "⚠️")
            };
            html.push_str(&format!(
                "<div class=\"{}\">\n<div class=\"type\">{} {}</div>\n\
                 <div class=\"meta\">SOURCE: {} • TIME: {}</div>\n\
                 <div class=\"payload\">{}</div>\n</div>\n",
                css,
                icon,
                event.kind.as_str(),
                escape_html(&event.ip),
                escape_html(&event.timestamp),
                escape_html(&event.payload),
            ));
        }
    }

    html.push_str("</div>\n</body>\n</html>");
    html
}

/// Payloads are attacker-controlled; escape them before they hit the page.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
