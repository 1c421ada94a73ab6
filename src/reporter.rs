//! Classification and best-effort alert delivery.

use crate::event::Event;
use crate::signature::SignatureEngine;
use std::time::Duration;

/// Classifies payload units and ships the resulting records to the
/// collector.
///
/// Delivery is best-effort by contract: exactly one POST per payload unit,
/// no retry, no queueing. Traffic telemetry is allowed to go missing; a
/// failed delivery costs one record and nothing else. Do not add retry
/// state here.
pub struct Reporter {
    signatures: SignatureEngine,
    client: reqwest::Client,
    alert_url: String,
}

impl Reporter {
    pub fn new(alert_url: String) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            signatures: SignatureEngine::new()?,
            client,
            alert_url,
        })
    }

    /// Classify one payload unit, stamp it, and dispatch the record.
    ///
    /// Classification is synchronous and pure; the network send runs on its
    /// own task so the caller's accept loop never waits on the collector.
    /// Returns the event so callers can observe the verdict.
    pub fn report(&self, source: &str, protocol: &str, text: &str) -> Event {
        let kind = self.signatures.classify(text);
        let event = Event::new(kind, source, protocol, text);

        if kind.is_safe() {
            log::info!("[ALLOWED] SAFE TRAFFIC from {} ({})", source, protocol);
        } else {
            log::warn!("[BLOCKED] {} from {} ({})", kind.as_str(), source, protocol);
        }

        let client = self.client.clone();
        let url = self.alert_url.clone();
        let record = event.clone();
        tokio::spawn(async move {
            match client.post(&url).json(&record).send().await {
                Ok(response) if !response.status().is_success() => {
                    log::debug!("Collector rejected record: {}", response.status());
                }
                Ok(_) => {}
                Err(e) => log::debug!("Record delivery failed: {}", e),
            }
        });

        event
    }
}
