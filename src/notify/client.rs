use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use super::messages::TranscriptEvent;
use crate::protocol::Mode;

/// Best-effort transcript push to a third-party consumer.
///
/// Emission must never fail the command that produced the transcript: the
/// peer still gets its response even when the side-channel is down.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn emit(&self, mode: Mode, session_id: Option<&str>, text: &str);
}

/// NATS-backed notifier publishing to `<prefix>.<mode subject>`.
pub struct NatsNotifier {
    client: async_nats::Client,
    subject_prefix: String,
}

impl NatsNotifier {
    /// Connect to the NATS server.
    pub async fn connect(url: &str, subject_prefix: String) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self {
            client,
            subject_prefix,
        })
    }

    fn subject(&self, mode: Mode) -> String {
        format!("{}.{}", self.subject_prefix, mode.subject())
    }
}

#[async_trait]
impl Notifier for NatsNotifier {
    async fn emit(&self, mode: Mode, session_id: Option<&str>, text: &str) {
        let event = TranscriptEvent {
            session_id: session_id.map(String::from),
            text: text.to_string(),
            timestamp: Utc::now(),
        };

        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to encode transcript event: {}", e);
                return;
            }
        };

        let subject = self.subject(mode);
        if let Err(e) = self.client.publish(subject.clone(), payload.into()).await {
            warn!("Failed to publish transcript to {}: {}", subject, e);
        }
    }
}

/// Stands in when no broker is reachable; transcripts still go back to the
/// requesting peer.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn emit(&self, _mode: Mode, _session_id: Option<&str>, _text: &str) {}
}
