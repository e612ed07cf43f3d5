use md5::{Digest, Md5};
use reqwest::Client;
use ring::hmac;
use serde::Serialize;
use shared::models::VoteSnapshot;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::config::PusherConfig;
use crate::error::AppError;

/// Fixed topic every viewer subscribes to.
pub const CHANNEL_NAME: &str = "vote-channel";
/// The one event type carried on the channel.
pub const EVENT_NAME: &str = "vote_update";

/// Seam over the broadcast transport, mirroring [`crate::store::CounterStore`].
#[rocket::async_trait]
pub trait SnapshotPublisher: Send + Sync {
    async fn publish(&self, snapshot: &VoteSnapshot) -> Result<(), AppError>;
}

#[derive(Serialize)]
struct Event<'a> {
    name: &'a str,
    channel: &'a str,
    data: String,
}

/// Publishes snapshots through the Pusher REST API.
pub struct PusherPublisher {
    http: Client,
    config: PusherConfig,
    key: hmac::Key,
}

impl PusherPublisher {
    pub fn new(config: PusherConfig) -> Self {
        let key = hmac::Key::new(hmac::HMAC_SHA256, config.secret.as_bytes());

        Self {
            http: Client::new(),
            config,
            key,
        }
    }

    fn path(&self) -> String {
        format!("/apps/{}/events", self.config.app_id)
    }

    fn endpoint(&self) -> String {
        format!("https://api-{}.pusher.com{}", self.config.cluster, self.path())
    }

    /// Pusher request auth: an MD5 digest of the body plus an HMAC-SHA256
    /// signature over the method, path and alphabetised query string.
    fn signed_query(&self, body: &str, timestamp: u64) -> String {
        let body_md5 = hex(&Md5::digest(body.as_bytes()));
        let query = format!(
            "auth_key={}&auth_timestamp={}&auth_version=1.0&body_md5={}",
            self.config.key, timestamp, body_md5
        );
        let to_sign = format!("POST\n{}\n{}", self.path(), query);
        let signature = hex(hmac::sign(&self.key, to_sign.as_bytes()).as_ref());

        format!("{query}&auth_signature={signature}")
    }
}

#[rocket::async_trait]
impl SnapshotPublisher for PusherPublisher {
    async fn publish(&self, snapshot: &VoteSnapshot) -> Result<(), AppError> {
        let event = Event {
            name: EVENT_NAME,
            channel: CHANNEL_NAME,
            data: serde_json::to_string(snapshot)?,
        };
        let body = serde_json::to_string(&event)?;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let url = format!("{}?{}", self.endpoint(), self.signed_query(&body, timestamp));

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Publish(format!(
                "channel returned {}",
                response.status()
            )));
        }

        debug!(?snapshot, "broadcast {EVENT_NAME}");
        Ok(())
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
