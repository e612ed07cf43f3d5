use std::env;

use tracing::{info, warn};

pub struct Config {
    pub redis_url: String,
    pub pusher: Option<PusherConfig>,
}

/// Credentials for the Pusher app used to broadcast snapshots. The same
/// key/cluster pair is baked into the frontend at build time.
#[derive(Clone)]
pub struct PusherConfig {
    pub app_id: String,
    pub key: String,
    pub secret: String,
    pub cluster: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            redis_url: var_or("REDIS_URL", "redis://127.0.0.1:6379"),
            pusher: PusherConfig::load(),
        }
    }
}

impl PusherConfig {
    /// All four variables or nothing; a partial configuration cannot sign
    /// requests, so the server runs with broadcasting disabled instead.
    fn load() -> Option<Self> {
        Some(Self {
            app_id: var("PUSHER_APP_ID")?,
            key: var("PUSHER_KEY")?,
            secret: var("PUSHER_SECRET")?,
            cluster: var("PUSHER_CLUSTER")?,
        })
    }
}

fn var(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => {
            warn!("Environment variable {key} not found");
            None
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
