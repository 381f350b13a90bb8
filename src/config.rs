//! # Client Configuration
//!
//! Connection settings for the feed client. The configuration is plain
//! data handed to the client at construction; nothing here is read
//! from the environment implicitly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::relay::DuplicatePolicy;

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Settings for one [`FeedClient`](crate::client::FeedClient).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base address of the real-time API. Accepts `http(s)://` or
    /// `ws(s)://`; the channel paths are appended per feed.
    pub api_base: String,

    /// How the per-feed registries treat re-registration of a handle.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// WebSocket handshake timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl FeedConfig {
    /// Configuration with defaults for everything but the base address.
    pub fn new(api_base: impl Into<String>) -> Self {
        FeedConfig {
            api_base: api_base.into(),
            duplicate_policy: DuplicatePolicy::default(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
