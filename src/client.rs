//! # Feed Client
//!
//! Owner of the two feeds: holds one subscriber registry per data
//! kind, opens one channel per kind on connect and keeps the channel
//! handles alive until close.
//!
//! Registration works whether or not the client is connected. A
//! subscriber added before `connect()` receives every notification the
//! channel delivers; one added later joins from the next notification
//! on.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use livefeed::{FeedClient, Message, Subscriber};
//!
//! struct Printer;
//!
//! impl Subscriber<Message> for Printer {
//!     fn on_create(&self, m: &Message) { println!("new: {}", m.text); }
//!     fn on_update(&self, m: &Message) { println!("changed: {}", m.text); }
//!     fn on_delete(&self, m: &Message) { println!("gone: {}", m.text); }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut client = FeedClient::builder()
//!     .api_base("http://localhost:3000")
//!     .build()?;
//!
//! client.subscribe_messages(Arc::new(Printer));
//! client.connect().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::config::FeedConfig;
use crate::relay::{
    CalendarEvent, ChangeDispatcher, DuplicatePolicy, FeedKind, Message, SharedSubscriber,
    SubscriberRegistry,
};
use crate::transport::{open_channel, ChannelHandle, TransportError, TransportResult};

/// Client for the live message and event feeds.
#[derive(Debug)]
pub struct FeedClient {
    config: FeedConfig,
    messages: Arc<SubscriberRegistry<Message>>,
    events: Arc<SubscriberRegistry<CalendarEvent>>,
    channels: Vec<ChannelHandle>,
}

impl FeedClient {
    pub fn builder() -> FeedClientBuilder {
        FeedClientBuilder::default()
    }

    /// Client from a full configuration. Both registries take the
    /// configured duplicate policy.
    pub fn new(config: FeedConfig) -> Self {
        let policy = config.duplicate_policy;
        FeedClient {
            config,
            messages: Arc::new(SubscriberRegistry::with_policy(policy)),
            events: Arc::new(SubscriberRegistry::with_policy(policy)),
            channels: Vec::new(),
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Open both channels, messages first. Errors if the client is
    /// already connected or either handshake fails.
    pub async fn connect(&mut self) -> TransportResult<()> {
        if self.is_connected() {
            return Err(TransportError::AlreadyConnected);
        }

        let messages = open_channel(
            &self.config,
            ChangeDispatcher::new(FeedKind::Messages, Arc::clone(&self.messages)),
        )
        .await?;

        // If the second handshake fails, dropping the first handle here
        // closes its channel again.
        let events = open_channel(
            &self.config,
            ChangeDispatcher::new(FeedKind::Events, Arc::clone(&self.events)),
        )
        .await?;

        self.channels.push(messages);
        self.channels.push(events);
        Ok(())
    }

    /// Whether channels are currently held open.
    pub fn is_connected(&self) -> bool {
        !self.channels.is_empty()
    }

    /// Signal both channels to close and drop their handles. Safe to
    /// call at any time; a disconnected client ignores it.
    pub fn close(&mut self) {
        for channel in &mut self.channels {
            channel.close();
        }
        self.channels.clear();
    }

    // Message feed registration.

    pub fn subscribe_messages(&self, subscriber: SharedSubscriber<Message>) -> bool {
        self.messages.subscribe(subscriber)
    }

    pub fn unsubscribe_messages(&self, subscriber: &SharedSubscriber<Message>) -> bool {
        self.messages.unsubscribe(subscriber)
    }

    /// Registered message subscribers in registration order.
    pub fn message_subscribers(&self) -> Vec<SharedSubscriber<Message>> {
        self.messages.snapshot()
    }

    // Event feed registration.

    pub fn subscribe_events(&self, subscriber: SharedSubscriber<CalendarEvent>) -> bool {
        self.events.subscribe(subscriber)
    }

    pub fn unsubscribe_events(&self, subscriber: &SharedSubscriber<CalendarEvent>) -> bool {
        self.events.unsubscribe(subscriber)
    }

    /// Registered event subscribers in registration order.
    pub fn event_subscribers(&self) -> Vec<SharedSubscriber<CalendarEvent>> {
        self.events.snapshot()
    }
}

/// Builder for [`FeedClient`]. The base address is the only required
/// setting.
#[derive(Debug, Clone, Default)]
pub struct FeedClientBuilder {
    api_base: Option<String>,
    duplicate_policy: DuplicatePolicy,
    connect_timeout_secs: Option<u64>,
}

impl FeedClientBuilder {
    /// Base address of the real-time API (required).
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    pub fn build(self) -> TransportResult<FeedClient> {
        let api_base = self
            .api_base
            .ok_or_else(|| TransportError::Config("api_base is required".to_string()))?;

        let mut config = FeedConfig::new(api_base);
        config.duplicate_policy = self.duplicate_policy;
        if let Some(secs) = self.connect_timeout_secs {
            config.connect_timeout_secs = secs;
        }

        Ok(FeedClient::new(config))
    }
}
