//! livefeed - client-side relay for live message and event feeds
//!
//! Connects to a real-time push endpoint, decodes create/update/delete
//! notifications for two data kinds and fans them out to in-process
//! subscribers in registration order.

pub mod cli;
pub mod client;
pub mod config;
pub mod relay;
pub mod transport;

pub use client::{FeedClient, FeedClientBuilder};
pub use config::FeedConfig;
pub use relay::{
    dispatch_label, CalendarEvent, ChangeAction, ChangeDispatcher, DispatchOutcome,
    DuplicatePolicy, FeedKind, Message, SharedSubscriber, Subscriber, SubscriberRegistry,
};
pub use transport::{ChangeFrame, ChannelHandle, TransportError, TransportResult};
