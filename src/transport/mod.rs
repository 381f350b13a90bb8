//! # Feed Transport
//!
//! Client side of the real-time protocol: one WebSocket connection per
//! data kind, each owned by a background reader task that decodes text
//! frames into [`ChangeFrame`]s and hands them to the feed's
//! dispatcher.

pub mod connector;
pub mod errors;
pub mod wire;

pub use connector::{channel_url, open_channel, ChannelHandle};
pub use errors::{TransportError, TransportResult};
pub use wire::ChangeFrame;
