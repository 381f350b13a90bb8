//! # Transport Errors
//!
//! Error types for channel setup and frame handling.

use thiserror::Error;

use crate::relay::FeedKind;

/// Errors raised while opening or reading a feed channel.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("invalid base address '{0}': expected http(s):// or ws(s)://")]
    InvalidBaseUrl(String),

    #[error("missing configuration: {0}")]
    Config(String),

    #[error("connection timed out after {0}s")]
    ConnectTimeout(u64),

    #[error("websocket handshake failed for {url}: {reason}")]
    Handshake { url: String, reason: String },

    #[error("malformed frame on {kind} channel: {reason}")]
    MalformedFrame { kind: FeedKind, reason: String },

    #[error("binary frame on {0} channel is not supported")]
    BinaryFrame(FeedKind),

    #[error("client is already connected")]
    AlreadyConnected,
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
