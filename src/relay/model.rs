//! # Feed Payloads
//!
//! Payload types carried by the two live feeds. Both are descriptive
//! records: once received they are never mutated, only handed to
//! subscribers by reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Free-form text content
    pub text: String,
}

/// A calendar entry announced on the events feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Short human-readable title
    pub title: String,

    /// Longer description, may be empty
    pub description: String,

    /// When the event starts
    pub start: DateTime<Utc>,

    /// When the event ends
    pub end: DateTime<Utc>,

    /// Category label; serialized under the wire name `type`
    #[serde(rename = "type")]
    pub kind: String,

    /// Icon identifier for display
    pub icon: String,

    /// Where the event takes place
    pub location: String,
}
