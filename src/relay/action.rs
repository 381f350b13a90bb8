//! # Change Actions
//!
//! The lifecycle vocabulary shared by every feed: which data kind a
//! notification belongs to and which action it announces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle action announced by a feed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeAction {
    Create,
    Update,
    Delete,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "create",
            ChangeAction::Update => "update",
            ChangeAction::Delete => "delete",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two data kinds carried over the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Messages,
    Events,
}

impl FeedKind {
    /// Channel path appended to the base address.
    pub fn path_suffix(&self) -> &'static str {
        match self {
            FeedKind::Messages => "/messages",
            FeedKind::Events => "/events",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Messages => write!(f, "messages"),
            FeedKind::Events => write!(f, "events"),
        }
    }
}

/// Static diagnostic label for a (kind, action) pair.
///
/// Spelled out per pair so each label stays independently greppable in
/// log output.
pub fn dispatch_label(kind: FeedKind, action: ChangeAction) -> &'static str {
    match (kind, action) {
        (FeedKind::Messages, ChangeAction::Create) => "create message",
        (FeedKind::Messages, ChangeAction::Update) => "update message",
        (FeedKind::Messages, ChangeAction::Delete) => "delete message",
        (FeedKind::Events, ChangeAction::Create) => "create event",
        (FeedKind::Events, ChangeAction::Update) => "update event",
        (FeedKind::Events, ChangeAction::Delete) => "delete event",
    }
}
