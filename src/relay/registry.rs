//! # Subscriber Registry
//!
//! Ordered collection of subscribers for one data kind. Registration
//! order is preserved and is the order dispatch walks the collection.
//! Removal matches by `Arc` identity, never by content, and removes a
//! single entry per call.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::subscriber::SharedSubscriber;

/// How a registry treats re-registration of an already-present
/// subscriber handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append unconditionally. A handle registered twice is invoked
    /// twice per dispatch and must be removed twice.
    Allow,
    /// Refuse a handle that is already registered.
    Reject,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        DuplicatePolicy::Allow
    }
}

/// Thread-safe subscriber list for a single feed.
pub struct SubscriberRegistry<P> {
    entries: RwLock<Vec<SharedSubscriber<P>>>,
    policy: DuplicatePolicy,
}

impl<P> SubscriberRegistry<P> {
    /// Empty registry with the default duplicate policy.
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    /// Empty registry with an explicit duplicate policy.
    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        SubscriberRegistry {
            entries: RwLock::new(Vec::new()),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Append a subscriber at the end of the list.
    ///
    /// Returns `false` when the policy is [`DuplicatePolicy::Reject`]
    /// and the same handle is already registered.
    pub fn subscribe(&self, subscriber: SharedSubscriber<P>) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };

        if self.policy == DuplicatePolicy::Reject
            && entries.iter().any(|e| Arc::ptr_eq(e, &subscriber))
        {
            return false;
        }

        entries.push(subscriber);
        true
    }

    /// Remove the first entry that is the same handle, scanning from
    /// the front. Returns `false` and leaves the list untouched when
    /// the handle is not registered.
    pub fn unsubscribe(&self, subscriber: &SharedSubscriber<P>) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };

        match entries.iter().position(|e| Arc::ptr_eq(e, subscriber)) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Point-in-time copy of the subscriber list in registration
    /// order. Later mutations of the registry do not affect a copy
    /// already taken.
    pub fn snapshot(&self) -> Vec<SharedSubscriber<P>> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P> Default for SubscriberRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for SubscriberRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("len", &self.len())
            .field("policy", &self.policy)
            .finish()
    }
}
