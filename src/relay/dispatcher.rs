//! # Change Dispatcher
//!
//! Fans one decoded notification out to every subscriber of a feed.
//!
//! The dispatch sequence is fixed: the notification is logged exactly
//! once, then a point-in-time snapshot of the registry is walked in
//! registration order and the callback matching the action is invoked
//! on each entry with the same borrowed payload. Subscribing or
//! unsubscribing from inside a callback affects later dispatches, not
//! the one in flight.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::action::{dispatch_label, ChangeAction, FeedKind};
use super::registry::SubscriberRegistry;

/// Counters describing one fan-out pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Subscribers whose callback ran to completion.
    pub notified: usize,
    /// Subscribers whose callback panicked. The panic is contained and
    /// logged; remaining subscribers still run.
    pub panicked: usize,
}

/// Routes notifications of one feed to its registry.
pub struct ChangeDispatcher<P> {
    kind: FeedKind,
    registry: Arc<SubscriberRegistry<P>>,
}

impl<P> ChangeDispatcher<P> {
    pub fn new(kind: FeedKind, registry: Arc<SubscriberRegistry<P>>) -> Self {
        ChangeDispatcher { kind, registry }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry<P>> {
        &self.registry
    }
}

impl<P: fmt::Debug> ChangeDispatcher<P> {
    /// Deliver one notification to every registered subscriber.
    pub fn dispatch(&self, action: ChangeAction, payload: &P) -> DispatchOutcome {
        let label = dispatch_label(self.kind, action);
        log::debug!("[{}] payload={:?}", label, payload);

        let mut outcome = DispatchOutcome::default();
        for subscriber in self.registry.snapshot() {
            let call = panic::catch_unwind(AssertUnwindSafe(|| match action {
                ChangeAction::Create => subscriber.on_create(payload),
                ChangeAction::Update => subscriber.on_update(payload),
                ChangeAction::Delete => subscriber.on_delete(payload),
            }));

            match call {
                Ok(()) => outcome.notified += 1,
                Err(_) => {
                    outcome.panicked += 1;
                    log::error!("[{}] subscriber panicked, remaining subscribers still run", label);
                }
            }
        }

        outcome
    }
}

impl<P> Clone for ChangeDispatcher<P> {
    fn clone(&self) -> Self {
        ChangeDispatcher {
            kind: self.kind,
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<P> fmt::Debug for ChangeDispatcher<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeDispatcher")
            .field("kind", &self.kind)
            .field("subscribers", &self.registry.len())
            .finish()
    }
}
