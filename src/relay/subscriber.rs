//! # Subscriber Trait
//!
//! The capability set a consumer implements to react to live changes
//! of one data kind.

use std::sync::Arc;

/// Receives lifecycle notifications for payloads of type `P`.
///
/// Callbacks take `&self` and run on the channel's reader task, so
/// implementations must be `Send + Sync` and should keep work short.
/// Interior mutability (`Mutex`, channels) is the expected way to
/// accumulate state.
pub trait Subscriber<P>: Send + Sync {
    /// A new payload came into existence.
    fn on_create(&self, payload: &P);

    /// An existing payload changed.
    fn on_update(&self, payload: &P);

    /// A payload was removed.
    fn on_delete(&self, payload: &P);
}

/// Shared handle under which a subscriber is registered and later
/// removed. Identity, not content, distinguishes subscribers: two
/// clones of one `Arc` are the same subscriber, two separate `Arc`s
/// with equal state are not.
pub type SharedSubscriber<P> = Arc<dyn Subscriber<P>>;
