//! # Live-Update Relay
//!
//! In-process side of the live feed: typed payloads, per-kind
//! subscriber registries and the dispatcher that fans decoded
//! notifications out to them.
//!
//! The relay never talks to the network itself. The transport layer
//! decodes frames and hands them to a [`ChangeDispatcher`]; everything
//! from that point on is synchronous and in registration order.

pub mod action;
pub mod dispatcher;
pub mod model;
pub mod registry;
pub mod subscriber;

pub use action::{dispatch_label, ChangeAction, FeedKind};
pub use dispatcher::{ChangeDispatcher, DispatchOutcome};
pub use model::{CalendarEvent, Message};
pub use registry::{DuplicatePolicy, SubscriberRegistry};
pub use subscriber::{SharedSubscriber, Subscriber};
