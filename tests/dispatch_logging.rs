//! Dispatch Logging Tests
//!
//! Every notification must be logged exactly once, before any
//! subscriber callback runs. These tests install a capturing logger for
//! the whole process, so the complete contract is checked in a single
//! sequential test.

use std::sync::{Arc, Mutex, Once};

use livefeed::{
    ChangeAction, ChangeDispatcher, FeedKind, Message, SharedSubscriber, Subscriber,
    SubscriberRegistry,
};

// =============================================================================
// Capturing Logger
// =============================================================================

struct CaptureLogger {
    records: Mutex<Vec<String>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push(format!("{} {}", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INSTALL: Once = Once::new();

fn install_logger() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger installed");
        log::set_max_level(log::LevelFilter::Debug);
    });
}

fn drain_records() -> Vec<String> {
    LOGGER.records.lock().unwrap().drain(..).collect()
}

// =============================================================================
// Test Subscribers
// =============================================================================

/// Emits an info record when invoked, so ordering against the
/// dispatcher's debug record is visible in the captured stream.
struct LoggingSubscriber {
    tag: &'static str,
}

impl Subscriber<Message> for LoggingSubscriber {
    fn on_create(&self, payload: &Message) {
        log::info!("subscriber {} saw create {}", self.tag, payload.text);
    }

    fn on_update(&self, payload: &Message) {
        log::info!("subscriber {} saw update {}", self.tag, payload.text);
    }

    fn on_delete(&self, payload: &Message) {
        log::info!("subscriber {} saw delete {}", self.tag, payload.text);
    }
}

struct Bomb;

impl Subscriber<Message> for Bomb {
    fn on_create(&self, _payload: &Message) {
        panic!("boom");
    }
    fn on_update(&self, _payload: &Message) {}
    fn on_delete(&self, _payload: &Message) {}
}

fn msg(text: &str) -> Message {
    Message {
        text: text.to_string(),
    }
}

fn debug_lines(records: &[String]) -> Vec<&String> {
    records.iter().filter(|r| r.starts_with("DEBUG")).collect()
}

// =============================================================================
// Logging Contract
// =============================================================================

/// Checks the full logging sequence in one deterministic pass:
/// 1. the debug record precedes every subscriber callback,
/// 2. each dispatch produces exactly one debug record with the static
///    label and the payload,
/// 3. the record appears even when nobody is subscribed,
/// 4. a panicking subscriber adds an error record without suppressing
///    anyone else's delivery.
#[test]
fn test_dispatch_logs_once_before_subscribers() {
    install_logger();

    let registry = Arc::new(SubscriberRegistry::new());
    let dispatcher = ChangeDispatcher::new(FeedKind::Messages, Arc::clone(&registry));

    // 1+2: one subscriber, one dispatch.
    let a: SharedSubscriber<Message> = Arc::new(LoggingSubscriber { tag: "a" });
    registry.subscribe(Arc::clone(&a));
    drain_records();

    dispatcher.dispatch(ChangeAction::Update, &msg("hello"));

    let records = drain_records();
    let debugs = debug_lines(&records);
    assert_eq!(debugs.len(), 1, "one dispatch must log exactly once");
    assert!(debugs[0].contains("[update message]"));
    assert!(debugs[0].contains("hello"));

    let debug_pos = records.iter().position(|r| r.starts_with("DEBUG")).unwrap();
    let info_pos = records
        .iter()
        .position(|r| r.contains("subscriber a saw update hello"))
        .expect("subscriber callback must have run");
    assert!(
        debug_pos < info_pos,
        "dispatch must log before invoking subscribers"
    );

    // 3: the record appears even with an empty registry.
    registry.unsubscribe(&a);
    dispatcher.dispatch(ChangeAction::Delete, &msg("nobody listens"));

    let records = drain_records();
    let debugs = debug_lines(&records);
    assert_eq!(debugs.len(), 1);
    assert!(debugs[0].contains("[delete message]"));
    assert!(
        !records.iter().any(|r| r.contains("subscriber a")),
        "removed subscriber must not run"
    );

    // 4: a panicking subscriber is logged and isolated.
    registry.subscribe(Arc::new(Bomb));
    registry.subscribe(Arc::new(LoggingSubscriber { tag: "b" }));

    let outcome = dispatcher.dispatch(ChangeAction::Create, &msg("still delivered"));
    assert_eq!(outcome.notified, 1);
    assert_eq!(outcome.panicked, 1);

    let records = drain_records();
    assert_eq!(debug_lines(&records).len(), 1);
    assert!(
        records
            .iter()
            .any(|r| r.starts_with("ERROR") && r.contains("[create message]")),
        "the panic must leave an error record"
    );
    assert!(
        records
            .iter()
            .any(|r| r.contains("subscriber b saw create still delivered")),
        "subscribers after the panicking one must still run"
    );
}
