//! CLI command implementations
//!
//! The tail command is a thin consumer: it registers printing
//! subscribers on the selected feeds, connects, and blocks until
//! Ctrl+C.

use std::sync::Arc;

use crate::client::FeedClient;
use crate::relay::{CalendarEvent, DuplicatePolicy, Message, Subscriber};

use super::args::{ChannelChoice, Command};
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    env_logger::init();
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Tail {
            base_url,
            channel,
            strict_unique,
        } => tail(&base_url, channel, strict_unique),
    }
}

/// Prints every notification it receives to stdout.
struct PrintingSubscriber;

impl Subscriber<Message> for PrintingSubscriber {
    fn on_create(&self, payload: &Message) {
        println!("message created: {}", payload.text);
    }

    fn on_update(&self, payload: &Message) {
        println!("message updated: {}", payload.text);
    }

    fn on_delete(&self, payload: &Message) {
        println!("message deleted: {}", payload.text);
    }
}

impl Subscriber<CalendarEvent> for PrintingSubscriber {
    fn on_create(&self, payload: &CalendarEvent) {
        println!(
            "event created: {} [{}] {} at {}",
            payload.title, payload.kind, payload.start, payload.location
        );
    }

    fn on_update(&self, payload: &CalendarEvent) {
        println!(
            "event updated: {} [{}] {} at {}",
            payload.title, payload.kind, payload.start, payload.location
        );
    }

    fn on_delete(&self, payload: &CalendarEvent) {
        println!("event deleted: {}", payload.title);
    }
}

/// Build the client from tail flags.
fn build_client(base_url: &str, strict_unique: bool) -> CliResult<FeedClient> {
    let policy = if strict_unique {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::Allow
    };

    FeedClient::builder()
        .api_base(base_url)
        .duplicate_policy(policy)
        .build()
        .map_err(|e| CliError::config_error(e.to_string()))
}

/// Register one printing subscriber per selected feed.
fn register_printers(client: &FeedClient, channel: ChannelChoice) {
    if matches!(channel, ChannelChoice::All | ChannelChoice::Messages) {
        client.subscribe_messages(Arc::new(PrintingSubscriber));
    }
    if matches!(channel, ChannelChoice::All | ChannelChoice::Events) {
        client.subscribe_events(Arc::new(PrintingSubscriber));
    }
}

/// Follow the selected feeds until Ctrl+C.
pub fn tail(base_url: &str, channel: ChannelChoice, strict_unique: bool) -> CliResult<()> {
    let mut client = build_client(base_url, strict_unique)?;
    register_printers(&client, channel);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        client
            .connect()
            .await
            .map_err(|e| CliError::connect_failed(e.to_string()))?;

        log::info!("[TAIL] following {} at {}", channel, base_url);
        tokio::signal::ctrl_c().await?;

        client.close();
        log::info!("[TAIL] stopped");
        Ok(())
    })
}
