//! CLI argument definitions using clap
//!
//! Commands:
//! - livefeed tail --base-url <url> [--channel <all|messages|events>] [--strict-unique]

use std::fmt;

use clap::{Parser, Subcommand, ValueEnum};

/// livefeed - follow live message and event feeds from the terminal
#[derive(Parser, Debug)]
#[command(name = "livefeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to a feed endpoint and print every notification
    Tail {
        /// Base address of the real-time API (http(s):// or ws(s)://)
        #[arg(long)]
        base_url: String,

        /// Which feed(s) to follow
        #[arg(long, value_enum, default_value = "all")]
        channel: ChannelChoice,

        /// Refuse duplicate registration of the same subscriber
        #[arg(long)]
        strict_unique: bool,
    },
}

/// Feed selection for the tail command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelChoice {
    All,
    Messages,
    Events,
}

impl fmt::Display for ChannelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelChoice::All => write!(f, "all"),
            ChannelChoice::Messages => write!(f, "messages"),
            ChannelChoice::Events => write!(f, "events"),
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
