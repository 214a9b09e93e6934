//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "loadcell", version, about = "HX711 load-cell poller")]
pub struct Cli {
    /// Path to config TOML; defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log (and report errors) as JSON lines instead of pretty text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum GainArg {
    /// Channel A, gain 128
    A128,
    /// Channel B, gain 32
    B32,
    /// Channel A, gain 64
    A64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReadErrorArg {
    /// Stop at the first failed poll
    Abort,
    /// Log the failed poll and continue
    Skip,
    /// Re-attempt the poll up to --max-retries times
    Retry,
}

/// Pin selection shared by every command that opens the sensor.
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct PinArgs {
    /// HX711 PD_SCK pin (overrides pins.clock)
    #[arg(long, value_name = "PIN")]
    pub clock_pin: Option<u8>,
    /// HX711 DOUT pin (overrides pins.data)
    #[arg(long, value_name = "PIN")]
    pub data_pin: Option<u8>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the sensor and print one reading per line
    Poll {
        #[command(flatten)]
        pins: PinArgs,
        /// Number of polls, at least 1 (overrides poll.count; see --forever)
        #[arg(
            long,
            value_name = "N",
            conflicts_with = "forever",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        count: Option<u64>,
        /// Poll until interrupted (Ctrl-C)
        #[arg(long, action = ArgAction::SetTrue)]
        forever: bool,
        /// Wait between polls in ms (overrides poll.interval_ms)
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
        /// Frames averaged per reading (overrides poll.samples)
        #[arg(long, value_name = "N")]
        samples: Option<u32>,
        /// Gain/channel for conversions (overrides poll.gain)
        #[arg(long, value_enum, value_name = "GAIN")]
        gain: Option<GainArg>,
        /// What to do when a poll fails (overrides errors.on_read_error)
        #[arg(long, value_enum, value_name = "POLICY")]
        on_read_error: Option<ReadErrorArg>,
        /// Retry budget per poll for --on-read-error retry
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Capture a zero offset before polling
        #[arg(long, action = ArgAction::SetTrue)]
        tare: bool,
    },
    /// Open the sensor, take one reading, and report it
    SelfCheck {
        #[command(flatten)]
        pins: PinArgs,
    },
}
