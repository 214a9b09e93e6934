#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the load-cell poller.
//!
//! Every section is optional; an empty file polls SCK on pin 2 and DOUT on
//! pin 3, 100 times, 5 s apart.
//! `validate()` checks ranges that serde cannot express.
use eyre::WrapErr;
use serde::Deserialize;
use std::path::Path;

/// Highest GPIO line number on the Raspberry Pi BCM header.
pub const MAX_PIN: u8 = 53;
/// Upper bound on frames averaged into a single reading.
pub const MAX_SAMPLES: u32 = 64;

const DAY_MS: u64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Pins {
    /// HX711 PD_SCK
    pub clock: u8,
    /// HX711 DOUT
    pub data: u8,
}

impl Default for Pins {
    fn default() -> Self {
        Self { clock: 2, data: 3 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GainCfg {
    #[default]
    A128,
    B32,
    A64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PollCfg {
    /// Number of polls; 0 runs until stopped.
    pub count: u64,
    pub interval_ms: u64,
    /// Frames averaged into one reading.
    pub samples: u32,
    pub gain: GainCfg,
    /// Capture a zero offset before the first poll.
    pub tare: bool,
}

impl Default for PollCfg {
    fn default() -> Self {
        Self {
            count: 100,
            interval_ms: 5000,
            samples: 1,
            gain: GainCfg::A128,
            tare: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Hardware {
    /// Max time to wait for HX711 data-ready (DOUT low) per frame
    pub read_timeout_ms: u64,
}

impl Default for Hardware {
    fn default() -> Self {
        Self {
            read_timeout_ms: 500,
        }
    }
}

/// What to do when a poll fails.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnReadError {
    #[default]
    Abort,
    Skip,
    Retry,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ErrorsCfg {
    pub on_read_error: OnReadError,
    /// Extra attempts per poll when `on_read_error = "retry"`
    pub max_retries: u32,
}

impl Default for ErrorsCfg {
    fn default() -> Self {
        Self {
            on_read_error: OnReadError::Abort,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Never,
    Daily,
    Hourly,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    pub rotation: Rotation,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub pins: Pins,
    pub poll: PollCfg,
    pub hardware: Hardware,
    pub errors: ErrorsCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read, parse and validate a config file.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let cfg = load_toml(&text).wrap_err_with(|| format!("parse config {}", path.display()))?;
    cfg.validate()
        .wrap_err_with(|| format!("invalid configuration in {}", path.display()))?;
    Ok(cfg)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Pins
        if self.pins.clock == self.pins.data {
            eyre::bail!("pins.clock and pins.data must differ");
        }
        if self.pins.clock > MAX_PIN {
            eyre::bail!("pins.clock must be <= {MAX_PIN}");
        }
        if self.pins.data > MAX_PIN {
            eyre::bail!("pins.data must be <= {MAX_PIN}");
        }

        // Poll
        if self.poll.samples == 0 {
            eyre::bail!("poll.samples must be >= 1");
        }
        if self.poll.samples > MAX_SAMPLES {
            eyre::bail!("poll.samples must be <= {MAX_SAMPLES}");
        }
        if self.poll.interval_ms > DAY_MS {
            eyre::bail!("poll.interval_ms is unreasonably large (>24h)");
        }

        // Hardware
        if self.hardware.read_timeout_ms == 0 {
            eyre::bail!("hardware.read_timeout_ms must be >= 1");
        }

        // Errors
        if self.errors.on_read_error == OnReadError::Retry && self.errors.max_retries == 0 {
            eyre::bail!("errors.max_retries must be >= 1 when on_read_error = \"retry\"");
        }

        // Logging
        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            eyre::bail!("logging.file must not be empty when set");
        }

        Ok(())
    }
}
