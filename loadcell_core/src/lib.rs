#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Load-cell polling engine (hardware-agnostic).
//!
//! All hardware access goes through `loadcell_traits::Driver` and
//! `loadcell_traits::Scale`, so the poller runs the same against the HX711
//! GPIO backend, the simulator, or a test script.
//!
//! ## Architecture
//!
//! - **Poller**: open / read_once / tare / run (`poller` module)
//! - **Settings**: per-read timeout, averaging, failure policy (`config` module)
//! - **Output**: `ReadingSink` and the line-per-reading `LineSink` (`sink` module)
//! - **Errors**: `PollError` / `ReadFault`, driver error mapping (`error`, `hw_error`)
//!
//! Waiting between polls goes through `Clock::wait`, which blocks on the stop
//! signal instead of spinning and returns early when a stop is requested.

pub mod builder;
pub mod config;
pub mod conversions;
pub mod error;
pub mod hw_error;
pub mod mocks;
pub mod poller;
pub mod reading;
pub mod sink;
pub mod util;

pub use builder::PollerBuilder;
pub use config::{PollPlan, PollSettings, ReadErrorPolicy};
pub use error::{BuildError, PollError, ReadFault};
pub use poller::{Poller, PollerState};
pub use reading::{Reading, RunOutcome, RunSummary};
pub use sink::{LineSink, ReadingSink};
