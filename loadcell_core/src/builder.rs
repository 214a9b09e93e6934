//! Builder for `Poller`, so callers set only what differs from the defaults.

use loadcell_traits::clock::{Clock, MonotonicClock};
use loadcell_traits::{Driver, PinPair, StopSignal};

use crate::config::{PollSettings, ReadErrorPolicy};
use crate::error::{BuildError, Result};
use crate::poller::Poller;

/// Builder for `Poller`. Pins are required; everything else has a default.
#[derive(Debug)]
pub struct PollerBuilder<C: Clock = MonotonicClock> {
    pins: Option<PinPair>,
    settings: PollSettings,
    clock: C,
    stop: Option<StopSignal>,
}

impl Default for PollerBuilder<MonotonicClock> {
    fn default() -> Self {
        Self {
            pins: None,
            settings: PollSettings::default(),
            clock: MonotonicClock::new(),
            stop: None,
        }
    }
}

impl PollerBuilder<MonotonicClock> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> PollerBuilder<C> {
    pub fn pins(mut self, pins: PinPair) -> Self {
        self.pins = Some(pins);
        self
    }

    pub fn settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn samples(mut self, samples: u32) -> Self {
        self.settings.samples = samples;
        self
    }

    pub fn read_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.settings.read_timeout = timeout;
        self
    }

    pub fn policy(mut self, policy: ReadErrorPolicy) -> Self {
        self.settings.policy = policy;
        self
    }

    pub fn stop(mut self, stop: StopSignal) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Swap the clock (tests pass a `ManualClock`).
    pub fn with_clock<C2: Clock>(self, clock: C2) -> PollerBuilder<C2> {
        PollerBuilder {
            pins: self.pins,
            settings: self.settings,
            clock,
            stop: self.stop,
        }
    }

    /// Validate and open the driver.
    pub fn open<D: Driver>(self, driver: &D) -> Result<Poller<D::Scale, C>> {
        let pins = self.pins.ok_or(BuildError::MissingPins)?;
        if self.settings.read_timeout.is_zero() {
            return Err(BuildError::InvalidSettings("read_timeout must be > 0").into());
        }
        if let ReadErrorPolicy::Retry { max_retries: 0 } = self.settings.policy {
            return Err(BuildError::InvalidSettings("retry policy needs max_retries >= 1").into());
        }
        Poller::open(
            driver,
            pins,
            self.settings,
            self.clock,
            self.stop.unwrap_or_default(),
        )
    }
}
