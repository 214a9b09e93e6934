//! The sensor poller: open a driver, take readings, pace them, emit them.
//!
//! Lifecycle: `Poller::open` (Ready) → `read_once`/`run` (Reading ⇄ Waiting)
//! → Done once `run` returns. A finished poller refuses further work; open a
//! new one (after dropping this one, which releases the pins).
use std::time::Duration;

use loadcell_config::MAX_PIN;
use loadcell_traits::clock::{Clock, MonotonicClock};
use loadcell_traits::{Driver, PinPair, Scale, StopSignal};
use tracing::{debug, error, info, warn};

use crate::config::{PollSettings, ReadErrorPolicy};
use crate::error::{PollError, ReadFault, Result};
use crate::hw_error::map_hw_error;
use crate::reading::{Reading, RunOutcome, RunSummary};
use crate::sink::ReadingSink;
use crate::util::{div_round_nearest_i32, offset_sub_i32};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Ready,
    Reading,
    Waiting,
    Done,
}

pub struct Poller<S: Scale, C: Clock = MonotonicClock> {
    scale: S,
    pins: PinPair,
    settings: PollSettings,
    clock: C,
    stop: StopSignal,
    state: PollerState,
    polls: u64,
    offset: i32,
}

impl<S: Scale, C: Clock> core::fmt::Debug for Poller<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poller")
            .field("pins", &self.pins)
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("polls", &self.polls)
            .field("offset", &self.offset)
            .finish()
    }
}

fn check_pins(pins: PinPair) -> Result<()> {
    if pins.clock == pins.data {
        return Err(PollError::Initialization(format!(
            "clock and data pins must differ (both {})",
            pins.clock
        )));
    }
    for (name, pin) in [("clock", pins.clock), ("data", pins.data)] {
        if pin > MAX_PIN {
            return Err(PollError::Initialization(format!(
                "{name} pin {pin} is out of range (0..={MAX_PIN})"
            )));
        }
    }
    Ok(())
}

impl<S: Scale, C: Clock> Poller<S, C> {
    /// Bind to `pins` through `driver`. Fails with `PollError::Initialization`
    /// when the pins are invalid or the driver cannot open them.
    pub fn open<D>(
        driver: &D,
        pins: PinPair,
        settings: PollSettings,
        clock: C,
        stop: StopSignal,
    ) -> Result<Self>
    where
        D: Driver<Scale = S>,
    {
        check_pins(pins)?;
        if settings.samples == 0 {
            return Err(PollError::Initialization(
                "samples per reading must be >= 1".to_string(),
            ));
        }
        let scale = driver.open(pins).map_err(|e| {
            error!(%pins, error = %e, "driver open failed");
            PollError::Initialization(format!("open hx711 ({pins}): {e}"))
        })?;
        info!(%pins, samples = settings.samples, policy = ?settings.policy, "poller ready");
        Ok(Self {
            scale,
            pins,
            settings,
            clock,
            stop,
            state: PollerState::Ready,
            polls: 0,
            offset: 0,
        })
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn pins(&self) -> PinPair {
        self.pins
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    /// Current tare offset in raw counts.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// A handle that stops `run` at its next wait boundary.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state {
            PollerState::Ready => Ok(()),
            other => Err(PollError::State(format!(
                "poller is {other:?}; open a new one to poll again"
            ))),
        }
    }

    /// Average `samples` frames into one raw value.
    fn acquire(&mut self, samples: u32) -> std::result::Result<i32, ReadFault> {
        let mut sum: i64 = 0;
        for _ in 0..samples {
            let v = self
                .scale
                .read(self.settings.read_timeout)
                .map_err(|e| map_hw_error(e.as_ref()))?;
            sum += i64::from(v);
        }
        Ok(div_round_nearest_i32(sum, samples))
    }

    /// Capture the zero offset subtracted from later readings.
    pub fn tare(&mut self, samples: u32) -> Result<i32> {
        self.ensure_ready()?;
        if samples == 0 {
            return Err(PollError::State("tare needs at least one sample".to_string()));
        }
        self.state = PollerState::Reading;
        let res = self.acquire(samples);
        self.state = PollerState::Ready;
        let offset = res.map_err(|fault| PollError::Read { poll: 0, fault })?;
        self.offset = offset;
        info!(offset, samples, "tare captured");
        Ok(offset)
    }

    /// One acquisition cycle: the next poll, with no retry.
    pub fn read_once(&mut self) -> Result<Reading> {
        self.ensure_ready()?;
        self.state = PollerState::Reading;
        let res = self.poll_once();
        self.state = PollerState::Ready;
        res
    }

    fn poll_once(&mut self) -> Result<Reading> {
        self.polls += 1;
        self.attempt(self.polls)
    }

    fn attempt(&mut self, poll: u64) -> Result<Reading> {
        match self.acquire(self.settings.samples) {
            Ok(raw) => {
                let value = offset_sub_i32(raw, self.offset);
                debug!(poll, raw, value, "reading");
                Ok(Reading { seq: poll, value })
            }
            Err(fault) => Err(PollError::Read { poll, fault }),
        }
    }

    /// Poll with the configured policy. `Ok(None)` means the poll was skipped.
    fn poll_with_policy(&mut self, retries: &mut u64) -> Result<Option<Reading>> {
        let err = match self.poll_once() {
            Ok(r) => return Ok(Some(r)),
            Err(e) => e,
        };
        match self.settings.policy {
            ReadErrorPolicy::Abort => Err(err),
            ReadErrorPolicy::Skip => {
                warn!(error = %err, "skipping failed poll");
                Ok(None)
            }
            ReadErrorPolicy::Retry { max_retries } => {
                // Retries keep the poll number of the failed attempt.
                let poll = self.polls;
                let mut last = err;
                for attempt in 1..=max_retries {
                    *retries += 1;
                    warn!(poll, attempt, error = %last, "read failed, retrying");
                    match self.attempt(poll) {
                        Ok(r) => return Ok(Some(r)),
                        Err(e) => last = e,
                    }
                }
                Err(last)
            }
        }
    }

    /// Poll `count` times (`None`: until stopped), waiting `interval` between
    /// polls and emitting each reading to `sink` in order.
    ///
    /// The stop signal is honoured before every poll and during every wait.
    /// The poller is `Done` afterwards, whatever the outcome.
    pub fn run(
        &mut self,
        count: Option<u64>,
        interval: Duration,
        sink: &mut dyn ReadingSink,
    ) -> Result<RunSummary> {
        self.ensure_ready()?;
        info!(
            count = ?count,
            interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
            "polling started"
        );
        let res = self.run_inner(count, interval, sink);
        self.state = PollerState::Done;
        match &res {
            Ok(summary) => info!(
                polls = summary.polls,
                emitted = summary.emitted,
                skipped = summary.skipped,
                retries = summary.retries,
                outcome = ?summary.outcome,
                "polling finished"
            ),
            Err(e) => error!(error = %e, "polling aborted"),
        }
        res
    }

    fn run_inner(
        &mut self,
        count: Option<u64>,
        interval: Duration,
        sink: &mut dyn ReadingSink,
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            polls: 0,
            emitted: 0,
            skipped: 0,
            retries: 0,
            outcome: RunOutcome::Completed,
        };

        loop {
            if count.is_some_and(|n| summary.polls >= n) {
                return Ok(summary);
            }
            if self.stop.is_stopped() {
                summary.outcome = RunOutcome::Stopped;
                return Ok(summary);
            }

            self.state = PollerState::Reading;
            summary.polls += 1;
            match self.poll_with_policy(&mut summary.retries)? {
                Some(reading) => {
                    sink.emit(&reading)
                        .map_err(|e| PollError::Output(format!("poll {}: {e}", reading.seq)))?;
                    summary.emitted += 1;
                }
                None => summary.skipped += 1,
            }

            if count.is_some_and(|n| summary.polls >= n) {
                return Ok(summary);
            }
            self.state = PollerState::Waiting;
            if self.clock.wait(interval, &self.stop) {
                summary.outcome = RunOutcome::Stopped;
                return Ok(summary);
            }
        }
    }
}
