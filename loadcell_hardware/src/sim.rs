//! Simulated HX711 for hosts without the chip.
//!
//! Pins are claimed in a process-wide registry on open and released when the
//! scale is dropped, so opening the same pins twice without teardown fails
//! the same way a GPIO chip would.
use std::collections::BTreeSet;
use std::sync::Mutex;
use std::time::Duration;

use loadcell_traits::{Driver, DriverError, PinPair, Scale};
use tracing::{debug, trace};

use crate::error::HwError;

static CLAIMED: Mutex<BTreeSet<u8>> = Mutex::new(BTreeSet::new());

fn claim(pins: PinPair) -> Result<(), HwError> {
    let mut claimed = CLAIMED
        .lock()
        .map_err(|_| HwError::Gpio("pin registry poisoned".to_string()))?;
    for pin in [pins.clock, pins.data] {
        if claimed.contains(&pin) {
            return Err(HwError::PinInUse(pin));
        }
    }
    claimed.insert(pins.clock);
    claimed.insert(pins.data);
    Ok(())
}

fn release(pins: PinPair) {
    if let Ok(mut claimed) = CLAIMED.lock() {
        claimed.remove(&pins.clock);
        claimed.remove(&pins.data);
    }
}

/// Driver that hands out `SimulatedScale`s replaying a fixed script.
#[derive(Debug, Clone, Default)]
pub struct SimulatedDriver {
    values: Vec<i32>,
    fail_at: Option<u64>,
    fail_open: bool,
}

impl SimulatedDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values returned on successive reads; the last one repeats. Empty reads 0.
    pub fn with_values(mut self, values: impl Into<Vec<i32>>) -> Self {
        self.values = values.into();
        self
    }

    /// Make the n-th read (1-based) fail with a data-ready timeout.
    pub fn fail_at(mut self, call: u64) -> Self {
        self.fail_at = Some(call);
        self
    }

    /// Make `open` fail as if the GPIO chip were unavailable.
    pub fn fail_open(mut self, fail: bool) -> Self {
        self.fail_open = fail;
        self
    }
}

impl Driver for SimulatedDriver {
    type Scale = SimulatedScale;

    fn open(&self, pins: PinPair) -> Result<Self::Scale, DriverError> {
        if self.fail_open {
            return Err(Box::new(HwError::SimulatedOpen));
        }
        claim(pins)?;
        debug!(%pins, "simulated hx711 opened");
        Ok(SimulatedScale {
            pins,
            values: self.values.clone(),
            idx: 0,
            calls: 0,
            fail_at: self.fail_at,
        })
    }
}

/// Simulated scale implementation
#[derive(Debug)]
pub struct SimulatedScale {
    pins: PinPair,
    values: Vec<i32>,
    idx: usize,
    calls: u64,
    fail_at: Option<u64>,
}

impl SimulatedScale {
    /// Reads attempted so far, failed ones included.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Scale for SimulatedScale {
    fn read(&mut self, _timeout: Duration) -> Result<i32, DriverError> {
        self.calls += 1;
        if self.fail_at == Some(self.calls) {
            return Err(Box::new(HwError::DataReadyTimeout));
        }
        let v = match self.values.get(self.idx) {
            Some(v) => {
                self.idx += 1;
                *v
            }
            None => self.values.last().copied().unwrap_or(0),
        };
        trace!(raw = v, call = self.calls, "simulated hx711 read");
        Ok(v)
    }
}

impl Drop for SimulatedScale {
    fn drop(&mut self) {
        release(self.pins);
    }
}
