//! Test and helper mocks for loadcell_core

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use loadcell_traits::{Driver, DriverError, PinPair, Scale};

use crate::reading::Reading;
use crate::sink::ReadingSink;

/// A scale that always errors on read.
pub struct NoopScale;

impl Scale for NoopScale {
    fn read(&mut self, _timeout: Duration) -> Result<i32, DriverError> {
        Err(Box::new(io::Error::other("noop scale")))
    }
}

/// Scale that replays a script of results; once exhausted it repeats the
/// last successful value (or 0).
#[derive(Debug, Default)]
pub struct ScriptedScale {
    script: VecDeque<Result<i32, String>>,
    last: i32,
    calls: u64,
}

impl ScriptedScale {
    pub fn new(script: impl IntoIterator<Item = Result<i32, String>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            last: 0,
            calls: 0,
        }
    }

    /// Only successful reads.
    pub fn values(values: impl IntoIterator<Item = i32>) -> Self {
        Self::new(values.into_iter().map(Ok))
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Scale for ScriptedScale {
    fn read(&mut self, _timeout: Duration) -> Result<i32, DriverError> {
        self.calls += 1;
        match self.script.pop_front() {
            Some(Ok(v)) => {
                self.last = v;
                Ok(v)
            }
            Some(Err(msg)) => Err(msg.into()),
            None => Ok(self.last),
        }
    }
}

/// Driver that hands out a clone of a prepared script, or fails to open.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDriver {
    script: Vec<Result<i32, String>>,
    open_error: Option<String>,
}

impl ScriptedDriver {
    pub fn new(script: impl IntoIterator<Item = Result<i32, String>>) -> Self {
        Self {
            script: script.into_iter().collect(),
            open_error: None,
        }
    }

    pub fn values(values: impl IntoIterator<Item = i32>) -> Self {
        Self::new(values.into_iter().map(Ok))
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            script: Vec::new(),
            open_error: Some(msg.to_string()),
        }
    }
}

impl Driver for ScriptedDriver {
    type Scale = ScriptedScale;

    fn open(&self, _pins: PinPair) -> Result<Self::Scale, DriverError> {
        if let Some(msg) = &self.open_error {
            return Err(msg.clone().into());
        }
        Ok(ScriptedScale::new(self.script.clone()))
    }
}

/// Sink that keeps every reading in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    pub readings: Vec<Reading>,
}

impl VecSink {
    pub fn values(&self) -> Vec<i32> {
        self.readings.iter().map(|r| r.value).collect()
    }
}

impl ReadingSink for VecSink {
    fn emit(&mut self, reading: &Reading) -> io::Result<()> {
        self.readings.push(*reading);
        Ok(())
    }
}

/// Sink that rejects every write.
pub struct BrokenSink;

impl ReadingSink for BrokenSink {
    fn emit(&mut self, _reading: &Reading) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }
}
