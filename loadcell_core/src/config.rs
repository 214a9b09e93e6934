//! Runtime settings for the poller (decoupled from the TOML schema).

use std::time::Duration;

/// Policy applied when a poll's acquisition fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadErrorPolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Log the failure, emit nothing for that poll, keep going.
    Skip,
    /// Re-attempt the acquisition up to `max_retries` more times, then abort.
    Retry { max_retries: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Data-ready deadline per frame.
    pub read_timeout: Duration,
    /// Frames averaged into one reading.
    pub samples: u32,
    pub policy: ReadErrorPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(500),
            samples: 1,
            policy: ReadErrorPolicy::Abort,
        }
    }
}

/// How many polls to make and how far apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    /// `None` polls until the stop signal fires.
    pub count: Option<u64>,
    pub interval: Duration,
}

impl Default for PollPlan {
    fn default() -> Self {
        Self {
            count: Some(100),
            interval: Duration::from_secs(5),
        }
    }
}
