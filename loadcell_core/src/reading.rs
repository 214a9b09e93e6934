//! Poll output types.

/// One decoded sample produced by a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// 1-based poll index this reading came from.
    pub seq: u64,
    /// Averaged, tare-adjusted ADC counts.
    pub value: i32,
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All requested polls were made.
    Completed,
    /// The stop signal fired first.
    Stopped,
}

/// Completion signal of `Poller::run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub polls: u64,
    pub emitted: u64,
    pub skipped: u64,
    pub retries: u64,
    pub outcome: RunOutcome,
}
