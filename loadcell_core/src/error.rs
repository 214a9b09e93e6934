use thiserror::Error;

/// Why a single acquisition failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadFault {
    #[error("timeout waiting for sensor")]
    Timeout,
    #[error("invalid reading: {0}")]
    InvalidData(String),
    #[error("hardware error: {0}")]
    Hardware(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PollError {
    /// The driver or pins are unusable; nothing was read.
    #[error("initialization failed: {0}")]
    Initialization(String),
    /// Poll number `poll` (1-based) failed.
    #[error("poll {poll} failed: {fault}")]
    Read { poll: u64, fault: ReadFault },
    #[error("output error: {0}")]
    Output(String),
    #[error("invalid state: {0}")]
    State(String),
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl PollError {
    /// The failing poll, for read errors.
    pub fn poll(&self) -> Option<u64> {
        match self {
            PollError::Read { poll, .. } => Some(*poll),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing pins")]
    MissingPins,
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
}

pub type Result<T> = std::result::Result<T, PollError>;
