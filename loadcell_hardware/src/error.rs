use thiserror::Error;

#[derive(Debug, Error)]
pub enum HwError {
    #[error("gpio error: {0}")]
    Gpio(String),
    #[error("gpio permission denied: {0}")]
    PermissionDenied(String),
    #[error("pin {0} is already in use")]
    PinInUse(u8),
    #[error("pin {0} is not available on this board")]
    PinUnavailable(u8),
    #[error("simulated open failure")]
    SimulatedOpen,
    #[error("scale timeout")]
    Timeout,
    #[error("hx711 data-ready timeout")]
    DataReadyTimeout,
    #[error("hx711 invalid frame: {0}")]
    InvalidFrame(&'static str),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HwError>;
