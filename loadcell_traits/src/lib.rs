pub mod clock;
pub mod stop;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use stop::StopSignal;

/// Error type crossing the driver boundary.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// An opened load-cell ADC that yields one decoded frame per call.
pub trait Scale {
    fn read(&mut self, timeout: std::time::Duration) -> Result<i32, DriverError>;
}

impl<S: Scale + ?Sized> Scale for Box<S> {
    fn read(&mut self, timeout: std::time::Duration) -> Result<i32, DriverError> {
        (**self).read(timeout)
    }
}

/// Clock (PD_SCK) and data (DOUT) pin identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinPair {
    pub clock: u8,
    pub data: u8,
}

impl PinPair {
    pub const fn new(clock: u8, data: u8) -> Self {
        Self { clock, data }
    }
}

impl std::fmt::Display for PinPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "clock={} data={}", self.clock, self.data)
    }
}

/// Capability that binds a pin pair to a `Scale`.
///
/// Implementations must refuse to open pins that are already held by a live
/// handle; dropping the handle releases them.
pub trait Driver {
    type Scale: Scale;

    fn open(&self, pins: PinPair) -> Result<Self::Scale, DriverError>;
}
