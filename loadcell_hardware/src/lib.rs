//! HX711 drivers: frame protocol, Raspberry Pi GPIO backend (`hardware`
//! feature) and a simulated backend for development hosts.
pub mod error;
pub mod frame;
pub mod sim;
pub mod util;

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub mod hx711;

pub use error::HwError;
pub use frame::Gain;
pub use sim::{SimulatedDriver, SimulatedScale};

#[cfg(all(feature = "hardware", target_os = "linux"))]
pub use hx711::{HardwareDriver, HardwareScale};
