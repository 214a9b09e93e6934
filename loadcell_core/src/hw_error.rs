//! Maps `Box<dyn Error>` from the driver boundary to a typed `ReadFault`.
//!
//! The traits in `loadcell_traits` use `Box<dyn Error + Send + Sync>` so any
//! driver can plug in; known hardware errors are downcast when the
//! `hardware-errors` feature is on, everything else goes through string
//! heuristics.

use crate::error::ReadFault;

/// Map a driver-boundary error to a typed `ReadFault`.
pub fn map_hw_error(e: &(dyn std::error::Error + 'static)) -> ReadFault {
    #[cfg(feature = "hardware-errors")]
    {
        use loadcell_hardware::error::HwError;
        if let Some(hw) = e.downcast_ref::<HwError>() {
            return match hw {
                HwError::Timeout | HwError::DataReadyTimeout => ReadFault::Timeout,
                HwError::InvalidFrame(why) => ReadFault::InvalidData((*why).to_string()),
                other => ReadFault::Hardware(other.to_string()),
            };
        }
    }

    let s = e.to_string();
    let lower = s.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        ReadFault::Timeout
    } else if lower.contains("invalid") {
        ReadFault::InvalidData(s)
    } else {
        ReadFault::Hardware(s)
    }
}
