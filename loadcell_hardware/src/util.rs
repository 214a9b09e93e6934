use std::time::{Duration, Instant};

use tracing::trace;

use crate::error::{HwError, Result};

/// Block until the HX711 pulls DOUT low (conversion ready) or `timeout`
/// elapses, checking the line every `poll_interval`.
///
/// The final sleep is clipped to the deadline, so a timeout is reported no
/// later than one check after it expires. Returns the time spent waiting.
pub fn wait_for_data_ready(
    mut data_is_high: impl FnMut() -> bool,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<Duration> {
    let started = Instant::now();
    let mut checks: u32 = 0;
    loop {
        checks = checks.saturating_add(1);
        if !data_is_high() {
            let waited = started.elapsed();
            trace!(checks, "dout low");
            return Ok(waited);
        }
        let Some(left) = timeout.checked_sub(started.elapsed()).filter(|d| !d.is_zero()) else {
            trace!(checks, "data-ready deadline passed");
            return Err(HwError::DataReadyTimeout);
        };
        std::thread::sleep(poll_interval.min(left));
    }
}
