//! HX711 serial frame: 24 data bits MSB-first, then 1..=3 extra clock pulses
//! that select the gain/channel of the *next* conversion.
//!
//! Pin access goes through `FrameLines` so the sequencing can be exercised
//! without a GPIO chip.
use std::str::FromStr;
use std::time::Duration;

use tracing::trace;

use crate::error::{HwError, Result};
use crate::util::wait_for_data_ready;

/// Number of data bits in one conversion result.
pub const FRAME_BITS: u32 = 24;

const SIGN_BIT: u32 = 1 << (FRAME_BITS - 1);
const FRAME_MASK: u32 = (1 << FRAME_BITS) - 1;

/// Gain and input channel applied to the following conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gain {
    /// Channel A, gain 128.
    #[default]
    A128,
    /// Channel B, gain 32.
    B32,
    /// Channel A, gain 64.
    A64,
}

impl Gain {
    /// Extra PD_SCK pulses after the 24 data bits.
    #[inline]
    pub const fn pulses(self) -> u8 {
        match self {
            Gain::A128 => 1,
            Gain::B32 => 2,
            Gain::A64 => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Gain::A128 => "a128",
            Gain::B32 => "b32",
            Gain::A64 => "a64",
        }
    }
}

impl FromStr for Gain {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a128" | "128" => Ok(Gain::A128),
            "b32" | "32" => Ok(Gain::B32),
            "a64" | "64" => Ok(Gain::A64),
            other => Err(format!("unknown gain '{other}' (expected a128, b32 or a64)")),
        }
    }
}

impl std::fmt::Display for Gain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-wire access to the chip: DOUT as input, PD_SCK as output.
pub trait FrameLines {
    fn data_is_high(&mut self) -> bool;
    fn clock_high(&mut self);
    fn clock_low(&mut self);
}

/// Sign-extend a 24-bit two's-complement value.
#[inline]
pub const fn sign_extend_24(raw: u32) -> i32 {
    let raw = raw & FRAME_MASK;
    if raw & SIGN_BIT != 0 {
        (raw | !FRAME_MASK) as i32
    } else {
        raw as i32
    }
}

/// Clock out one frame. DOUT must already be low (conversion ready).
///
/// Two patterns are rejected as `InvalidFrame`:
/// - all 24 bits high, which is what a floating or stuck-high DOUT reads as;
/// - DOUT low after the gain pulses, where the chip should hold it high until
///   the next conversion (frame out of sync).
pub fn clock_out_frame<L: FrameLines>(lines: &mut L, gain: Gain) -> Result<i32> {
    let mut raw: u32 = 0;
    for _ in 0..FRAME_BITS {
        lines.clock_high();
        raw = (raw << 1) | u32::from(lines.data_is_high());
        lines.clock_low();
    }

    for _ in 0..gain.pulses() {
        lines.clock_high();
        lines.clock_low();
    }

    if raw == FRAME_MASK {
        return Err(HwError::InvalidFrame("all ones"));
    }
    if !lines.data_is_high() {
        return Err(HwError::InvalidFrame("DOUT low after gain pulses"));
    }

    let value = sign_extend_24(raw);
    trace!(raw, value, "hx711 frame");
    Ok(value)
}

/// Wait for data-ready, then clock out one frame.
pub fn read_frame<L: FrameLines>(
    lines: &mut L,
    gain: Gain,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<i32> {
    let waited = wait_for_data_ready(|| lines.data_is_high(), timeout, poll_interval)?;
    trace!(waited_us = waited.as_micros() as u64, "hx711 data ready");
    clock_out_frame(lines, gain)
}
