use std::time::Duration;

use loadcell_traits::{Driver, DriverError, PinPair, Scale};
use rppal::gpio::{Gpio, InputPin, OutputPin};
use tracing::{debug, info};

use crate::error::{HwError, Result};
use crate::frame::{FrameLines, Gain, read_frame};

/// Sleep step while waiting for DOUT to drop.
const DATA_READY_POLL: Duration = Duration::from_micros(200);

fn map_gpio_error(e: rppal::gpio::Error) -> HwError {
    match e {
        rppal::gpio::Error::PinUsed(pin) => HwError::PinInUse(pin),
        rppal::gpio::Error::PinNotAvailable(pin) => HwError::PinUnavailable(pin),
        rppal::gpio::Error::PermissionDenied(path) => HwError::PermissionDenied(path),
        other => HwError::Gpio(other.to_string()),
    }
}

struct RppalLines {
    dt: InputPin,
    sck: OutputPin,
}

impl FrameLines for RppalLines {
    #[inline]
    fn data_is_high(&mut self) -> bool {
        self.dt.is_high()
    }

    #[inline]
    fn clock_high(&mut self) {
        self.sck.set_high();
        settle();
    }

    #[inline]
    fn clock_low(&mut self) {
        self.sck.set_low();
        settle();
    }
}

/// PD_SCK must stay high for less than 60 µs or the chip powers down, so the
/// pulse width is a handful of cycles rather than a sleep.
#[inline(always)]
fn settle() {
    std::hint::spin_loop();
}

pub struct Hx711 {
    lines: RppalLines,
    gain: Gain,
}

impl Hx711 {
    pub fn new(dt_pin: InputPin, mut sck_pin: OutputPin, gain: Gain) -> Self {
        sck_pin.set_low(); // clock idle low
        Self {
            lines: RppalLines {
                dt: dt_pin,
                sck: sck_pin,
            },
            gain,
        }
    }

    pub fn read_with_timeout(&mut self, timeout: Duration) -> Result<i32> {
        read_frame(&mut self.lines, self.gain, timeout, DATA_READY_POLL)
    }
}

/// Opens HX711 chips on the Raspberry Pi GPIO header.
#[derive(Debug, Clone, Copy, Default)]
pub struct HardwareDriver {
    gain: Gain,
}

impl HardwareDriver {
    pub fn new(gain: Gain) -> Self {
        Self { gain }
    }
}

impl Driver for HardwareDriver {
    type Scale = HardwareScale;

    fn open(&self, pins: PinPair) -> std::result::Result<Self::Scale, DriverError> {
        let scale = HardwareScale::open(pins, self.gain)?;
        Ok(scale)
    }
}

pub struct HardwareScale {
    hx711: Hx711,
}

impl HardwareScale {
    pub fn open(pins: PinPair, gain: Gain) -> Result<Self> {
        let gpio = Gpio::new().map_err(map_gpio_error)?;
        let dt = gpio.get(pins.data).map_err(map_gpio_error)?.into_input();
        let sck = gpio.get(pins.clock).map_err(map_gpio_error)?.into_output();
        info!(%pins, %gain, "hx711 opened");
        Ok(Self {
            hx711: Hx711::new(dt, sck, gain),
        })
    }
}

impl Scale for HardwareScale {
    fn read(&mut self, timeout: Duration) -> std::result::Result<i32, DriverError> {
        match self.hx711.read_with_timeout(timeout) {
            Ok(raw) => {
                debug!(raw, "hx711 sample");
                Ok(raw)
            }
            Err(e) => {
                tracing::error!("Scale read error: {}", e);
                Err(Box::new(e))
            }
        }
    }
}
