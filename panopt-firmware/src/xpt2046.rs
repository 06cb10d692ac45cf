//! XPT2046 Resistive Touch Controller Driver
//!
//! Reads pressure and position from the panel's touch overlay. A sample
//! is only reported when the measured pressure clears
//! [`PRESSURE_THRESHOLD`]; the input arbiter never sees ghost touches.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use panopt_core::TouchPoint;
use panopt_display::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Minimum pressure for a sample to count as a touch
pub const PRESSURE_THRESHOLD: u16 = 600;

/// Control bytes: 12-bit differential conversions
const CMD_READ_Y: u8 = 0x90;
const CMD_READ_Z1: u8 = 0xB0;
const CMD_READ_Z2: u8 = 0xC0;
const CMD_READ_X: u8 = 0xD0;

/// Raw ADC window of the touch overlay (panel corners)
const RAW_MIN: u16 = 200;
const RAW_MAX: u16 = 3900;

/// XPT2046 driver
pub struct Xpt2046<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> Xpt2046<SPI, CS>
where
    SPI: SpiBus<u8>,
    CS: OutputPin,
{
    /// Create a new driver
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self { spi, cs }
    }

    /// Sample the touch overlay once
    ///
    /// Returns the touch point in display pixel space, or None when
    /// nothing presses hard enough.
    pub fn read_touch(&mut self) -> Result<Option<TouchPoint>, SPI::Error> {
        let _ = self.cs.set_low();
        let result = self.sample();
        let _ = self.cs.set_high();
        result
    }

    fn sample(&mut self) -> Result<Option<TouchPoint>, SPI::Error> {
        let z1 = self.read_channel(CMD_READ_Z1)?;
        let z2 = self.read_channel(CMD_READ_Z2)?;
        let pressure = (z1 as i32 + 4095 - z2 as i32).max(0) as u16;
        if pressure < PRESSURE_THRESHOLD {
            return Ok(None);
        }

        // Two acquisitions per axis to let the panel settle
        let raw_x = (self.read_channel(CMD_READ_X)? + self.read_channel(CMD_READ_X)?) / 2;
        let raw_y = (self.read_channel(CMD_READ_Y)? + self.read_channel(CMD_READ_Y)?) / 2;

        // The overlay is wired to the unrotated panel: its X axis runs
        // along the short screen edge. Map into the landscape frame.
        let x = scale(raw_y, SCREEN_WIDTH as u16);
        let y = SCREEN_HEIGHT as u16 - 1 - scale(raw_x, SCREEN_HEIGHT as u16);

        Ok(Some(TouchPoint { x, y }))
    }

    /// One 12-bit conversion
    fn read_channel(&mut self, command: u8) -> Result<u16, SPI::Error> {
        let tx = [command, 0x00, 0x00];
        let mut rx = [0u8; 3];
        self.spi.transfer(&mut rx, &tx)?;
        Ok((((rx[1] as u16) << 8) | rx[2] as u16) >> 3)
    }
}

/// Map a raw ADC reading into 0..range screen pixels
fn scale(raw: u16, range: u16) -> u16 {
    let clamped = raw.clamp(RAW_MIN, RAW_MAX) - RAW_MIN;
    let scaled = clamped as u32 * range as u32 / (RAW_MAX - RAW_MIN) as u32;
    (scaled as u16).min(range - 1)
}
