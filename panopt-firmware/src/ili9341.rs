//! ILI9341 TFT Panel Driver
//!
//! Minimal SPI driver for the 320x240 ILI9341 panel: init sequence for the
//! rotated/inverted module this controller ships in, and a full-frame
//! flush from the back buffer. Drawing happens entirely in RAM; the panel
//! only ever sees complete frames.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// Panel dimensions after rotation
const WIDTH: u16 = 320;
const HEIGHT: u16 = 240;

/// ILI9341 commands
#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const PASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const PIXFMT: u8 = 0x3A;
}

/// MADCTL for landscape with flipped scan order and BGR panel wiring
/// (MY | MX | MV | BGR)
const MADCTL_LANDSCAPE_FLIPPED: u8 = 0xE8;

/// 16 bits per pixel
const PIXFMT_16BPP: u8 = 0x55;

/// ILI9341 panel driver
///
/// The panel is the only device on its SPI bus; chip select is tied low
/// by the board setup.
pub struct Ili9341<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
}

impl<SPI, DC, RST> Ili9341<SPI, DC, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new driver
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Initialize the panel
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), SPI::Error> {
        // Hardware reset
        let _ = self.rst.set_low();
        delay.delay_ms(10);
        let _ = self.rst.set_high();
        delay.delay_ms(120);

        self.command(cmd::SWRESET, &[])?;
        delay.delay_ms(150);

        self.command(cmd::PIXFMT, &[PIXFMT_16BPP])?;
        self.command(cmd::MADCTL, &[MADCTL_LANDSCAPE_FLIPPED])?;
        // This module's panel ships with inverted polarity
        self.command(cmd::INVON, &[])?;

        self.command(cmd::SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(cmd::DISPON, &[])?;

        Ok(())
    }

    /// Send a command with optional parameter bytes
    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), SPI::Error> {
        let _ = self.dc.set_low();
        self.spi.write(&[command])?;
        if !params.is_empty() {
            let _ = self.dc.set_high();
            self.spi.write(params)?;
        }
        Ok(())
    }

    /// Set the drawing window, inclusive corners
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), SPI::Error> {
        let [x0h, x0l] = x0.to_be_bytes();
        let [x1h, x1l] = x1.to_be_bytes();
        let [y0h, y0l] = y0.to_be_bytes();
        let [y1h, y1l] = y1.to_be_bytes();

        self.command(cmd::CASET, &[x0h, x0l, x1h, x1l])?;
        self.command(cmd::PASET, &[y0h, y0l, y1h, y1l])
    }

    /// Push one full frame of RGB565 pixels, row-major
    ///
    /// The panel latches data per scanline, so a frame written in one
    /// burst presents without tearing artifacts at this refresh cadence.
    pub fn flush_frame(&mut self, pixels: &[u16]) -> Result<(), SPI::Error> {
        self.set_window(0, 0, WIDTH - 1, HEIGHT - 1)?;
        self.command(cmd::RAMWR, &[])?;

        let _ = self.dc.set_high();
        let mut row = [0u8; WIDTH as usize * 2];
        for chunk in pixels.chunks(WIDTH as usize) {
            for (i, &pixel) in chunk.iter().enumerate() {
                let [hi, lo] = pixel.to_be_bytes();
                row[2 * i] = hi;
                row[2 * i + 1] = lo;
            }
            self.spi.write(&row[..chunk.len() * 2])?;
        }

        Ok(())
    }

    /// Turn the display on/off
    #[allow(dead_code)]
    pub fn set_display_on(&mut self, on: bool) -> Result<(), SPI::Error> {
        if on {
            self.command(cmd::DISPON, &[])
        } else {
            self.command(cmd::DISPOFF, &[])
        }
    }
}
