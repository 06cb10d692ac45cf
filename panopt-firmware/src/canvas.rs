//! Full-frame back buffer canvas
//!
//! All drawing lands in a RAM frame of RGB565 pixels; [`Canvas::flush`]
//! pushes the whole frame to the panel in one burst so a repaint never
//! shows half-drawn state. Text is rasterized with `embedded-graphics`
//! mono fonts through the [`DrawTarget`] implementation.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Point, Size};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable;
use embedded_graphics::Pixel;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use panopt_display::{
    Canvas, CanvasError, FontSize, TextAnchor, TextStyle, SCREEN_HEIGHT, SCREEN_WIDTH,
};

use crate::ili9341::Ili9341;

/// Pixels per frame
pub const FRAME_PIXELS: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

/// RAM frame of raw RGB565 pixels, row-major
///
/// The buffer is statically allocated by the caller; at two bytes per
/// pixel the frame takes 150 KB of the RP2040's 264 KB SRAM.
pub struct FrameCanvas {
    buffer: &'static mut [u16; FRAME_PIXELS],
}

impl FrameCanvas {
    /// Wrap a statically allocated frame buffer
    pub fn new(buffer: &'static mut [u16; FRAME_PIXELS]) -> Self {
        Self { buffer }
    }

    /// The raw frame, for flushing to the panel
    pub fn pixels(&self) -> &[u16; FRAME_PIXELS] {
        self.buffer
    }

    fn set_pixel(&mut self, x: i32, y: i32, raw: u16) {
        if (0..SCREEN_WIDTH as i32).contains(&x) && (0..SCREEN_HEIGHT as i32).contains(&y) {
            self.buffer[y as usize * SCREEN_WIDTH as usize + x as usize] = raw;
        }
    }

    fn fill(&mut self, color: Rgb565) {
        self.buffer.fill(color.into_storage());
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb565) {
        let raw = color.into_storage();
        for py in y..y + height as i32 {
            for px in x..x + width as i32 {
                self.set_pixel(px, py, raw);
            }
        }
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb565) {
        let raw = color.into_storage();
        let x1 = x + width as i32 - 1;
        let y1 = y + height as i32 - 1;
        for px in x..=x1 {
            self.set_pixel(px, y, raw);
            self.set_pixel(px, y1, raw);
        }
        for py in y..=y1 {
            self.set_pixel(x, py, raw);
            self.set_pixel(x1, py, raw);
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: TextStyle) {
        let character_style = MonoTextStyleBuilder::new()
            .font(font(style.font))
            .text_color(style.fg)
            .background_color(style.bg)
            .build();

        let (alignment, baseline) = match style.anchor {
            TextAnchor::TopLeft => (Alignment::Left, Baseline::Top),
            TextAnchor::TopRight => (Alignment::Right, Baseline::Top),
            TextAnchor::Center => (Alignment::Center, Baseline::Middle),
        };
        let text_style = TextStyleBuilder::new()
            .alignment(alignment)
            .baseline(baseline)
            .build();

        // Drawing into RAM cannot fail
        let _ = Text::with_text_style(text, Point::new(x, y), character_style, text_style)
            .draw(self);
    }
}

/// Map the abstract font sizes onto mono fonts
fn font(size: FontSize) -> &'static MonoFont<'static> {
    match size {
        FontSize::Small => &FONT_6X10,
        FontSize::Medium => &FONT_9X15,
        FontSize::Large => &FONT_10X20,
    }
}

impl OriginDimensions for FrameCanvas {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for FrameCanvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into_storage());
        }
        Ok(())
    }
}

/// The back buffer paired with its panel
pub struct PanelCanvas<SPI, DC, RST> {
    frame: FrameCanvas,
    panel: Ili9341<SPI, DC, RST>,
}

impl<SPI, DC, RST> PanelCanvas<SPI, DC, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Pair a frame buffer with a panel driver
    pub fn new(frame: FrameCanvas, panel: Ili9341<SPI, DC, RST>) -> Self {
        Self { frame, panel }
    }

    /// Initialize the panel hardware
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CanvasError> {
        self.panel.init(delay).map_err(|_| CanvasError::Communication)
    }
}

impl<SPI, DC, RST> Canvas for PanelCanvas<SPI, DC, RST>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    RST: OutputPin,
{
    fn clear(&mut self, color: Rgb565) -> Result<(), CanvasError> {
        self.frame.fill(color);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    ) -> Result<(), CanvasError> {
        self.frame.fill_rect(x, y, width, height, color);
        Ok(())
    }

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    ) -> Result<(), CanvasError> {
        self.frame.draw_rect(x, y, width, height, color);
        Ok(())
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), CanvasError> {
        self.frame.draw_text(x, y, text, style);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), CanvasError> {
        self.panel
            .flush_frame(self.frame.pixels())
            .map_err(|_| CanvasError::Communication)
    }
}
