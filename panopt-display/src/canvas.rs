//! Canvas trait
//!
//! Defines the drawing interface between the layout renderers and the
//! display backend: filled rectangles, rectangle outlines, and
//! baseline-anchored text at a small set of font sizes, each text draw
//! carrying a foreground and background color for opaque rendering.

use embedded_graphics::pixelcolor::Rgb565;

/// Panel width in logical pixels
pub const SCREEN_WIDTH: u32 = 320;

/// Panel height in logical pixels
pub const SCREEN_HEIGHT: u32 = 240;

/// Canvas backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Coordinates or dimensions outside the drawable area
    OutOfBounds,
    /// Communication error with the display hardware
    Communication,
    /// Backend ran out of buffer space
    BufferOverflow,
}

/// Discrete font sizes available to the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    /// Fine print: grid percentages, readout rows
    Small,
    /// Row labels, values, titles
    Medium,
    /// Splash lettering
    Large,
}

/// How the (x, y) of a text draw anchors the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// (x, y) is the top-left corner
    TopLeft,
    /// (x, y) is the top-right corner
    TopRight,
    /// (x, y) is the center of the string
    Center,
}

/// Complete styling for one text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontSize,
    pub fg: Rgb565,
    /// Background painted behind the glyphs (no alpha blending)
    pub bg: Rgb565,
    pub anchor: TextAnchor,
}

impl TextStyle {
    /// Create a text style
    pub const fn new(font: FontSize, fg: Rgb565, bg: Rgb565, anchor: TextAnchor) -> Self {
        Self {
            font,
            fg,
            bg,
            anchor,
        }
    }
}

/// Drawing surface for the layout renderers
///
/// Backends are expected to buffer draws and present them atomically on
/// [`flush`](Canvas::flush) so a full repaint never tears.
pub trait Canvas {
    /// Fill the entire surface with one color
    fn clear(&mut self, color: Rgb565) -> Result<(), CanvasError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    ) -> Result<(), CanvasError>;

    /// Draw a one-pixel rectangle outline
    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    ) -> Result<(), CanvasError>;

    /// Draw an anchored text string
    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: TextStyle)
        -> Result<(), CanvasError>;

    /// Present everything drawn since the last flush
    fn flush(&mut self) -> Result<(), CanvasError>;

    /// Surface dimensions in pixels (width, height)
    fn dimensions(&self) -> (u32, u32) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}
