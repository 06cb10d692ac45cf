//! In-memory canvas recorder
//!
//! Records the drawing operations a renderer emits instead of rasterizing
//! them, so screens can be asserted against on the host without display
//! hardware.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::{String, Vec};

use crate::canvas::{Canvas, CanvasError, TextStyle};

/// Maximum recorded operations per frame (the grid emits ~90)
pub const MAX_OPS: usize = 192;

/// Maximum recorded characters per text draw
pub const MAX_TEXT_LEN: usize = 24;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        color: Rgb565,
    },
    FillRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    },
    DrawRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    },
    Text {
        x: i32,
        y: i32,
        text: String<MAX_TEXT_LEN>,
        style: TextStyle,
    },
    Flush,
}

/// Canvas backend that records operations for inspection
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp, MAX_OPS>,
}

impl RecordingCanvas {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, op: DrawOp) -> Result<(), CanvasError> {
        self.ops.push(op).map_err(|_| CanvasError::BufferOverflow)
    }

    /// All recorded text draws as (text, style) pairs
    pub fn texts(&self) -> impl Iterator<Item = (&str, &TextStyle)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, style, .. } => Some((text.as_str(), style)),
            _ => None,
        })
    }

    /// Foreground color of the first text draw containing `needle`
    pub fn text_color(&self, needle: &str) -> Option<Rgb565> {
        self.texts()
            .find(|(text, _)| text.contains(needle))
            .map(|(_, style)| style.fg)
    }

    /// Whether any text draw contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|(text, _)| text.contains(needle))
    }

    /// Fill colors of all recorded `FillRect` operations, in draw order
    pub fn fill_colors(&self) -> impl Iterator<Item = Rgb565> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillRect { color, .. } => Some(*color),
            _ => None,
        })
    }

    /// Whether the frame was flushed
    pub fn flushed(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Flush))
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Rgb565) -> Result<(), CanvasError> {
        self.record(DrawOp::Clear { color })
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    ) -> Result<(), CanvasError> {
        self.record(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn draw_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb565,
    ) -> Result<(), CanvasError> {
        self.record(DrawOp::DrawRect {
            x,
            y,
            width,
            height,
            color,
        })
    }

    fn draw_text(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        style: TextStyle,
    ) -> Result<(), CanvasError> {
        let mut recorded = String::new();
        // Over-long strings are truncated in the record; the real panel
        // clips them at the bezel instead
        let take = text.len().min(MAX_TEXT_LEN);
        let _ = recorded.push_str(&text[..take]);
        self.record(DrawOp::Text {
            x,
            y,
            text: recorded,
            style,
        })
    }

    fn flush(&mut self) -> Result<(), CanvasError> {
        self.record(DrawOp::Flush)
    }
}
