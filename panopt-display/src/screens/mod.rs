//! Screen rendering
//!
//! Each screen is a pure function from `(Snapshot, connected)` to canvas
//! operations; nothing here mutates application state. Screens end with a
//! flush so a frame always presents atomically.

pub mod dashboard;
pub mod grid;
pub mod splash;

use heapless::String;
use panopt_core::{Layout, Snapshot};

use crate::canvas::{Canvas, CanvasError};

/// Render the selected layout
pub fn draw<C: Canvas>(
    canvas: &mut C,
    layout: Layout,
    snapshot: &Snapshot,
    connected: bool,
) -> Result<(), CanvasError> {
    match layout {
        Layout::Dashboard => dashboard::draw(canvas, snapshot, connected),
        Layout::Grid => grid::draw(canvas, snapshot, connected),
    }
}

/// Format a value string into a stack buffer
///
/// Overflow truncates; every caller sizes N generously for its field.
pub(crate) fn format_value<const N: usize>(args: core::fmt::Arguments<'_>) -> String<N> {
    use core::fmt::Write;
    let mut s = String::new();
    let _ = s.write_fmt(args);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecordingCanvas;

    #[test]
    fn test_dispatch_selects_layout() {
        let snapshot = Snapshot::new();

        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, Layout::Dashboard, &snapshot, true).unwrap();
        assert!(canvas.has_text("SYSTEM MONITOR"));

        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, Layout::Grid, &snapshot, true).unwrap();
        assert!(canvas.has_text("CORE GRID"));
    }
}
