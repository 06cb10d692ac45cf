//! Boot splash

use crate::canvas::{Canvas, CanvasError, FontSize, TextAnchor, TextStyle};
use crate::theme::{COLOR_BG, COLOR_BRIGHT, COLOR_TEXT};

/// Draw the fixed boot splash
pub fn draw<C: Canvas>(canvas: &mut C) -> Result<(), CanvasError> {
    let (width, height) = canvas.dimensions();
    let center_x = width as i32 / 2;
    let center_y = height as i32 / 2;

    canvas.clear(COLOR_BG)?;

    canvas.draw_text(
        center_x,
        center_y - 20,
        "PANOPT",
        TextStyle::new(FontSize::Large, COLOR_BRIGHT, COLOR_BG, TextAnchor::Center),
    )?;
    canvas.draw_text(
        center_x,
        center_y + 20,
        "HOST TELEMETRY",
        TextStyle::new(FontSize::Medium, COLOR_TEXT, COLOR_BG, TextAnchor::Center),
    )?;

    canvas.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecordingCanvas;

    #[test]
    fn test_splash_contents() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas).unwrap();

        assert!(canvas.has_text("PANOPT"));
        assert!(canvas.has_text("HOST TELEMETRY"));
        assert!(canvas.flushed());
    }
}
