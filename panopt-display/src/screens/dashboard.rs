//! Dashboard layout
//!
//! Seven labeled rows of headline values with warning-colored thresholds,
//! plus the connection indicator at the bottom.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;
use panopt_core::Snapshot;

use super::format_value;
use crate::canvas::{Canvas, CanvasError, FontSize, TextAnchor, TextStyle, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::theme::{
    status_color, value_color, COLOR_BG, COLOR_BRIGHT, COLOR_DIM, COLOR_TEXT, WARN_CPU_LOAD,
    WARN_DISK_PERCENT, WARN_GPU_LOAD, WARN_RAM_PERCENT, WARN_SWAP_PERCENT,
};

const TITLE_Y: i32 = 8;
const ROW_START_Y: i32 = 50;
const ROW_STEP: i32 = 22;
const LABEL_X: i32 = 10;
const VALUE_X: i32 = 310;

/// Render the dashboard
pub fn draw<C: Canvas>(canvas: &mut C, snapshot: &Snapshot, connected: bool) -> Result<(), CanvasError> {
    canvas.clear(COLOR_BG)?;

    canvas.draw_text(
        SCREEN_WIDTH as i32 / 2,
        TITLE_Y,
        "SYSTEM MONITOR",
        TextStyle::new(FontSize::Medium, COLOR_BRIGHT, COLOR_BG, TextAnchor::Center),
    )?;

    let mut y = ROW_START_Y;

    let value: String<20> = format_value(format_args!(
        "{}% {}C",
        snapshot.cpu_load as i32, snapshot.cpu_temp as i32
    ));
    row(canvas, y, "CPU", &value, value_color(snapshot.cpu_load, WARN_CPU_LOAD))?;
    y += ROW_STEP;

    let value: String<20> = format_value(format_args!(
        "{}% {}C",
        snapshot.gpu_load, snapshot.gpu_temp
    ));
    row(
        canvas,
        y,
        "GPU",
        &value,
        value_color(snapshot.gpu_load as f32, WARN_GPU_LOAD),
    )?;
    y += ROW_STEP;

    let value: String<20> = format_value(format_args!("{}W", snapshot.gpu_pwr as i32));
    row(canvas, y, "PWR", &value, COLOR_TEXT)?;
    y += ROW_STEP;

    let value: String<20> = format_value(format_args!(
        "{:.1}/{:.1}GB",
        snapshot.vram_used / 1024.0,
        snapshot.vram_total / 1024.0
    ));
    row(canvas, y, "VRAM", &value, COLOR_TEXT)?;
    y += ROW_STEP;

    let value: String<20> = format_value(format_args!(
        "{:.1}/{:.1}GB",
        snapshot.ram_used, snapshot.ram_total
    ));
    row(
        canvas,
        y,
        "RAM",
        &value,
        value_color(snapshot.ram_percent, WARN_RAM_PERCENT),
    )?;
    y += ROW_STEP;

    let value: String<20> = format_value(format_args!("{}%", snapshot.swap_percent as i32));
    row(
        canvas,
        y,
        "SWAP",
        &value,
        value_color(snapshot.swap_percent, WARN_SWAP_PERCENT),
    )?;
    y += ROW_STEP;

    let value: String<20> = format_value(format_args!("{}%", snapshot.disk_percent as i32));
    row(
        canvas,
        y,
        "DISK",
        &value,
        value_color(snapshot.disk_percent, WARN_DISK_PERCENT),
    )?;

    canvas.draw_text(
        SCREEN_WIDTH as i32 / 2,
        SCREEN_HEIGHT as i32 - 8,
        if connected { "ONLINE" } else { "OFFLINE" },
        TextStyle::new(
            FontSize::Medium,
            status_color(connected),
            COLOR_BG,
            TextAnchor::Center,
        ),
    )?;

    canvas.flush()
}

/// One label/value row: dim label on the left, colored value on the right
fn row<C: Canvas>(
    canvas: &mut C,
    y: i32,
    label: &str,
    value: &str,
    color: Rgb565,
) -> Result<(), CanvasError> {
    canvas.draw_text(
        LABEL_X,
        y,
        label,
        TextStyle::new(FontSize::Medium, COLOR_DIM, COLOR_BG, TextAnchor::TopLeft),
    )?;
    canvas.draw_text(
        VALUE_X,
        y,
        value,
        TextStyle::new(FontSize::Medium, color, COLOR_BG, TextAnchor::TopRight),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecordingCanvas;
    use crate::theme::COLOR_WARN;
    use panopt_core::Snapshot;
    use panopt_protocol::decode_line;

    /// cpu.load=85, ram.p=90, disk.p=95 hot; swap/gpu cold
    fn hot_snapshot() -> Snapshot {
        let frame = decode_line(
            br#"{"cpu":{"load":85.0,"temp":72.0,"freq":4500.0,"pwr":110.0,"fan":1500,"cores":[85.0]},"ram":{"used":28.1,"total":31.2,"p":90.0},"swap":{"used":0.1,"p":2.0},"gpu":{"gpu_load":15,"vram_used":1638.4,"vram_total":8192.0,"gpu_temp":40,"gpu_pwr":35.0,"gpu_fan":25},"disk":{"p":95.0},"net":{"sent":1.0,"recv":2.0}}"#,
        )
        .unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.apply(&frame);
        snapshot
    }

    #[test]
    fn test_warning_rows_use_warning_color() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &hot_snapshot(), true).unwrap();

        // CPU 85 > 80, RAM 90 > 85, DISK 95 > 90
        assert_eq!(canvas.text_color("85% 72C"), Some(COLOR_WARN));
        assert_eq!(canvas.text_color("28.1/31.2GB"), Some(COLOR_WARN));
        assert_eq!(canvas.text_color("95%"), Some(COLOR_WARN));
    }

    #[test]
    fn test_cool_rows_use_normal_color() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &hot_snapshot(), true).unwrap();

        // GPU 15, PWR, VRAM, SWAP 2 all below thresholds
        assert_eq!(canvas.text_color("15% 40C"), Some(COLOR_TEXT));
        assert_eq!(canvas.text_color("35W"), Some(COLOR_TEXT));
        assert_eq!(canvas.text_color("1.6/8.0GB"), Some(COLOR_TEXT));
        assert_eq!(canvas.text_color("2%"), Some(COLOR_TEXT));
    }

    #[test]
    fn test_status_indicator() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &hot_snapshot(), true).unwrap();
        assert_eq!(canvas.text_color("ONLINE"), Some(COLOR_TEXT));

        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &hot_snapshot(), false).unwrap();
        assert_eq!(canvas.text_color("OFFLINE"), Some(COLOR_WARN));
        assert!(canvas.flushed());
    }

    #[test]
    fn test_all_rows_present_on_empty_snapshot() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &Snapshot::new(), false).unwrap();

        for label in ["CPU", "GPU", "PWR", "VRAM", "RAM", "SWAP", "DISK"] {
            assert!(canvas.has_text(label), "missing row {}", label);
        }
    }
}
