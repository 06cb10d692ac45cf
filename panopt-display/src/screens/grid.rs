//! Grid layout
//!
//! A 4x4 heat matrix of per-core load, four auxiliary heat tiles (GPU,
//! VRAM, RAM, swap), compact temperature/power/fan readouts and the
//! connection indicator.

use heapless::String;
use panopt_core::Snapshot;

use super::format_value;
use crate::canvas::{Canvas, CanvasError, FontSize, TextAnchor, TextStyle, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::theme::{heat_color, status_color, COLOR_BG, COLOR_BRIGHT, COLOR_DIM, COLOR_TEXT};

const TITLE_Y: i32 = 5;

const CELL_W: i32 = 35;
const CELL_H: i32 = 35;
const GRID_X: i32 = 40;
const GRID_Y: i32 = 30;
const GAP: i32 = 5;

const TILE_X: i32 = 220;
const TILE_W: i32 = 90;
const TILE_H: i32 = 35;

/// Render the grid
pub fn draw<C: Canvas>(canvas: &mut C, snapshot: &Snapshot, connected: bool) -> Result<(), CanvasError> {
    canvas.clear(COLOR_BG)?;

    canvas.draw_text(
        SCREEN_WIDTH as i32 / 2,
        TITLE_Y,
        "CORE GRID",
        TextStyle::new(FontSize::Medium, COLOR_BRIGHT, COLOR_BG, TextAnchor::Center),
    )?;

    // 4x4 per-core heat matrix; cells past the core count show zero load
    for row in 0..4 {
        for col in 0..4 {
            let index = row * 4 + col;
            let x = GRID_X + col as i32 * (CELL_W + GAP);
            let y = GRID_Y + row as i32 * (CELL_H + GAP);

            let load = snapshot.core_load(index);
            let color = heat_color(load);

            canvas.fill_rect(x, y, CELL_W as u32, CELL_H as u32, color)?;
            canvas.draw_rect(x, y, CELL_W as u32, CELL_H as u32, COLOR_BG)?;

            let label: String<4> = format_value(format_args!("{}", index));
            canvas.draw_text(
                x + CELL_W / 2,
                y + CELL_H / 2 - 5,
                &label,
                TextStyle::new(FontSize::Medium, COLOR_BG, color, TextAnchor::Center),
            )?;

            let percent: String<6> = format_value(format_args!("{}%", load as i32));
            canvas.draw_text(
                x + CELL_W / 2,
                y + CELL_H / 2 + 7,
                &percent,
                TextStyle::new(FontSize::Small, COLOR_BG, color, TextAnchor::Center),
            )?;
        }
    }

    // Auxiliary heat tiles on the right edge
    let tiles = [
        ("GPU", snapshot.gpu_load as f32),
        ("VRAM", snapshot.vram_percent()),
        ("RAM", snapshot.ram_percent),
        ("SWAP", snapshot.swap_percent),
    ];

    let mut tile_y = GRID_Y;
    for (label, percent) in tiles {
        let color = heat_color(percent);

        canvas.fill_rect(TILE_X, tile_y, TILE_W as u32, TILE_H as u32, color)?;
        canvas.draw_rect(TILE_X, tile_y, TILE_W as u32, TILE_H as u32, COLOR_BG)?;

        canvas.draw_text(
            TILE_X + TILE_W / 2,
            tile_y + 10,
            label,
            TextStyle::new(FontSize::Medium, COLOR_BG, color, TextAnchor::Center),
        )?;

        let value: String<6> = format_value(format_args!("{}%", percent as i32));
        canvas.draw_text(
            TILE_X + TILE_W / 2,
            tile_y + 24,
            &value,
            TextStyle::new(FontSize::Small, COLOR_BG, color, TextAnchor::Center),
        )?;

        tile_y += TILE_H + GAP;
    }

    // Compact CPU/GPU readouts under the matrix
    let info_y = GRID_Y + 4 * (CELL_H + GAP) + 5;
    readout(
        canvas,
        info_y,
        5,
        "CPU",
        snapshot.cpu_temp as i32,
        snapshot.cpu_pwr as i32,
        &format_value::<8>(format_args!("{}r", snapshot.cpu_fan)),
    )?;
    readout(
        canvas,
        info_y,
        130,
        "GPU",
        snapshot.gpu_temp as i32,
        snapshot.gpu_pwr as i32,
        &format_value::<8>(format_args!("{}%", snapshot.gpu_fan)),
    )?;

    canvas.draw_text(
        SCREEN_WIDTH as i32 / 2,
        SCREEN_HEIGHT as i32 - 5,
        if connected { "ONLINE" } else { "OFFLINE" },
        TextStyle::new(
            FontSize::Small,
            status_color(connected),
            COLOR_BG,
            TextAnchor::Center,
        ),
    )?;

    canvas.flush()
}

/// One temp/power/fan readout: dim label, bright values, dim fan
fn readout<C: Canvas>(
    canvas: &mut C,
    y: i32,
    x: i32,
    label: &str,
    temp_c: i32,
    power_w: i32,
    fan: &str,
) -> Result<(), CanvasError> {
    let dim = TextStyle::new(FontSize::Small, COLOR_DIM, COLOR_BG, TextAnchor::TopLeft);
    let text = TextStyle::new(FontSize::Small, COLOR_TEXT, COLOR_BG, TextAnchor::TopLeft);

    canvas.draw_text(x, y, label, dim)?;

    let temp: String<8> = format_value(format_args!("{}C", temp_c));
    canvas.draw_text(x + 22, y, &temp, text)?;

    let power: String<8> = format_value(format_args!("{}W", power_w));
    canvas.draw_text(x + 47, y, &power, text)?;

    canvas.draw_text(x + 74, y, fan, dim)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecordingCanvas;
    use crate::theme::{COLOR_IDLE, COLOR_WARN};
    use panopt_protocol::decode_line;

    fn five_core_snapshot() -> Snapshot {
        let frame = decode_line(
            br#"{"cpu":{"load":44.0,"temp":58.0,"freq":3600.0,"pwr":42.0,"fan":900,"cores":[5.0,25.0,45.0,65.0,85.0]},"ram":{"used":8.0,"total":16.0,"p":50.0},"swap":{"used":0.0,"p":0.0},"gpu":{"gpu_load":90,"vram_used":2048.0,"vram_total":8192.0,"gpu_temp":70,"gpu_pwr":180.0,"gpu_fan":65},"disk":{"p":40.0},"net":{"sent":0,"recv":0}}"#,
        )
        .unwrap();
        let mut snapshot = Snapshot::new();
        snapshot.apply(&frame);
        snapshot
    }

    #[test]
    fn test_cell_heat_colors_span_the_bands() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &five_core_snapshot(), true).unwrap();

        let fills: heapless::Vec<_, 32> = canvas.fill_colors().collect();
        // 16 matrix cells then 4 tiles
        assert_eq!(fills.len(), 20);

        assert_eq!(fills[0], COLOR_IDLE); // 5%
        assert_eq!(fills[1], COLOR_DIM); // 25%
        assert_eq!(fills[2], COLOR_TEXT); // 45%
        assert_eq!(fills[3], COLOR_BRIGHT); // 65%
        assert_eq!(fills[4], COLOR_WARN); // 85%
    }

    #[test]
    fn test_cells_past_core_count_render_idle() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &five_core_snapshot(), true).unwrap();

        let fills: heapless::Vec<_, 32> = canvas.fill_colors().collect();
        for index in 5..16 {
            assert_eq!(fills[index], COLOR_IDLE, "cell {}", index);
        }
    }

    #[test]
    fn test_tile_colors_and_values() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &five_core_snapshot(), true).unwrap();

        let fills: heapless::Vec<_, 32> = canvas.fill_colors().collect();
        assert_eq!(fills[16], COLOR_WARN); // GPU 90%
        assert_eq!(fills[17], COLOR_DIM); // VRAM 25%
        assert_eq!(fills[18], COLOR_TEXT); // RAM 50%
        assert_eq!(fills[19], COLOR_IDLE); // swap 0%

        assert!(canvas.has_text("90%"));
        assert!(canvas.has_text("25%"));
    }

    #[test]
    fn test_readouts_and_status() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &five_core_snapshot(), false).unwrap();

        assert!(canvas.has_text("58C"));
        assert!(canvas.has_text("900r"));
        assert!(canvas.has_text("70C"));
        assert!(canvas.has_text("65%"));
        assert_eq!(canvas.text_color("OFFLINE"), Some(COLOR_WARN));
        assert!(canvas.flushed());
    }

    #[test]
    fn test_empty_snapshot_renders_idle_matrix() {
        let mut canvas = RecordingCanvas::new();
        draw(&mut canvas, &Snapshot::new(), false).unwrap();

        assert!(canvas.fill_colors().take(16).all(|c| c == COLOR_IDLE));
    }
}
