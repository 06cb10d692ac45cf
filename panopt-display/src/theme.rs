//! Color theme, warning thresholds and heat banding
//!
//! The palette and thresholds are compile-time constants; both layouts
//! share them so the panel reads consistently across screens.

use embedded_graphics::pixelcolor::Rgb565;

/// Background everywhere
pub const COLOR_BG: Rgb565 = Rgb565::new(0, 0, 0);

/// Normal value text (0xF800)
pub const COLOR_TEXT: Rgb565 = Rgb565::new(31, 0, 0);

/// Labels and de-emphasized readouts (0x8800)
pub const COLOR_DIM: Rgb565 = Rgb565::new(17, 0, 0);

/// Titles and highlights (0xFDA0)
pub const COLOR_BRIGHT: Rgb565 = Rgb565::new(31, 45, 0);

/// Warning values and the OFFLINE indicator (0xFFE0)
pub const COLOR_WARN: Rgb565 = Rgb565::new(31, 63, 0);

/// Coolest heat band (0x2104)
pub const COLOR_IDLE: Rgb565 = Rgb565::new(4, 8, 4);

/// Dashboard warning thresholds, strictly-greater-than
pub const WARN_CPU_LOAD: f32 = 80.0;
pub const WARN_GPU_LOAD: f32 = 80.0;
pub const WARN_RAM_PERCENT: f32 = 85.0;
pub const WARN_SWAP_PERCENT: f32 = 50.0;
pub const WARN_DISK_PERCENT: f32 = 90.0;

/// Bucket a load percentage into one of five heat bands
///
/// Boundaries are strict less-than; band 4 is the catch-all, so values
/// at or above 80 - and float oddities like NaN - land in the warmest
/// band.
pub fn heat_band(load: f32) -> u8 {
    if load < 20.0 {
        0
    } else if load < 40.0 {
        1
    } else if load < 60.0 {
        2
    } else if load < 80.0 {
        3
    } else {
        4
    }
}

/// Background color for a heat band, coolest to warmest
pub fn heat_color(load: f32) -> Rgb565 {
    match heat_band(load) {
        0 => COLOR_IDLE,
        1 => COLOR_DIM,
        2 => COLOR_TEXT,
        3 => COLOR_BRIGHT,
        _ => COLOR_WARN,
    }
}

/// Value color against a warning threshold
pub fn value_color(value: f32, warn_above: f32) -> Rgb565 {
    if value > warn_above {
        COLOR_WARN
    } else {
        COLOR_TEXT
    }
}

/// ONLINE/OFFLINE indicator color
pub fn status_color(connected: bool) -> Rgb565 {
    if connected {
        COLOR_TEXT
    } else {
        COLOR_WARN
    }
}
