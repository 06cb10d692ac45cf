//! Button and touch input arbitration
//!
//! Two raw sources are sampled every control cycle:
//! - a momentary button (active-low, pulled up when idle), whose
//!   release->press *edge* toggles the layout
//! - a touch surface reporting a screen-space point only while a valid
//!   touch is held; the left zone forces the dashboard, the right zone
//!   forces the grid, the middle band is ignored
//!
//! The button path is evaluated first; whichever path fires first wins the
//! cycle. Every accepted change opens a [`LAYOUT_DEBOUNCE_MS`] dead time
//! that suppresses both paths, absorbing mechanical bounce and the
//! repeated samples of a held touch. Re-selecting the already-active
//! layout by touch is a no-op and does not consume the dead time.

use crate::ui::Layout;

/// Touches left of this X select the dashboard (320 px wide panel)
pub const TOUCH_LEFT_ZONE_X: u16 = 80;

/// Touches right of this X select the grid
pub const TOUCH_RIGHT_ZONE_X: u16 = 240;

/// Dead time after an accepted layout change (ms)
pub const LAYOUT_DEBOUNCE_MS: u64 = 300;

/// A valid touch sample in display pixel space
///
/// The confidence/pressure threshold is applied by the touch driver;
/// the arbiter only ever sees samples that passed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

/// Debounced layout-switch arbitration over both input sources
#[derive(Debug, Default)]
pub struct InputArbiter {
    button_was_pressed: bool,
    last_change_ms: Option<u64>,
}

impl InputArbiter {
    /// Create an arbiter with no input history
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample both sources for one cycle
    ///
    /// Returns the layout to switch to, or None when nothing (new) fired.
    pub fn poll(
        &mut self,
        now_ms: u64,
        button_pressed: bool,
        touch: Option<TouchPoint>,
        current: Layout,
    ) -> Option<Layout> {
        // Edge tracking runs even inside the dead time, so a button held
        // across it does not retrigger on the first live cycle.
        let button_edge = button_pressed && !self.button_was_pressed;
        self.button_was_pressed = button_pressed;

        if self.in_dead_time(now_ms) {
            return None;
        }

        if button_edge {
            self.last_change_ms = Some(now_ms);
            return Some(current.toggled());
        }

        let zone = touch.and_then(|point| {
            if point.x < TOUCH_LEFT_ZONE_X {
                Some(Layout::Dashboard)
            } else if point.x > TOUCH_RIGHT_ZONE_X {
                Some(Layout::Grid)
            } else {
                None
            }
        });

        match zone {
            Some(target) if target != current => {
                self.last_change_ms = Some(now_ms);
                Some(target)
            }
            _ => None,
        }
    }

    fn in_dead_time(&self, now_ms: u64) -> bool {
        matches!(self.last_change_ms, Some(t) if now_ms.saturating_sub(t) < LAYOUT_DEBOUNCE_MS)
    }
}
