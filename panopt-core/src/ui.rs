//! Layout selection state

/// The two selectable screen layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Layout {
    /// Labeled rows of headline values with warning colors
    Dashboard,
    /// Per-core heat matrix with auxiliary tiles
    Grid,
}

impl Layout {
    /// The other layout
    pub fn toggled(self) -> Self {
        match self {
            Layout::Dashboard => Layout::Grid,
            Layout::Grid => Layout::Dashboard,
        }
    }
}

/// Current layout plus the pending full-repaint flag
///
/// `layout_changed` is raised whenever the layout is reassigned and stays
/// up until a render completes, so a layout switch always gets its
/// full-screen repaint even if the render is deferred a cycle.
#[derive(Debug, Clone)]
pub struct UiState {
    layout: Layout,
    layout_changed: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// Boot state: grid layout, repaint pending for the first frame
    pub fn new() -> Self {
        Self {
            layout: Layout::Grid,
            layout_changed: true,
        }
    }

    /// Currently selected layout
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Select a layout, raising the repaint flag
    pub fn select(&mut self, layout: Layout) {
        self.layout = layout;
        self.layout_changed = true;
    }

    /// Whether a full repaint is pending
    pub fn layout_changed(&self) -> bool {
        self.layout_changed
    }

    /// Acknowledge the repaint; called after a render completes
    pub fn clear_layout_changed(&mut self) {
        self.layout_changed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(Layout::Dashboard.toggled(), Layout::Grid);
        assert_eq!(Layout::Grid.toggled(), Layout::Dashboard);
    }

    #[test]
    fn test_boot_state_paints_grid() {
        let ui = UiState::new();
        assert_eq!(ui.layout(), Layout::Grid);
        assert!(ui.layout_changed());
    }

    #[test]
    fn test_select_raises_flag_until_cleared() {
        let mut ui = UiState::new();
        ui.clear_layout_changed();

        ui.select(Layout::Dashboard);
        assert_eq!(ui.layout(), Layout::Dashboard);
        assert!(ui.layout_changed());

        ui.clear_layout_changed();
        assert!(!ui.layout_changed());
    }
}
