//! The per-cycle application engine
//!
//! [`App`] owns all mutable state (snapshot, link, UI, scheduling) and is
//! itself owned by the control loop - there are no globals, and every
//! component can be driven in isolation from tests with constructed
//! inputs.
//!
//! One call to [`App::cycle`] performs, strictly in order:
//! input arbitration, at most one telemetry line decode, link state
//! update, redraw decision. The caller renders when asked to and then
//! acknowledges with [`App::mark_rendered`].

use panopt_protocol::decode_line;

use crate::input::{InputArbiter, TouchPoint};
use crate::link::LinkMonitor;
use crate::scheduler::{RedrawPolicy, RedrawTriggers, RenderScheduler};
use crate::snapshot::Snapshot;
use crate::ui::{Layout, UiState};

/// Raw inputs sampled by the control loop for one cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct CycleInputs<'a> {
    /// Button level after the active-low inversion (true = pressed)
    pub button_pressed: bool,
    /// Valid touch sample, if a touch is held this cycle
    pub touch: Option<TouchPoint>,
    /// At most one complete telemetry line
    pub line: Option<&'a [u8]>,
}

/// Link state transition observed during a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEdge {
    /// First successful decode after being disconnected
    Online,
    /// Disconnect timeout expired
    Offline,
}

/// What happened during one cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleOutcome {
    /// A telemetry record was decoded and applied
    pub decoded: bool,
    /// Link transition, if one occurred
    pub link_edge: Option<LinkEdge>,
    /// Layout to render this cycle, if a redraw is due
    pub redraw: Option<Layout>,
}

/// Application state, owned by the control loop
#[derive(Debug)]
pub struct App {
    snapshot: Snapshot,
    link: LinkMonitor,
    arbiter: InputArbiter,
    ui: UiState,
    scheduler: RenderScheduler,
    decode_ok: u32,
    decode_errors: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new(RedrawPolicy::default())
    }
}

impl App {
    /// Create the boot-time application state
    pub fn new(policy: RedrawPolicy) -> Self {
        Self {
            snapshot: Snapshot::new(),
            link: LinkMonitor::new(),
            arbiter: InputArbiter::new(),
            ui: UiState::new(),
            scheduler: RenderScheduler::new(policy),
            decode_ok: 0,
            decode_errors: 0,
        }
    }

    /// Run one control cycle
    pub fn cycle(&mut self, now_ms: u64, inputs: CycleInputs<'_>) -> CycleOutcome {
        // 1. Input sampling
        if let Some(target) =
            self.arbiter
                .poll(now_ms, inputs.button_pressed, inputs.touch, self.ui.layout())
        {
            self.ui.select(target);
        }

        // 2. Telemetry - a failed decode touches nothing
        let mut decoded = false;
        if let Some(line) = inputs.line {
            match decode_line(line) {
                Ok(frame) => {
                    self.snapshot.apply(&frame);
                    self.decode_ok = self.decode_ok.wrapping_add(1);
                    decoded = true;
                }
                Err(_) => {
                    self.decode_errors = self.decode_errors.wrapping_add(1);
                }
            }
        }

        // 3. Link state
        let mut link_edge = None;
        if decoded && self.link.on_decode_success(now_ms) {
            link_edge = Some(LinkEdge::Online);
        }
        if self.link.tick(now_ms) {
            link_edge = Some(LinkEdge::Offline);
        }

        // 4. Redraw decision
        let triggers = RedrawTriggers {
            data_updated: decoded,
            link_edge: link_edge.is_some(),
            layout_changed: self.ui.layout_changed(),
        };
        let redraw = self
            .scheduler
            .should_redraw(now_ms, &triggers)
            .then_some(self.ui.layout());

        CycleOutcome {
            decoded,
            link_edge,
            redraw,
        }
    }

    /// Acknowledge a completed render
    pub fn mark_rendered(&mut self, now_ms: u64) {
        self.scheduler.mark_redrawn(now_ms);
        self.ui.clear_layout_changed();
    }

    /// The last-good telemetry values
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Current link state
    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    /// Currently selected layout
    pub fn layout(&self) -> Layout {
        self.ui.layout()
    }

    /// Successfully decoded records since boot
    pub fn decode_ok_count(&self) -> u32 {
        self.decode_ok
    }

    /// Rejected lines since boot
    pub fn decode_error_count(&self) -> u32 {
        self.decode_errors
    }
}
