//! Board-agnostic control logic for the Panopt display controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Telemetry snapshot state
//! - Serial link health monitoring
//! - Button / touch input arbitration
//! - Layout selection state
//! - Redraw scheduling
//! - The per-cycle application engine tying the above together
//!
//! Rendering itself lives in `panopt-display`; the wire format lives in
//! `panopt-protocol`.

#![no_std]
#![deny(unsafe_code)]

// Host-side tests (proptest) need the standard library
#[cfg(test)]
extern crate std;

pub mod app;
pub mod input;
pub mod link;
pub mod scheduler;
pub mod snapshot;
pub mod ui;

pub use app::{App, CycleInputs, CycleOutcome, LinkEdge};
pub use input::{InputArbiter, TouchPoint, LAYOUT_DEBOUNCE_MS};
pub use link::{LinkMonitor, DISCONNECT_TIMEOUT_MS};
pub use scheduler::{RedrawPolicy, RedrawTriggers, RenderScheduler, KEEPALIVE_INTERVAL_MS};
pub use snapshot::Snapshot;
pub use ui::{Layout, UiState};
