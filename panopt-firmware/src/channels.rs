//! Inter-task communication channels
//!
//! The telemetry RX task moves complete lines here; the control loop
//! drains at most one per cycle, so a backlog is worked off a record at a
//! time instead of being batched.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use panopt_protocol::Line;

/// Channel capacity for buffered telemetry lines
const LINE_CHANNEL_SIZE: usize = 4;

/// Complete telemetry lines awaiting the control loop
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> = Channel::new();
