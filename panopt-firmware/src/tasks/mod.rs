//! Embassy tasks

pub mod telemetry_rx;

pub use telemetry_rx::telemetry_rx_task;
