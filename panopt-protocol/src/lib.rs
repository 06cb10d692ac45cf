//! Host Telemetry Wire Format
//!
//! This crate defines the serial protocol between the host monitor agent
//! and the Panopt display controller. The protocol is deliberately simple:
//! the host emits one self-contained JSON record per line at 115200 baud,
//! and the controller never talks back.
//!
//! # Record Overview
//!
//! ```text
//! {"cpu":{"load":12.5,"temp":54.0,"freq":3400,"pwr":28.1,"fan":900,
//!         "cores":[10.0,15.2, ...]},
//!  "ram":{"used":10.3,"total":31.2,"p":33.0},
//!  "swap":{"used":0.0,"p":0.0},
//!  "gpu":{"gpu_load":4,"vram_used":812.0,"vram_total":8192.0,
//!         "gpu_temp":41,"gpu_pwr":22.0,"gpu_fan":0},
//!  "disk":{"p":61.0},
//!  "net":{"sent":1024.5,"recv":8192.0}}
//! ```
//!
//! A record that fails to parse, or that is missing a required group, is
//! discarded as a whole - the controller keeps rendering the previous
//! snapshot until a valid line arrives.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod telemetry;

pub use line::{Line, LineAccumulator, LineError, MAX_LINE_LEN};
pub use telemetry::{
    decode_line, CoreLoads, CpuTelemetry, DecodeError, DiskTelemetry, GpuTelemetry, NetTelemetry,
    RamTelemetry, SwapTelemetry, TelemetryFrame, MAX_CORES,
};
