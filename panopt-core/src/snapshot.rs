//! Telemetry snapshot state
//!
//! [`Snapshot`] is the last fully-decoded telemetry record, owned by the
//! control loop. It is overwritten as a whole on every successful decode
//! and deliberately *not* cleared on link loss - the panel keeps showing
//! the last known values while the OFFLINE indicator flags their age.

use heapless::Vec;
use panopt_protocol::{TelemetryFrame, MAX_CORES};

/// Last-good telemetry values, zero/empty until the first decode
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Aggregate CPU load, 0-100 percent
    pub cpu_load: f32,
    /// CPU package temperature, deg C
    pub cpu_temp: f32,
    /// CPU frequency, MHz
    pub cpu_freq: u32,
    /// CPU package power, W
    pub cpu_pwr: f32,
    /// CPU fan speed, RPM
    pub cpu_fan: u16,
    /// Per-core loads; `len()` is the authoritative core count
    pub cores: Vec<f32, MAX_CORES>,

    /// RAM used, GB
    pub ram_used: f32,
    /// RAM total, GB
    pub ram_total: f32,
    /// RAM percent used
    pub ram_percent: f32,

    /// Swap used, GB
    pub swap_used: f32,
    /// Swap percent used
    pub swap_percent: f32,

    /// GPU load, 0-100 percent
    pub gpu_load: u8,
    /// VRAM used, MB
    pub vram_used: f32,
    /// VRAM total, MB
    pub vram_total: f32,
    /// GPU temperature, deg C
    pub gpu_temp: i16,
    /// GPU power, W
    pub gpu_pwr: f32,
    /// GPU fan speed, percent
    pub gpu_fan: u16,

    /// Disk percent used
    pub disk_percent: f32,

    /// Cumulative network bytes sent, MB (display only)
    pub net_sent: f32,
    /// Cumulative network bytes received, MB (display only)
    pub net_recv: f32,
}

impl Snapshot {
    /// Create an all-zero snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every field from a successfully decoded frame
    ///
    /// This is the only mutation path. A failed decode never reaches here,
    /// so the snapshot is always internally consistent with exactly one
    /// wire record.
    pub fn apply(&mut self, frame: &TelemetryFrame) {
        self.cpu_load = frame.cpu.load;
        self.cpu_temp = frame.cpu.temp;
        self.cpu_freq = frame.cpu.freq as u32;
        self.cpu_pwr = frame.cpu.pwr;
        self.cpu_fan = frame.cpu.fan as u16;

        self.cores.clear();
        for &load in frame.cpu.cores.0.iter() {
            // Cannot fail: both sides are bounded by MAX_CORES
            let _ = self.cores.push(load);
        }

        self.ram_used = frame.ram.used;
        self.ram_total = frame.ram.total;
        self.ram_percent = frame.ram.percent;

        self.swap_used = frame.swap.used;
        self.swap_percent = frame.swap.percent;

        self.gpu_load = frame.gpu.gpu_load as u8;
        self.vram_used = frame.gpu.vram_used;
        self.vram_total = frame.gpu.vram_total;
        self.gpu_temp = frame.gpu.gpu_temp as i16;
        self.gpu_pwr = frame.gpu.gpu_pwr;
        self.gpu_fan = frame.gpu.gpu_fan as u16;

        self.disk_percent = frame.disk.percent;

        self.net_sent = frame.net.sent;
        self.net_recv = frame.net.recv;
    }

    /// Number of valid per-core entries
    pub fn core_count(&self) -> usize {
        self.cores.len()
    }

    /// Load of core `index`, or zero for cells past the core count
    pub fn core_load(&self, index: usize) -> f32 {
        self.cores.get(index).copied().unwrap_or(0.0)
    }

    /// VRAM percent used, derived; zero when the total is unknown
    pub fn vram_percent(&self) -> f32 {
        if self.vram_total > 0.0 {
            self.vram_used / self.vram_total * 100.0
        } else {
            0.0
        }
    }
}
