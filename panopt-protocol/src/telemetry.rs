//! Typed telemetry record decoding.
//!
//! One [`TelemetryFrame`] is decoded per line with `serde-json-core`. The
//! required nested groups are validated up front: a record missing any of
//! them fails as a whole and has no effect on the caller's state.
//!
//! Numeric fields absent from a record decode as zero. The wire format
//! cannot express "sensor unavailable" - a host without a readable fan
//! tachometer reports the same `0` as a stopped fan. This ambiguity is
//! inherited from the host agent and is deliberately not papered over
//! with a sentinel value.

use heapless::Vec;
use serde::de::{SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::line::MAX_LINE_LEN;

/// Maximum number of per-core load entries kept from a record.
///
/// Hosts with more cores than the grid can show still decode fine; the
/// surplus entries are consumed and dropped.
pub const MAX_CORES: usize = 16;

/// Errors that can occur while decoding a telemetry line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Line exceeds [`MAX_LINE_LEN`]
    Oversize,
    /// Not valid JSON, or a required group is missing or mistyped
    Malformed,
}

/// Per-core load percentages, bounded to [`MAX_CORES`] entries
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreLoads(pub Vec<f32, MAX_CORES>);

impl CoreLoads {
    /// Number of valid core entries
    pub fn count(&self) -> usize {
        self.0.len()
    }
}

impl<'de> Deserialize<'de> for CoreLoads {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CoreLoadsVisitor;

        impl<'de> Visitor<'de> for CoreLoadsVisitor {
            type Value = CoreLoads;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a sequence of per-core load percentages")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut loads = Vec::new();
                while let Some(load) = seq.next_element::<f32>()? {
                    // Entries past capacity are consumed and dropped
                    let _ = loads.push(load);
                }
                Ok(CoreLoads(loads))
            }
        }

        deserializer.deserialize_seq(CoreLoadsVisitor)
    }
}

/// `cpu` group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CpuTelemetry {
    /// Aggregate load, 0-100 percent
    #[serde(default)]
    pub load: f32,
    /// Package temperature, deg C
    #[serde(default)]
    pub temp: f32,
    /// Current frequency, MHz
    #[serde(default)]
    pub freq: f32,
    /// Package power draw, W
    #[serde(default)]
    pub pwr: f32,
    /// Fan speed, RPM (absent on hosts without a readable tachometer)
    #[serde(default)]
    pub fan: f32,
    #[serde(default)]
    pub cores: CoreLoads,
}

/// `ram` group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RamTelemetry {
    /// Used, GB
    #[serde(default)]
    pub used: f32,
    /// Total, GB
    #[serde(default)]
    pub total: f32,
    /// Percent used
    #[serde(default, rename = "p")]
    pub percent: f32,
}

/// `swap` group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwapTelemetry {
    /// Used, GB
    #[serde(default)]
    pub used: f32,
    /// Percent used
    #[serde(default, rename = "p")]
    pub percent: f32,
}

/// `gpu` group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpuTelemetry {
    /// Load, 0-100 percent
    #[serde(default)]
    pub gpu_load: f32,
    /// VRAM used, MB
    #[serde(default)]
    pub vram_used: f32,
    /// VRAM total, MB
    #[serde(default)]
    pub vram_total: f32,
    /// Temperature, deg C
    #[serde(default)]
    pub gpu_temp: f32,
    /// Power draw, W
    #[serde(default)]
    pub gpu_pwr: f32,
    /// Fan speed, percent (absent on passively cooled cards)
    #[serde(default)]
    pub gpu_fan: f32,
}

/// `disk` group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DiskTelemetry {
    /// Percent used on the monitored filesystem
    #[serde(default, rename = "p")]
    pub percent: f32,
}

/// `net` group
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetTelemetry {
    /// Cumulative bytes sent, MB
    #[serde(default)]
    pub sent: f32,
    /// Cumulative bytes received, MB
    #[serde(default)]
    pub recv: f32,
}

/// One fully-decoded telemetry record
///
/// All six groups are required; individual numeric fields inside them
/// default to zero when absent. Unknown fields are ignored, so host agents
/// may send more than the controller displays.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryFrame {
    pub cpu: CpuTelemetry,
    pub ram: RamTelemetry,
    pub swap: SwapTelemetry,
    pub gpu: GpuTelemetry,
    pub disk: DiskTelemetry,
    pub net: NetTelemetry,
}

/// Decode one telemetry line
///
/// Decoding is pure: on any failure the caller's live state must remain
/// untouched, which is trivially true because the frame is built out of
/// place and only returned on success.
pub fn decode_line(line: &[u8]) -> Result<TelemetryFrame, DecodeError> {
    if line.len() > MAX_LINE_LEN {
        return Err(DecodeError::Oversize);
    }

    let (frame, _consumed) =
        serde_json_core::de::from_slice::<TelemetryFrame>(line).map_err(|_| DecodeError::Malformed)?;

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RECORD: &[u8] = br#"{"cpu":{"load":42.5,"temp":61.0,"freq":3400.0,"pwr":35.2,"fan":880,"cores":[10.0,20.0,30.0,40.0]},"ram":{"used":10.3,"total":31.2,"p":33.0},"swap":{"used":0.5,"p":3.1},"gpu":{"gpu_load":12,"vram_used":812.0,"vram_total":8192.0,"gpu_temp":41,"gpu_pwr":22.0,"gpu_fan":35},"disk":{"p":61.0},"net":{"sent":1024.5,"recv":8192.25}}"#;

    #[test]
    fn test_decode_full_record() {
        let frame = decode_line(FULL_RECORD).unwrap();

        assert_eq!(frame.cpu.load, 42.5);
        assert_eq!(frame.cpu.freq, 3400.0);
        assert_eq!(frame.cpu.fan, 880.0);
        assert_eq!(frame.cpu.cores.count(), 4);
        assert_eq!(frame.cpu.cores.0[2], 30.0);
        assert_eq!(frame.ram.percent, 33.0);
        assert_eq!(frame.swap.used, 0.5);
        assert_eq!(frame.gpu.vram_total, 8192.0);
        assert_eq!(frame.disk.percent, 61.0);
        assert_eq!(frame.net.recv, 8192.25);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let first = decode_line(FULL_RECORD).unwrap();
        let second = decode_line(FULL_RECORD).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_absent_numeric_fields_decode_as_zero() {
        // No fan, no gpu_fan, no cores - the one-variant host agent
        let line = br#"{"cpu":{"load":5.0,"temp":40.0,"freq":2000.0,"pwr":10.0},"ram":{"used":1.0,"total":8.0,"p":12.5},"swap":{"used":0.0,"p":0.0},"gpu":{"gpu_load":0,"vram_used":0,"vram_total":0,"gpu_temp":0,"gpu_pwr":0},"disk":{"p":50.0},"net":{"sent":0,"recv":0}}"#;
        let frame = decode_line(line).unwrap();

        assert_eq!(frame.cpu.fan, 0.0);
        assert_eq!(frame.gpu.gpu_fan, 0.0);
        assert_eq!(frame.cpu.cores.count(), 0);
    }

    #[test]
    fn test_missing_required_group_fails() {
        // No "net" group
        let line = br#"{"cpu":{"load":5.0},"ram":{"p":1.0},"swap":{"p":0.0},"gpu":{"gpu_load":0},"disk":{"p":0.0}}"#;
        assert_eq!(decode_line(line), Err(DecodeError::Malformed));
    }

    #[test]
    fn test_malformed_json_fails() {
        assert_eq!(decode_line(b"{\"cpu\":"), Err(DecodeError::Malformed));
        assert_eq!(decode_line(b"not json at all"), Err(DecodeError::Malformed));
        assert_eq!(decode_line(b""), Err(DecodeError::Malformed));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        // The host agent also sends gpu.vram_p, which the controller
        // derives itself
        let line = br#"{"cpu":{"load":1.0},"ram":{"p":1.0},"swap":{"p":0.0},"gpu":{"gpu_load":7,"vram_p":9.9},"disk":{"p":0.0},"net":{"sent":0,"recv":0}}"#;
        let frame = decode_line(line).unwrap();
        assert_eq!(frame.gpu.gpu_load, 7.0);
    }

    #[test]
    fn test_core_list_truncated_to_max() {
        let mut json = heapless::String::<512>::new();
        json.push_str(r#"{"cpu":{"load":1.0,"cores":["#).unwrap();
        for i in 0..24 {
            if i > 0 {
                json.push(',').unwrap();
            }
            core::fmt::Write::write_fmt(&mut json, format_args!("{}.0", i)).unwrap();
        }
        json.push_str(r#"]},"ram":{"p":1.0},"swap":{"p":0.0},"gpu":{"gpu_load":0},"disk":{"p":0.0},"net":{"sent":0,"recv":0}}"#)
            .unwrap();

        let frame = decode_line(json.as_bytes()).unwrap();
        assert_eq!(frame.cpu.cores.count(), MAX_CORES);
        assert_eq!(frame.cpu.cores.0[MAX_CORES - 1], 15.0);
    }

    #[test]
    fn test_oversize_line_rejected() {
        let big = [b' '; MAX_LINE_LEN + 1];
        assert_eq!(decode_line(&big), Err(DecodeError::Oversize));
    }
}
