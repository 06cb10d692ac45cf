//! Telemetry UART receive task
//!
//! Receives raw bytes from the host agent and frames them into lines.
//! Complete lines go to the line channel; the control loop decodes them,
//! one per cycle. A full channel drops the newest record - telemetry is a
//! continuous stream and the next line supersedes it anyway.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use panopt_protocol::{LineAccumulator, LineError};

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Telemetry RX task - frames the serial byte stream into records
#[embassy_executor::task]
pub async fn telemetry_rx_task(mut rx: BufferedUartRx) {
    info!("Telemetry RX task started");

    let mut accumulator = LineAccumulator::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match accumulator.feed(byte) {
                        Ok(Some(line)) => {
                            if LINE_CHANNEL.try_send(line).is_err() {
                                warn!("Line channel full, dropping record");
                            }
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(LineError::Oversize) => {
                            warn!("Oversized telemetry line, resyncing");
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
