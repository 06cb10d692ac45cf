//! Panopt - Host Telemetry Display Controller
//!
//! Firmware binary for RP2040 boards driving a 320x240 ILI9341 panel with
//! an XPT2046 touch overlay. The host agent streams one JSON telemetry
//! record per line over UART; the controller renders the latest snapshot
//! in one of two layouts, switchable by button or touch.
//!
//! Named after the Greek "Panoptes" meaning "all-seeing".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Duration, Instant, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use panopt_core::{App, CycleInputs, LinkEdge, RedrawPolicy};
use panopt_display::screens;

use crate::canvas::{FrameCanvas, PanelCanvas, FRAME_PIXELS};
use crate::ili9341::Ili9341;
use crate::xpt2046::Xpt2046;

mod canvas;
mod channels;
mod ili9341;
mod tasks;
mod xpt2046;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Control cycle period (input sample -> decode -> state -> redraw)
const CYCLE_INTERVAL_MS: u64 = 10;

/// How long the boot splash stays up
const SPLASH_HOLD_MS: u64 = 1500;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

// Back buffer for the panel (150 KB of the RP2040's 264 KB SRAM)
static FRAME_BUF: StaticCell<[u16; FRAME_PIXELS]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Panopt firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Panel on SPI0. Pin assignments are board-specific
    // (CLK=GPIO18, MOSI=GPIO19, MISO=GPIO16, CS=GPIO17, DC=GPIO20, RST=GPIO21)
    let mut panel_spi_config = spi::Config::default();
    panel_spi_config.frequency = 32_000_000;
    let panel_spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, panel_spi_config);

    // The panel is the only device on SPI0; keep it selected
    let _panel_cs = Output::new(p.PIN_17, Level::Low);
    let panel_dc = Output::new(p.PIN_20, Level::Low);
    let panel_rst = Output::new(p.PIN_21, Level::High);
    let panel = Ili9341::new(panel_spi, panel_dc, panel_rst);

    // Touch controller on SPI1 (CLK=GPIO10, MOSI=GPIO11, MISO=GPIO12, CS=GPIO13)
    let mut touch_spi_config = spi::Config::default();
    touch_spi_config.frequency = 2_000_000;
    let touch_spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, touch_spi_config);
    let touch_cs = Output::new(p.PIN_13, Level::High);
    let mut touch = Xpt2046::new(touch_spi, touch_cs);

    // Layout button, active low with internal pull-up
    let button = Input::new(p.PIN_15, Pull::Up);

    // Telemetry UART from the host agent, 115200 baud default
    let uart_config = UartConfig::default();
    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (_tx, rx) = uart.split();

    info!("UART initialized for telemetry receive");

    let frame = FrameCanvas::new(FRAME_BUF.init([0u16; FRAME_PIXELS]));
    let mut canvas = PanelCanvas::new(frame, panel);

    // A dead panel degrades the controller, it does not halt it: state
    // keeps updating and flush errors are reported on their edge below.
    if canvas.init(&mut Delay).is_err() {
        error!("Panel init failed, continuing degraded");
    }

    // Fixed splash before the control loop takes over
    if screens::splash::draw(&mut canvas).is_err() {
        error!("Splash render failed");
    }
    Timer::after_millis(SPLASH_HOLD_MS).await;

    spawner.spawn(tasks::telemetry_rx_task(rx)).unwrap();
    info!("Telemetry RX task spawned, entering control loop");

    let mut app = App::new(RedrawPolicy::OnTrigger);
    let mut render_degraded = false;

    let mut ticker = Ticker::every(Duration::from_millis(CYCLE_INTERVAL_MS));
    let started = Instant::now();

    loop {
        ticker.next().await;
        let now_ms = started.elapsed().as_millis();

        // Input sampling (non-blocking)
        let button_pressed = button.is_low();
        let touch_point = touch.read_touch().ok().flatten();

        // At most one backlogged telemetry line per cycle
        let line = channels::LINE_CHANNEL.try_receive().ok();

        let outcome = app.cycle(
            now_ms,
            CycleInputs {
                button_pressed,
                touch: touch_point,
                line: line.as_deref(),
            },
        );

        match outcome.link_edge {
            Some(LinkEdge::Online) => info!("Telemetry link online"),
            Some(LinkEdge::Offline) => {
                warn!(
                    "Telemetry link lost ({} records ok, {} rejected)",
                    app.decode_ok_count(),
                    app.decode_error_count()
                );
            }
            None => {}
        }

        if let Some(layout) = outcome.redraw {
            match screens::draw(&mut canvas, layout, app.snapshot(), app.is_connected()) {
                Ok(()) => {
                    render_degraded = false;
                }
                Err(e) => {
                    if !render_degraded {
                        error!("Render failed: {:?}", e);
                        render_degraded = true;
                    }
                }
            }
            // Acknowledge either way so a dead panel retries at the
            // keep-alive cadence instead of every cycle
            app.mark_rendered(now_ms);
        }
    }
}
