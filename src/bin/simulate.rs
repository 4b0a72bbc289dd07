//! Desktop repeater simulation.
//!
//! Drives the controller through a scripted afternoon on the machine
//! using the mock HAL and a virtual clock: the startup ID, a short
//! exchange with courtesy beeps, a squelch crash during the tail, and
//! the deferred periodic ID. Useful for eyeballing the state machine's
//! log output without hardware.
//!
//! ```bash
//! RUST_LOG=rs_repeater=info cargo run --bin simulate
//! ```

use rs_repeater::hal::{MockCarrierInput, MockCarrierLed, MockClock, MockRadio};
use rs_repeater::traits::{CarrierIndicator, CarrierInput, Clock, Level};
use rs_repeater::{RepeaterConfig, RepeaterController};

/// Virtual loop interval in milliseconds (50Hz = 20ms)
const TICK_MS: u64 = 20;

fn main() -> anyhow::Result<()> {
    rs_repeater::logging::init_with_default("info");

    let config = RepeaterConfig::default()
        .with_call_sign("N0CALL")
        .with_id_interval_s(30)
        .with_squelch_tail_s(2);

    let mut controller = RepeaterController::new(MockRadio::new(), config)?;
    let mut clock = MockClock::new();
    let mut cor = MockCarrierInput::new().with_level(Level::High);
    let mut led = MockCarrierLed::new();

    // Scripted carrier activity: (phase, carrier up, duration in ms).
    // COR is active-low, so "carrier up" drives the line low.
    let script: &[(&str, bool, u64)] = &[
        ("cold start, startup ID", false, 8_000),
        ("mobile keys up", true, 3_000),
        ("unkey, courtesy beep and tail", false, 6_000),
        ("answer", true, 2_500),
        ("unkey again", false, 400),
        ("squelch crash during the beep", true, TICK_MS),
        ("quiet after the crash", false, 8_000),
        ("idle until the deferred ID plays", false, 32_000),
    ];

    let mut last_tone: Option<u32> = None;

    for &(phase, carrier, duration_ms) in script {
        tracing::info!(phase, carrier, duration_ms, "script");
        cor.set_level(if carrier { Level::Low } else { Level::High });

        let end = clock.now_ms() + duration_ms;
        while clock.now_ms() < end {
            clock.advance(TICK_MS);

            let level = cor
                .level()
                .map_err(|_| anyhow::anyhow!("carrier input read failed"))?;
            let status = controller
                .update(clock.now_ms(), level)
                .map_err(|_| anyhow::anyhow!("transmitter write failed"))?;

            let _ = led.set_active(status.carrier);

            if status.tone != last_tone {
                match status.tone {
                    Some(hz) => tracing::debug!(hz, "tone on"),
                    None => tracing::debug!("tone off"),
                }
                last_tone = status.tone;
            }
        }
    }

    let radio = controller.transmitter();
    tracing::info!(
        virtual_ms = clock.now_ms(),
        ptt_changes = radio.ptt_changes,
        tone_starts = radio.tone_starts,
        carrier_led_changes = led.changes,
        "simulation complete"
    );

    Ok(())
}
