//! ESP32-C3 SuperMini repeater controller.
//!
//! This is the main entry point for the physical hardware controller.
//! It runs a 50Hz control loop that:
//! - Samples the receiver's carrier-detect (COR) line
//! - Advances the repeater state machine one step
//! - Keys PTT and the tone output through the controller
//! - Mirrors the carrier onto the onboard LED
//!
//! # Hardware Setup
//!
//! - GPIO2 → transmitter PTT keying circuit
//! - GPIO3 ← receiver COR (open-collector, pulled up internally)
//! - GPIO6 → RC low-pass → transmitter audio input
//! - GPIO8 → onboard carrier LED
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --target riscv32imc-esp-espidf
//! ```

use esp_idf_hal::peripherals::Peripherals;
use rs_repeater::hal::esp32::{Esp32CarrierInput, Esp32CarrierLed, Esp32Clock, Esp32Radio};
use rs_repeater::traits::{CarrierIndicator, CarrierInput, Clock};
use rs_repeater::{RepeaterConfig, RepeaterController};
use std::thread;
use std::time::Duration;

/// Main loop interval in milliseconds (50Hz = 20ms)
const LOOP_INTERVAL_MS: u64 = 20;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    rs_repeater::logging::init();

    println!();
    println!("==================================");
    println!("  rs-repeater SuperMini Controller");
    println!("==================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    // TODO: Load from NVS or use compile-time env vars
    let config = RepeaterConfig::default()
        .with_call_sign(option_env!("REPEATER_CALL_SIGN").unwrap_or("N0CALL"))
        .with_id_interval_s(600)
        .with_squelch_tail_s(2);
    let released = config.ptt_polarity.level_for(false);

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Radio (PTT on GPIO2, tone on GPIO6)
    // =========================================================================
    let radio = Esp32Radio::new(
        peripherals.pins.gpio2,
        peripherals.pins.gpio6,
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        released,
    )?;
    println!("[OK] Radio initialized (GPIO2 PTT, GPIO6 tone)");

    // =========================================================================
    // Initialize Carrier Detect (GPIO3)
    // =========================================================================
    let mut cor = Esp32CarrierInput::new(peripherals.pins.gpio3)?;
    println!("[OK] Carrier detect initialized (GPIO3)");

    // =========================================================================
    // Initialize Carrier LED (GPIO8)
    // =========================================================================
    let mut led = Esp32CarrierLed::new(peripherals.pins.gpio8)?;
    println!("[OK] Carrier LED initialized (GPIO8)");

    // =========================================================================
    // Initialize Clock and Controller
    // =========================================================================
    let clock = Esp32Clock::new();
    let mut controller = RepeaterController::new(radio, config)
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    println!();
    println!("Starting control loop (50Hz)...");
    println!();

    // =========================================================================
    // Main Control Loop (50Hz)
    // =========================================================================
    loop {
        let now = clock.now_ms();

        let level = cor.level()?;
        let status = controller.update(now, level)?;

        let _ = led.set_active(status.carrier);

        // Sleep until next tick
        thread::sleep(Duration::from_millis(LOOP_INTERVAL_MS));
    }
}
