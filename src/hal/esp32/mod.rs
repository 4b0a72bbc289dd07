//! ESP32-C3 SuperMini hardware abstraction layer for repeater control.
//!
//! This module provides hardware implementations for an ESP32-C3 SuperMini
//! board sitting between the receiver and transmitter of a repeater pair.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **COR**: receiver carrier-detect line, open-collector into a GPIO
//! - **PTT**: GPIO into the transmitter keying circuit
//! - **Tone**: LEDC square wave into the transmitter audio chain
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod clock;
mod cor;
mod led;
mod radio;

pub use clock::Esp32Clock;
pub use cor::Esp32CarrierInput;
pub use led::Esp32CarrierLed;
pub use radio::Esp32Radio;

/// Pin assignments for SuperMini ESP32-C3.
///
/// These constants match the wiring diagram in the hardware plan:
/// - Transmitter keying and audio on GPIO2, 6
/// - Receiver carrier detect on GPIO3
/// - Carrier indicator on the onboard LED (GPIO8)
pub mod pins {
    // =========================================================================
    // Transmitter
    // =========================================================================

    /// PTT keying output into the transmitter.
    pub const PTT: i32 = 2;

    /// Tone output (LEDC square wave) into the transmitter audio chain.
    pub const TONE: i32 = 6;

    // =========================================================================
    // Receiver
    // =========================================================================

    /// Carrier-detect (COR) input from the receiver squelch.
    pub const COR: i32 = 3;

    // =========================================================================
    // Indicators
    // =========================================================================

    /// Carrier indicator (onboard blue LED, active low).
    pub const CARRIER_LED: i32 = 8;
}
