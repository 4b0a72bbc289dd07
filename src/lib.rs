//! # rs-repeater
//!
//! An automatic controller for an amateur radio repeater: carrier-operated
//! relay (COR) to PTT arbitration, squelch tail with courtesy beep, and
//! periodic CW identification.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the carrier-detect input, the
//!   transmitter's PTT and tone lines, and the clock
//! - **Debounced keying**: Carrier edges settle through a fixed window
//!   before PTT follows, in both directions
//! - **Squelch tail**: Configurable hold time after the carrier drops,
//!   opened by a courtesy beep in one of several two-tone patterns
//! - **CW identification**: The call sign is sent in Morse on a schedule
//!   and after each use of the machine, without ever blocking the
//!   carrier sampling loop
//! - **Configurable polarity**: COR and PTT lines can each be active-high
//!   or active-low
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware abstractions
//! - `morse` - Call sign to CW element encoding
//! - `debounce` / `timers` - Settle windows and coarse deadlines
//! - `sequencer` - Non-blocking tone playback (beep and ID schedules)
//! - `controller` - Main state machine that ties everything together
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_repeater::{RepeaterConfig, RepeaterController, hal::MockRadio, traits::Level};
//!
//! // Create controller with mock radio
//! let radio = MockRadio::new();
//! let config = RepeaterConfig::default()
//!     .with_call_sign("N0CALL")
//!     .with_id_interval_s(600)
//!     .with_squelch_tail_s(2);
//! let mut controller = RepeaterController::new(radio, config).unwrap();
//!
//! // Update in your main loop with the raw carrier-detect level.
//! // COR is active-low by default, so High means no carrier.
//! let status = controller.update(20, Level::High).unwrap();
//! assert!(!status.ptt_asserted);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

/// Shared configuration for desktop and ESP32.
pub mod config;
/// Main repeater controller that coordinates keying, tail, and ID.
pub mod controller;
/// Settle-window filtering for the carrier-detect line.
pub mod debounce;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Call sign to CW element encoding.
pub mod morse;
/// Non-blocking tone playback for the courtesy beep and CW ID.
pub mod sequencer;
/// Coarse deadline timers for the ID interval and squelch tail.
pub mod timers;
/// Core traits for hardware abstraction.
pub mod traits;

/// Structured logging setup for host builds.
#[cfg(feature = "std")]
pub mod logging;

// Re-exports for convenience
pub use config::{
    call_sign_string, BeepKind, CallSignString, ConfigError, Polarity, RepeaterConfig,
    MAX_CALL_SIGN,
};
pub use controller::{ControllerState, RepeaterController, RepeaterStatus};
pub use debounce::{DebounceFilter, Verdict};
pub use morse::{encode_call_sign, ElementSequence, EncodeError, MorseElement, MAX_ID_ELEMENTS};
pub use sequencer::{
    build_beep_schedule, build_id_schedule, schedule_duration_ms, AudioSequencer, Playback,
    Schedule, Segment, SequenceError, MAX_SEGMENTS,
};
pub use timers::DeadlineTimer;
pub use traits::{CarrierIndicator, CarrierInput, Clock, Level, Transmitter};
