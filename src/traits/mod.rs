//! Trait definitions for hardware abstraction.
//!
//! This module defines the abstractions that let rs-repeater run against
//! real radio hardware (ESP32) or desktop mocks interchangeably.
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`CarrierInput`]: receiver carrier-detect (COR) line
//! - [`Transmitter`]: PTT keying plus the tone feed for ID and beeps
//! - [`CarrierIndicator`]: receive-activity LED
//! - [`Clock`]: monotonic millisecond time source
//!
//! Pin traits deal in raw electrical [`Level`]s; active-high/active-low
//! interpretation happens in the controller via the configured polarities.

pub mod hardware;

pub use hardware::*;
