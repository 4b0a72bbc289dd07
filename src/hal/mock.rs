//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for all hardware traits, enabling
//! development and testing on desktop without a radio attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockCarrierInput`] | [`CarrierInput`] | Settable carrier-detect level |
//! | [`MockRadio`] | [`Transmitter`] | Tracks PTT and tone calls |
//! | [`MockCarrierLed`] | [`CarrierIndicator`] | Tracks indicator changes |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//!
//! # Example
//!
//! ```rust
//! use rs_repeater::{RepeaterConfig, RepeaterController};
//! use rs_repeater::hal::MockRadio;
//! use rs_repeater::traits::Level;
//!
//! // Create controller with mock radio
//! let radio = MockRadio::new();
//! let config = RepeaterConfig::default().with_call_sign("N0CALL");
//! let mut controller = RepeaterController::new(radio, config).unwrap();
//!
//! // Run a quiet tick and verify via status
//! let status = controller.update(0, Level::High).unwrap();
//! assert!(!status.ptt_asserted);
//! ```
//!
//! [`CarrierInput`]: crate::traits::CarrierInput
//! [`Transmitter`]: crate::traits::Transmitter
//! [`CarrierIndicator`]: crate::traits::CarrierIndicator
//! [`Clock`]: crate::traits::Clock

use crate::traits::{CarrierIndicator, CarrierInput, Clock, Level, Transmitter};

// ============================================================================
// Receiver Side
// ============================================================================

/// Mock carrier-detect input for testing.
///
/// Holds a settable electrical level and counts reads. Polarity handling
/// stays in the controller, so tests drive the raw line level here.
///
/// # Example
///
/// ```rust
/// use rs_repeater::hal::MockCarrierInput;
/// use rs_repeater::traits::{CarrierInput, Level};
///
/// let mut cor = MockCarrierInput::new();
/// assert_eq!(cor.level().unwrap(), Level::Low);
///
/// cor.set_level(Level::High);
/// assert_eq!(cor.level().unwrap(), Level::High);
/// assert_eq!(cor.reads, 2);
/// ```
#[derive(Debug, Default)]
pub struct MockCarrierInput {
    /// Electrical level the next read returns.
    pub line: Level,
    /// Number of times `level` was called.
    pub reads: usize,
}

impl MockCarrierInput {
    /// Creates a new mock input reading low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock input starting at the given level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.line = level;
        self
    }

    /// Sets the level returned by subsequent reads.
    pub fn set_level(&mut self, level: Level) {
        self.line = level;
    }
}

impl CarrierInput for MockCarrierInput {
    type Error = ();

    fn level(&mut self) -> Result<Level, ()> {
        self.reads += 1;
        Ok(self.line)
    }
}

// ============================================================================
// Transmitter Side
// ============================================================================

/// Mock transmitter for testing.
///
/// Records PTT and tone changes for verification. Use the public fields to
/// inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use rs_repeater::hal::MockRadio;
/// use rs_repeater::traits::{Level, Transmitter};
///
/// let mut radio = MockRadio::new();
/// radio.set_ptt(Level::High).unwrap();
/// radio.tone_on(1200).unwrap();
/// radio.tone_off().unwrap();
///
/// assert_eq!(radio.ptt, Level::High);
/// assert_eq!(radio.ptt_changes, 1);
/// assert_eq!(radio.tone, None);
/// assert_eq!(radio.tone_starts, 1);
/// assert_eq!(radio.tone_stops, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockRadio {
    /// Electrical level last written to the PTT line.
    pub ptt: Level,
    /// Tone currently keyed, if any.
    pub tone: Option<u32>,
    /// Number of times `set_ptt` was called.
    pub ptt_changes: usize,
    /// Number of times `tone_on` was called.
    pub tone_starts: usize,
    /// Number of times `tone_off` was called.
    pub tone_stops: usize,
}

impl MockRadio {
    /// Creates a new mock radio with PTT low and tone off.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transmitter for MockRadio {
    type Error = ();

    fn set_ptt(&mut self, level: Level) -> Result<(), ()> {
        self.ptt = level;
        self.ptt_changes += 1;
        Ok(())
    }

    fn tone_on(&mut self, freq_hz: u32) -> Result<(), ()> {
        self.tone = Some(freq_hz);
        self.tone_starts += 1;
        Ok(())
    }

    fn tone_off(&mut self) -> Result<(), ()> {
        self.tone = None;
        self.tone_stops += 1;
        Ok(())
    }
}

/// Mock carrier indicator for testing.
///
/// # Example
///
/// ```rust
/// use rs_repeater::hal::MockCarrierLed;
/// use rs_repeater::traits::CarrierIndicator;
///
/// let mut led = MockCarrierLed::new();
/// led.set_active(true).unwrap();
/// assert!(led.active);
/// assert_eq!(led.changes, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockCarrierLed {
    /// Whether the indicator is lit.
    pub active: bool,
    /// Number of times `set_active` was called.
    pub changes: usize,
}

impl MockCarrierLed {
    /// Creates a new mock indicator, unlit.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CarrierIndicator for MockCarrierLed {
    type Error = ();

    fn set_active(&mut self, active: bool) -> Result<(), ()> {
        self.active = active;
        self.changes += 1;
        Ok(())
    }
}

// ============================================================================
// Time
// ============================================================================

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use rs_repeater::hal::MockClock;
/// use rs_repeater::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockCarrierInput Tests
    // =========================================================================

    #[test]
    fn mock_carrier_input_default() {
        let mut cor = MockCarrierInput::new();
        assert_eq!(cor.level().unwrap(), Level::Low);
        assert_eq!(cor.reads, 1);
    }

    #[test]
    fn mock_carrier_input_set_level() {
        let mut cor = MockCarrierInput::new();
        cor.set_level(Level::High);
        assert_eq!(cor.level().unwrap(), Level::High);

        cor.set_level(Level::Low);
        assert_eq!(cor.level().unwrap(), Level::Low);
        assert_eq!(cor.reads, 2);
    }

    #[test]
    fn mock_carrier_input_with_level() {
        let mut cor = MockCarrierInput::new().with_level(Level::High);
        assert_eq!(cor.level().unwrap(), Level::High);
    }

    // =========================================================================
    // MockRadio Tests
    // =========================================================================

    #[test]
    fn mock_radio_default() {
        let radio = MockRadio::new();
        assert_eq!(radio.ptt, Level::Low);
        assert_eq!(radio.tone, None);
        assert_eq!(radio.ptt_changes, 0);
        assert_eq!(radio.tone_starts, 0);
        assert_eq!(radio.tone_stops, 0);
    }

    #[test]
    fn mock_radio_ptt() {
        let mut radio = MockRadio::new();
        radio.set_ptt(Level::High).unwrap();
        assert_eq!(radio.ptt, Level::High);
        assert_eq!(radio.ptt_changes, 1);

        radio.set_ptt(Level::Low).unwrap();
        assert_eq!(radio.ptt, Level::Low);
        assert_eq!(radio.ptt_changes, 2);
    }

    #[test]
    fn mock_radio_tone() {
        let mut radio = MockRadio::new();
        radio.tone_on(1200).unwrap();
        assert_eq!(radio.tone, Some(1200));

        radio.tone_on(800).unwrap();
        assert_eq!(radio.tone, Some(800));
        assert_eq!(radio.tone_starts, 2);

        radio.tone_off().unwrap();
        assert_eq!(radio.tone, None);
        assert_eq!(radio.tone_stops, 1);
    }

    #[test]
    fn mock_radio_set_tone_dispatch() {
        let mut radio = MockRadio::new();
        radio.set_tone(Some(1000)).unwrap();
        assert_eq!(radio.tone, Some(1000));
        assert_eq!(radio.tone_starts, 1);

        radio.set_tone(None).unwrap();
        assert_eq!(radio.tone, None);
        assert_eq!(radio.tone_stops, 1);
    }

    // =========================================================================
    // MockCarrierLed Tests
    // =========================================================================

    #[test]
    fn mock_carrier_led() {
        let mut led = MockCarrierLed::new();
        assert!(!led.active);

        led.set_active(true).unwrap();
        assert!(led.active);

        led.set_active(false).unwrap();
        assert!(!led.active);
        assert_eq!(led.changes, 2);
    }

    // =========================================================================
    // MockClock Tests
    // =========================================================================

    #[test]
    fn mock_clock_default() {
        let clock = MockClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn mock_clock_set_and_advance() {
        let mut clock = MockClock::new();
        clock.set(1000);
        assert_eq!(clock.now_ms(), 1000);

        clock.advance(500);
        assert_eq!(clock.now_ms(), 1500);
    }
}
