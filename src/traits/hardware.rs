//! Hardware abstraction traits for the repeater's radio-side I/O.
//!
//! This module defines the core hardware interfaces that allow rs-repeater to
//! work across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`CarrierInput`] | Receiver carrier-detect (COR) line |
//! | [`Transmitter`] | PTT key line plus the audio tone feed |
//! | [`CarrierIndicator`] | Carrier-activity LED |
//! | [`Clock`] | Time source for `no_std` environments |
//!
//! All pin-level traits speak raw electrical [`Level`]s; the controller
//! applies the configured [`Polarity`](crate::config::Polarity) before any
//! logical ON/OFF comparison, so implementations never need to know which
//! way a line is wired.
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations from
//! [`crate::hal::mock`]. For ESP32 hardware, use the implementations from
//! `hal::esp32` (requires `esp32` feature).

/// Electrical level of a digital line.
///
/// Raw pin state, independent of whether the signal it carries is
/// active-high or active-low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Level {
    /// Logic low.
    #[default]
    Low,
    /// Logic high.
    High,
}

impl Level {
    /// Returns the opposite level.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_repeater::traits::Level;
    ///
    /// assert_eq!(Level::Low.inverted(), Level::High);
    /// assert_eq!(Level::High.inverted(), Level::Low);
    /// ```
    #[inline]
    pub const fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Returns the level as a lowercase string, for log output.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::High => "high",
        }
    }
}

/// Receiver carrier-detect (COR) input.
///
/// One digital line from the receiver that asserts while a signal is being
/// received. Wiring differs between radios, so the electrical sense of
/// "asserted" is configuration, not part of this trait: implementations
/// return the raw level and nothing else.
///
/// # Implementation Notes
///
/// - Reads should be cheap; the control loop samples every tick.
/// - Debouncing belongs to the controller, not the implementation.
pub trait CarrierInput {
    /// Error type for pin reads.
    type Error;

    /// Reads the current electrical level of the carrier-detect line.
    fn level(&mut self) -> Result<Level, Self::Error>;
}

/// Transmitter keying and audio output.
///
/// Bundles the two lines the controller drives on the transmitter: the PTT
/// key and the tone source feeding its audio input (used for the CW ID and
/// the courtesy beep).
///
/// # Implementation Notes
///
/// - `set_ptt` receives a raw electrical level; polarity is resolved by the
///   caller.
/// - `tone_on` may be called with a new frequency while a tone is already
///   sounding; implementations should retune without an intermediate gap.
/// - On hardware without a programmable oscillator the frequency may be
///   ignored and the tone pin simply keyed (the original controller did
///   exactly that, reserving the frequency for a future DDS).
///
/// # Example Implementation
///
/// ```rust
/// use rs_repeater::traits::{Level, Transmitter};
///
/// struct PinRadio {
///     ptt: Level,
///     tone: Option<u32>,
/// }
///
/// impl Transmitter for PinRadio {
///     type Error = ();
///
///     fn set_ptt(&mut self, level: Level) -> Result<(), ()> {
///         self.ptt = level;
///         Ok(())
///     }
///
///     fn tone_on(&mut self, freq_hz: u32) -> Result<(), ()> {
///         self.tone = Some(freq_hz);
///         Ok(())
///     }
///
///     fn tone_off(&mut self) -> Result<(), ()> {
///         self.tone = None;
///         Ok(())
///     }
/// }
/// ```
pub trait Transmitter {
    /// Error type for transmitter operations.
    type Error;

    /// Drives the PTT line to the given electrical level.
    fn set_ptt(&mut self, level: Level) -> Result<(), Self::Error>;

    /// Starts (or retunes) the audio tone at the given frequency.
    fn tone_on(&mut self, freq_hz: u32) -> Result<(), Self::Error>;

    /// Silences the audio tone.
    fn tone_off(&mut self) -> Result<(), Self::Error>;

    /// Applies a sequencer keying command.
    ///
    /// `Some(hz)` keys the tone, `None` silences it.
    fn set_tone(&mut self, tone: Option<u32>) -> Result<(), Self::Error> {
        match tone {
            Some(hz) => self.tone_on(hz),
            None => self.tone_off(),
        }
    }
}

/// Carrier-activity indicator output.
///
/// Typically a panel LED that mirrors the logical carrier state so an
/// operator can see receive activity at a glance. Driven by the binary's
/// control loop each tick; purely informational, never consulted by the
/// state machine.
pub trait CarrierIndicator {
    /// Error type for indicator writes.
    type Error;

    /// Lights or clears the indicator.
    fn set_active(&mut self, active: bool) -> Result<(), Self::Error>;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for debounce and playback
/// timing; the controller derives the whole-second timer tick from it.
/// On desktop, this can wrap `std::time::Instant`. On embedded, use a
/// hardware timer.
///
/// # Example
///
/// ```rust
/// use rs_repeater::traits::Clock;
/// use rs_repeater::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}
