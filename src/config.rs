//! Repeater configuration.
//!
//! One immutable configuration object consumed at startup. Uses
//! `heapless::String` for `no_std` compatibility while remaining ergonomic
//! on desktop with `std`. Defaults reproduce a conventional analog repeater
//! setup: 10-minute ID interval, 1-second squelch tail, 50 ms COR debounce,
//! 20 WPM CW at 1200 Hz, single 1000 Hz courtesy beep, negative-logic COR
//! and positive-logic PTT.
//!
//! # Example
//!
//! ```rust
//! use rs_repeater::config::{BeepKind, Polarity, RepeaterConfig};
//!
//! let config = RepeaterConfig::default()
//!     .with_call_sign("N0CALL")
//!     .with_id_interval_s(600)
//!     .with_beep(BeepKind::Dedoop)
//!     .with_cor_polarity(Polarity::ActiveLow);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::morse::element_pattern;
use crate::traits::Level;
use heapless::String as HString;

/// Maximum length for the configured call sign.
pub const MAX_CALL_SIGN: usize = 16;

/// Type alias for the call-sign string.
pub type CallSignString = HString<MAX_CALL_SIGN>;

/// Create a [`CallSignString`] from a `&str`, truncating if too long.
pub fn call_sign_string(s: &str) -> CallSignString {
    let mut hs = CallSignString::new();
    let take = s.len().min(MAX_CALL_SIGN);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Signal polarity
// ============================================================================

/// Active sense of a digital signal.
///
/// COR and PTT wiring varies between radios; each line carries its own
/// polarity so "ON" can map to either electrical level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Polarity {
    /// The signal is ON when the line is electrically high.
    ActiveHigh,
    /// The signal is ON when the line is electrically low.
    ActiveLow,
}

impl Polarity {
    /// Interprets a raw electrical level under this polarity.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_repeater::config::Polarity;
    /// use rs_repeater::traits::Level;
    ///
    /// assert!(Polarity::ActiveLow.is_active(Level::Low));
    /// assert!(!Polarity::ActiveLow.is_active(Level::High));
    /// assert!(Polarity::ActiveHigh.is_active(Level::High));
    /// ```
    #[inline]
    pub const fn is_active(self, level: Level) -> bool {
        match (self, level) {
            (Polarity::ActiveHigh, Level::High) => true,
            (Polarity::ActiveLow, Level::Low) => true,
            _ => false,
        }
    }

    /// Maps a logical state back to the electrical level that expresses it.
    #[inline]
    pub const fn level_for(self, active: bool) -> Level {
        match (self, active) {
            (Polarity::ActiveHigh, true) | (Polarity::ActiveLow, false) => Level::High,
            (Polarity::ActiveHigh, false) | (Polarity::ActiveLow, true) => Level::Low,
        }
    }

    /// Returns the polarity as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Polarity::ActiveHigh => "active-high",
            Polarity::ActiveLow => "active-low",
        }
    }
}

// ============================================================================
// Courtesy beep styles
// ============================================================================

/// Courtesy beep pattern played at the start of the squelch tail.
///
/// The two-tone names read the pattern aloud: `Dedoop` is a long high tone
/// followed by a short low one, `Dodeep` the reverse, `Dedeep` two short
/// high tones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BeepKind {
    /// No beep; the tail is silent.
    None,
    /// One short tone-1 beep.
    #[default]
    Single,
    /// Tone 1 doubled, pause, tone 2.
    Dedoop,
    /// Tone 2 doubled, pause, tone 1.
    Dodeep,
    /// Tone 1, pause, tone 1.
    Dedeep,
}

impl BeepKind {
    /// Returns the beep kind as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BeepKind::None => "none",
            BeepKind::Single => "single",
            BeepKind::Dedoop => "dedoop",
            BeepKind::Dodeep => "dodeep",
            BeepKind::Dedeep => "dedeep",
        }
    }
}

// ============================================================================
// Main config
// ============================================================================

/// Complete repeater configuration.
///
/// Validated once at controller construction; the controller keeps a copy
/// and never consults anything else at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeaterConfig {
    /// Station call sign transmitted as the CW ID.
    pub call_sign: CallSignString,
    /// Seconds between required identifications.
    pub id_interval_s: u64,
    /// Seconds of squelch tail after the carrier drops.
    pub squelch_tail_s: u64,
    /// COR settle interval in milliseconds.
    pub debounce_ms: u64,
    /// CW unit (dit) duration in milliseconds. 50 ms is roughly 20 WPM.
    pub cw_unit_ms: u64,
    /// Inter-element spacing multiplier in tenths, applied to gap
    /// elements (13 = 1.3 units of silence per gap).
    pub gap_factor_tenths: u64,
    /// Fixed key-up guard after every element, in milliseconds.
    pub element_gap_ms: u64,
    /// Silence bracketing the ID and beep sequences, in milliseconds.
    pub guard_ms: u64,
    /// PTT hang time after the ID before unkeying, in milliseconds.
    pub hang_ms: u64,
    /// Duration of one courtesy-beep unit in milliseconds.
    pub beep_unit_ms: u64,
    /// CW ID tone frequency in hertz.
    pub id_tone_hz: u32,
    /// Primary courtesy-beep frequency in hertz.
    pub beep_tone1_hz: u32,
    /// Secondary courtesy-beep frequency in hertz.
    pub beep_tone2_hz: u32,
    /// Courtesy beep style.
    pub beep: BeepKind,
    /// Active sense of the carrier-detect input.
    pub cor_polarity: Polarity,
    /// Active sense of the PTT output.
    pub ptt_polarity: Polarity,
}

impl Default for RepeaterConfig {
    fn default() -> Self {
        Self {
            call_sign: call_sign_string("N0CALL"),
            id_interval_s: 600,
            squelch_tail_s: 1,
            debounce_ms: 50,
            cw_unit_ms: 50,
            gap_factor_tenths: 13,
            element_gap_ms: 30,
            guard_ms: 200,
            hang_ms: 500,
            beep_unit_ms: 100,
            id_tone_hz: 1200,
            beep_tone1_hz: 1000,
            beep_tone2_hz: 800,
            beep: BeepKind::Single,
            cor_polarity: Polarity::ActiveLow,
            ptt_polarity: Polarity::ActiveHigh,
        }
    }
}

impl RepeaterConfig {
    /// Set the station call sign.
    pub fn with_call_sign(mut self, call_sign: &str) -> Self {
        self.call_sign = call_sign_string(call_sign);
        self
    }

    /// Set the identification interval in seconds.
    pub fn with_id_interval_s(mut self, seconds: u64) -> Self {
        self.id_interval_s = seconds;
        self
    }

    /// Set the squelch-tail interval in seconds.
    pub fn with_squelch_tail_s(mut self, seconds: u64) -> Self {
        self.squelch_tail_s = seconds;
        self
    }

    /// Set the COR settle interval in milliseconds.
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the CW unit duration in milliseconds.
    pub fn with_cw_unit_ms(mut self, ms: u64) -> Self {
        self.cw_unit_ms = ms;
        self
    }

    /// Set the courtesy beep style.
    pub fn with_beep(mut self, beep: BeepKind) -> Self {
        self.beep = beep;
        self
    }

    /// Set the courtesy-beep unit duration in milliseconds.
    pub fn with_beep_unit_ms(mut self, ms: u64) -> Self {
        self.beep_unit_ms = ms;
        self
    }

    /// Set the ID tone frequency in hertz.
    pub fn with_id_tone_hz(mut self, hz: u32) -> Self {
        self.id_tone_hz = hz;
        self
    }

    /// Set both courtesy-beep frequencies in hertz.
    pub fn with_beep_tones(mut self, tone1_hz: u32, tone2_hz: u32) -> Self {
        self.beep_tone1_hz = tone1_hz;
        self.beep_tone2_hz = tone2_hz;
        self
    }

    /// Set the carrier-detect polarity.
    pub fn with_cor_polarity(mut self, polarity: Polarity) -> Self {
        self.cor_polarity = polarity;
        self
    }

    /// Set the PTT polarity.
    pub fn with_ptt_polarity(mut self, polarity: Polarity) -> Self {
        self.ptt_polarity = polarity;
        self
    }

    /// Checks the configuration for values the controller cannot run with.
    ///
    /// The call sign must be non-empty and contain only characters with a
    /// Morse pattern (spaces are allowed and read as pauses); the debounce
    /// and tone unit durations must be non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.call_sign.is_empty() {
            return Err(ConfigError::EmptyCallSign);
        }
        for c in self.call_sign.chars() {
            if c != ' ' && element_pattern(c).is_none() {
                return Err(ConfigError::UnsupportedCallSignChar { ch: c });
            }
        }
        if self.debounce_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "debounce_ms",
            });
        }
        if self.cw_unit_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "cw_unit_ms",
            });
        }
        if self.beep_unit_ms == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "beep_unit_ms",
            });
        }
        Ok(())
    }
}

/// Errors found while validating a configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The call sign is empty; a station must identify.
    EmptyCallSign,
    /// The call sign contains a character with no Morse pattern.
    UnsupportedCallSignChar {
        /// The offending character.
        ch: char,
    },
    /// A duration field the controller divides time by is zero.
    ZeroDuration {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The encoded ID does not fit the element or segment buffers.
    IdTooLong {
        /// Capacity of the buffer that was exceeded.
        capacity: usize,
    },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyCallSign => write!(f, "call sign is empty"),
            ConfigError::UnsupportedCallSignChar { ch } => {
                write!(f, "call sign character {ch:?} has no Morse pattern")
            }
            ConfigError::ZeroDuration { field } => write!(f, "{field} must be non-zero"),
            ConfigError::IdTooLong { capacity } => {
                write!(f, "encoded ID exceeds {capacity} elements")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn defaults_match_conventional_setup() {
        let config = RepeaterConfig::default();
        assert_eq!(config.call_sign.as_str(), "N0CALL");
        assert_eq!(config.id_interval_s, 600);
        assert_eq!(config.squelch_tail_s, 1);
        assert_eq!(config.debounce_ms, 50);
        assert_eq!(config.cw_unit_ms, 50);
        assert_eq!(config.gap_factor_tenths, 13);
        assert_eq!(config.element_gap_ms, 30);
        assert_eq!(config.guard_ms, 200);
        assert_eq!(config.hang_ms, 500);
        assert_eq!(config.beep_unit_ms, 100);
        assert_eq!(config.id_tone_hz, 1200);
        assert_eq!(config.beep_tone1_hz, 1000);
        assert_eq!(config.beep_tone2_hz, 800);
        assert_eq!(config.beep, BeepKind::Single);
        assert_eq!(config.cor_polarity, Polarity::ActiveLow);
        assert_eq!(config.ptt_polarity, Polarity::ActiveHigh);
    }

    #[test]
    fn default_config_validates() {
        assert!(RepeaterConfig::default().validate().is_ok());
    }

    // =========================================================================
    // Builders
    // =========================================================================

    #[test]
    fn builders_chain() {
        let config = RepeaterConfig::default()
            .with_call_sign("W1AW")
            .with_id_interval_s(540)
            .with_squelch_tail_s(2)
            .with_debounce_ms(25)
            .with_cw_unit_ms(60)
            .with_beep(BeepKind::Dodeep)
            .with_beep_unit_ms(80)
            .with_id_tone_hz(800)
            .with_beep_tones(900, 700)
            .with_cor_polarity(Polarity::ActiveHigh)
            .with_ptt_polarity(Polarity::ActiveLow);

        assert_eq!(config.call_sign.as_str(), "W1AW");
        assert_eq!(config.id_interval_s, 540);
        assert_eq!(config.squelch_tail_s, 2);
        assert_eq!(config.debounce_ms, 25);
        assert_eq!(config.cw_unit_ms, 60);
        assert_eq!(config.beep, BeepKind::Dodeep);
        assert_eq!(config.beep_unit_ms, 80);
        assert_eq!(config.id_tone_hz, 800);
        assert_eq!(config.beep_tone1_hz, 900);
        assert_eq!(config.beep_tone2_hz, 700);
        assert_eq!(config.cor_polarity, Polarity::ActiveHigh);
        assert_eq!(config.ptt_polarity, Polarity::ActiveLow);
    }

    #[test]
    fn call_sign_string_truncates_to_capacity() {
        let s = call_sign_string("ABCDEFGHIJKLMNOPQRSTU");
        assert_eq!(s.len(), MAX_CALL_SIGN);
        assert_eq!(s.as_str(), "ABCDEFGHIJKLMNOP");
    }

    // =========================================================================
    // Polarity
    // =========================================================================

    #[test]
    fn polarity_interprets_levels() {
        assert!(Polarity::ActiveHigh.is_active(Level::High));
        assert!(!Polarity::ActiveHigh.is_active(Level::Low));
        assert!(Polarity::ActiveLow.is_active(Level::Low));
        assert!(!Polarity::ActiveLow.is_active(Level::High));
    }

    #[test]
    fn polarity_round_trips_through_levels() {
        for polarity in [Polarity::ActiveHigh, Polarity::ActiveLow] {
            for active in [false, true] {
                assert_eq!(polarity.is_active(polarity.level_for(active)), active);
            }
        }
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn empty_call_sign_rejected() {
        let config = RepeaterConfig::default().with_call_sign("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyCallSign));
    }

    #[test]
    fn unsupported_call_sign_char_named_in_error() {
        let config = RepeaterConfig::default().with_call_sign("N0-CALL");
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnsupportedCallSignChar { ch: '-' })
        );
    }

    #[test]
    fn space_in_call_sign_allowed() {
        let config = RepeaterConfig::default().with_call_sign("N0S RPT");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_durations_rejected() {
        let config = RepeaterConfig::default().with_debounce_ms(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDuration {
                field: "debounce_ms"
            })
        ));

        let config = RepeaterConfig::default().with_cw_unit_ms(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDuration { field: "cw_unit_ms" })
        ));

        let config = RepeaterConfig::default().with_beep_unit_ms(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDuration {
                field: "beep_unit_ms"
            })
        ));
    }
}
