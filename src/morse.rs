//! Morse encoding of the station call sign.
//!
//! Turns a call-sign string into the flat element sequence the
//! [`AudioSequencer`](crate::sequencer::AudioSequencer) plays as the CW ID.
//! Each character becomes a run of key-down elements (dits and dahs) closed
//! by a single gap element, so `"N0S"` encodes as
//! `3,1,0, 3,3,3,3,3,0, 1,1,1,0` in key units.
//!
//! Characters without a pattern (anything outside A-Z and 0-9) contribute
//! just the closing gap, which reads as a space on the air. Configuration
//! validation rejects such characters up front
//! (see [`RepeaterConfig::validate`](crate::config::RepeaterConfig::validate)),
//! so this fallback only matters for unvalidated input.

/// Upper bound on an encoded ID sequence.
///
/// Sized for a 16-character call sign where every character is a digit
/// (five key-downs plus the gap terminator).
pub const MAX_ID_ELEMENTS: usize = 96;

/// A bounded, encoded ID sequence.
pub type ElementSequence = heapless::Vec<MorseElement, MAX_ID_ELEMENTS>;

/// One timing element of a CW transmission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MorseElement {
    /// Inter-character gap (key up).
    Gap,
    /// Short key-down, one unit.
    Dit,
    /// Long key-down, three units.
    Dah,
}

impl MorseElement {
    /// Key-down duration in CW units: 0 for a gap, 1 for a dit, 3 for a dah.
    #[inline]
    pub const fn key_units(self) -> u8 {
        match self {
            MorseElement::Gap => 0,
            MorseElement::Dit => 1,
            MorseElement::Dah => 3,
        }
    }

    /// True if the element keys the tone.
    #[inline]
    pub const fn is_key(self) -> bool {
        !matches!(self, MorseElement::Gap)
    }
}

/// Returns the key-down pattern for a character, or `None` if it has no
/// Morse representation.
///
/// Patterns are strings over `{'1', '3'}`: one digit per element, `'1'` a
/// dit and `'3'` a dah. Lookup is case-insensitive for letters.
pub const fn element_pattern(c: char) -> Option<&'static str> {
    Some(match c.to_ascii_uppercase() {
        'A' => "13",
        'B' => "3111",
        'C' => "3131",
        'D' => "311",
        'E' => "1",
        'F' => "1131",
        'G' => "331",
        'H' => "1111",
        'I' => "11",
        'J' => "1333",
        'K' => "313",
        'L' => "1311",
        'M' => "33",
        'N' => "31",
        'O' => "333",
        'P' => "1331",
        'Q' => "3313",
        'R' => "131",
        'S' => "111",
        'T' => "3",
        'U' => "113",
        'V' => "1113",
        'W' => "133",
        'X' => "3113",
        'Y' => "3133",
        'Z' => "3311",
        '0' => "33333",
        '1' => "13333",
        '2' => "11333",
        '3' => "11133",
        '4' => "11113",
        '5' => "11111",
        '6' => "31111",
        '7' => "33111",
        '8' => "33311",
        '9' => "33331",
        _ => return None,
    })
}

/// Errors produced while encoding a call sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeError {
    /// The encoded sequence would not fit the element buffer.
    Overflow {
        /// Capacity of the buffer that was exceeded.
        capacity: usize,
    },
}

impl core::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeError::Overflow { capacity } => {
                write!(f, "encoded ID exceeds {capacity} elements")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Encodes a call sign into its flat element sequence.
///
/// Each character contributes its pattern followed by one [`Gap`]
/// terminator; characters without a pattern contribute only the gap. No
/// separators are inserted beyond those terminators. Overflowing the
/// element buffer is an error, never a silent truncation.
///
/// [`Gap`]: MorseElement::Gap
///
/// # Examples
///
/// ```
/// use rs_repeater::morse::{encode_call_sign, MorseElement};
///
/// let id = encode_call_sign("SOS").unwrap();
/// let units: Vec<u8> = id.iter().map(|e| e.key_units()).collect();
/// assert_eq!(units, [1, 1, 1, 0, 3, 3, 3, 0, 1, 1, 1, 0]);
/// ```
pub fn encode_call_sign(call_sign: &str) -> Result<ElementSequence, EncodeError> {
    let mut sequence = ElementSequence::new();
    let overflow = EncodeError::Overflow {
        capacity: MAX_ID_ELEMENTS,
    };

    for c in call_sign.chars() {
        if let Some(pattern) = element_pattern(c) {
            for key in pattern.bytes() {
                let element = if key == b'1' {
                    MorseElement::Dit
                } else {
                    MorseElement::Dah
                };
                sequence.push(element).map_err(|_| overflow)?;
            }
        }
        sequence.push(MorseElement::Gap).map_err(|_| overflow)?;
    }

    Ok(sequence)
}
