//! Resumable tone playback for the CW ID and courtesy beep.
//!
//! Playback is a schedule of `(tone, duration)` segments walked by a small
//! state machine: the controller calls [`AudioSequencer::tick`] once per
//! loop pass and applies the returned keying command to the transmitter.
//! Nothing blocks, so the carrier input stays live for the whole sequence;
//! tone edges land on loop-cadence boundaries, which is well inside what a
//! listener can hear at repeater CW speeds.
//!
//! Schedules are built up front ([`build_id_schedule`],
//! [`build_beep_schedule`]) so capacity problems surface at configuration
//! time rather than mid-transmission.

use crate::config::{BeepKind, RepeaterConfig};
use crate::morse::MorseElement;

/// Upper bound on a playback schedule.
///
/// Sized for a full-length ID (two segments per keyed element) plus the
/// guard brackets, courtesy beep, and hang time.
pub const MAX_SEGMENTS: usize = 256;

/// A bounded playback schedule.
pub type Schedule = heapless::Vec<Segment, MAX_SEGMENTS>;

/// One stretch of keyed tone or silence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Tone frequency in hertz, or `None` for silence.
    pub tone_hz: Option<u32>,
    /// How long the segment lasts.
    pub duration_ms: u64,
}

impl Segment {
    /// A keyed tone segment.
    #[inline]
    pub const fn tone(freq_hz: u32, duration_ms: u64) -> Self {
        Self {
            tone_hz: Some(freq_hz),
            duration_ms,
        }
    }

    /// A silent segment.
    #[inline]
    pub const fn silence(duration_ms: u64) -> Self {
        Self {
            tone_hz: None,
            duration_ms,
        }
    }
}

/// Errors produced while building a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceError {
    /// The schedule would not fit the segment buffer.
    Overflow {
        /// Capacity of the buffer that was exceeded.
        capacity: usize,
    },
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::Overflow { capacity } => {
                write!(f, "playback schedule exceeds {capacity} segments")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}

fn push(schedule: &mut Schedule, segment: Segment) -> Result<(), SequenceError> {
    schedule.push(segment).map_err(|_| SequenceError::Overflow {
        capacity: MAX_SEGMENTS,
    })
}

/// Builds the courtesy-beep schedule for the configured style.
///
/// Every style is bracketed by the leading guard silence and a short
/// trailing gap; [`BeepKind::None`] produces just the brackets, keeping
/// tail timing identical whether or not a beep sounds.
pub fn build_beep_schedule(config: &RepeaterConfig) -> Result<Schedule, SequenceError> {
    let mut schedule = Schedule::new();
    let unit = config.beep_unit_ms;
    let tone1 = config.beep_tone1_hz;
    let tone2 = config.beep_tone2_hz;

    push(&mut schedule, Segment::silence(config.guard_ms))?;

    match config.beep {
        BeepKind::None => {}
        BeepKind::Single => {
            push(&mut schedule, Segment::tone(tone1, unit))?;
        }
        BeepKind::Dedoop => {
            push(&mut schedule, Segment::tone(tone1, unit * 2))?;
            push(&mut schedule, Segment::silence(unit))?;
            push(&mut schedule, Segment::tone(tone2, unit))?;
        }
        BeepKind::Dodeep => {
            push(&mut schedule, Segment::tone(tone2, unit * 2))?;
            push(&mut schedule, Segment::silence(unit))?;
            push(&mut schedule, Segment::tone(tone1, unit))?;
        }
        BeepKind::Dedeep => {
            push(&mut schedule, Segment::tone(tone1, unit))?;
            push(&mut schedule, Segment::silence(unit))?;
            push(&mut schedule, Segment::tone(tone1, unit))?;
        }
    }

    push(&mut schedule, Segment::silence(config.element_gap_ms))?;
    Ok(schedule)
}

/// Builds the full identification schedule from an encoded call sign.
///
/// Layout: guard silence, the elements (keyed elements sound for
/// `key_units × cw_unit_ms` followed by the fixed element gap; gap
/// elements are `cw_unit_ms × gap factor` of silence plus the same fixed
/// gap), guard silence, the courtesy beep, and the PTT hang time. PTT
/// itself is keyed by the controller around the whole schedule.
pub fn build_id_schedule(
    elements: &[MorseElement],
    config: &RepeaterConfig,
) -> Result<Schedule, SequenceError> {
    let mut schedule = Schedule::new();
    let unit = config.cw_unit_ms;
    let gap_silence = unit * config.gap_factor_tenths / 10;

    push(&mut schedule, Segment::silence(config.guard_ms))?;

    for element in elements {
        if element.is_key() {
            let duration = u64::from(element.key_units()) * unit;
            push(&mut schedule, Segment::tone(config.id_tone_hz, duration))?;
            push(&mut schedule, Segment::silence(config.element_gap_ms))?;
        } else {
            push(
                &mut schedule,
                Segment::silence(gap_silence + config.element_gap_ms),
            )?;
        }
    }

    push(&mut schedule, Segment::silence(config.guard_ms))?;

    for segment in build_beep_schedule(config)? {
        push(&mut schedule, segment)?;
    }

    push(&mut schedule, Segment::silence(config.hang_ms))?;
    Ok(schedule)
}

/// Total play time of a schedule.
pub fn schedule_duration_ms(schedule: &Schedule) -> u64 {
    schedule.iter().map(|s| s.duration_ms).sum()
}

/// Keying command reported by [`AudioSequencer::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playback {
    /// Frequency that should be sounding right now, or `None` for silence.
    pub tone: Option<u32>,
    /// True once the schedule has run out (or none is loaded).
    pub finished: bool,
}

/// Walks a [`Schedule`] against the millisecond clock.
///
/// The sequencer keeps the absolute end time of the current segment and
/// advances past any segments the clock has already consumed, so a slow or
/// jittery control loop loses alignment but never stalls playback.
///
/// # Example
///
/// ```
/// use rs_repeater::sequencer::{AudioSequencer, Schedule, Segment};
///
/// let mut schedule = Schedule::new();
/// schedule.push(Segment::tone(1000, 100)).unwrap();
/// schedule.push(Segment::silence(50)).unwrap();
///
/// let mut seq = AudioSequencer::new();
/// seq.start(&schedule, 0);
///
/// assert_eq!(seq.tick(10).tone, Some(1000));
/// assert_eq!(seq.tick(120).tone, None); // inside the trailing silence
/// assert!(seq.tick(150).finished);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AudioSequencer {
    schedule: Schedule,
    index: usize,
    segment_end_ms: u64,
    running: bool,
}

impl AudioSequencer {
    /// Creates an idle sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a schedule to begin at `now_ms`.
    ///
    /// An empty schedule finishes on the first tick.
    pub fn start(&mut self, schedule: &Schedule, now_ms: u64) {
        self.schedule = schedule.clone();
        self.index = 0;
        self.running = !self.schedule.is_empty();
        if self.running {
            self.segment_end_ms = now_ms.saturating_add(self.schedule[0].duration_ms);
        }
    }

    /// Stops playback immediately, discarding the rest of the schedule.
    pub fn abort(&mut self) {
        self.running = false;
        self.schedule.clear();
    }

    /// True while a schedule is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances to `now_ms` and reports the current keying command.
    pub fn tick(&mut self, now_ms: u64) -> Playback {
        if !self.running {
            return Playback {
                tone: None,
                finished: true,
            };
        }

        while now_ms >= self.segment_end_ms {
            self.index += 1;
            if self.index >= self.schedule.len() {
                self.running = false;
                return Playback {
                    tone: None,
                    finished: true,
                };
            }
            self.segment_end_ms = self
                .segment_end_ms
                .saturating_add(self.schedule[self.index].duration_ms);
        }

        Playback {
            tone: self.schedule[self.index].tone_hz,
            finished: false,
        }
    }
}
