//! The repeater state machine.
//!
//! This module provides [`RepeaterController`], the central component that
//! arbitrates the transmitter's PTT line against the receiver's carrier
//! detect, runs the squelch tail and courtesy beep, and keys the periodic
//! CW identification.
//!
//! # Overview
//!
//! The controller:
//! - Debounces carrier transitions before acting on them
//! - Keys PTT while a repeated signal or the squelch tail is active
//! - Plays the courtesy beep at the start of the tail
//! - Identifies in CW when due, and once right after startup
//! - Emits a `tracing` event per state transition
//!
//! # Example
//!
//! ```rust
//! use rs_repeater::{RepeaterConfig, RepeaterController};
//! use rs_repeater::hal::MockRadio;
//! use rs_repeater::traits::Level;
//!
//! let radio = MockRadio::new();
//! let config = RepeaterConfig::default().with_call_sign("N0CALL");
//! let mut controller = RepeaterController::new(radio, config).unwrap();
//!
//! // Main loop - call update() every tick (e.g., 20ms) with the raw
//! // carrier-detect level. COR is active-low by default, so High = idle.
//! for tick in 0..10 {
//!     let status = controller.update(tick * 20, Level::High).unwrap();
//!     assert!(!status.ptt_asserted);
//! }
//! ```
//!
//! # Tick model
//!
//! `update` performs at most one state transition per call. Intermediate
//! output states (`PttOn`, `PttOff`) park for one tick and then continue to
//! an explicitly tracked pending state, which lets the same keying
//! primitives serve both the initial keyup and the end-of-tail release.
//! Debounce windows and tone playback carry absolute deadlines instead of
//! sleeping, so the carrier input is re-sampled on every tick even while
//! an ID is sounding.

use crate::config::{ConfigError, RepeaterConfig};
use crate::debounce::{DebounceFilter, Verdict};
use crate::morse::{encode_call_sign, EncodeError};
use crate::sequencer::{build_beep_schedule, build_id_schedule, AudioSequencer, Schedule, SequenceError};
use crate::timers::DeadlineTimer;
use crate::traits::{Level, Transmitter};

/// States of the repeater controller.
///
/// `DebounceCorOn` / `DebounceCorOff` hold while a carrier transition
/// settles; `PttOn` / `PttOff` are one-tick output states that continue to
/// the pending state; `SqtBeep` and `Id` persist until their playback
/// schedule finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ControllerState {
    /// Power-on state; logs the startup report and moves to `Idle`.
    Start,
    /// Quiet: no carrier, no tail, PTT released.
    Idle,
    /// A carrier appeared; waiting out the settle window.
    DebounceCorOn,
    /// Asserting PTT, then continuing to the pending state.
    PttOn,
    /// Repeating a signal; waiting for the carrier to drop.
    Ptt,
    /// The carrier dropped; waiting out the settle window.
    DebounceCorOff,
    /// Arming the squelch-tail timer.
    SqtOn,
    /// Courtesy beep playing at the start of the tail.
    SqtBeep,
    /// Holding the tail until its timer expires.
    Sqt,
    /// Tail finished; flagging the pending identification.
    SqtOff,
    /// Releasing PTT, then continuing to the pending state.
    PttOff,
    /// CW identification playing.
    Id,
}

impl ControllerState {
    /// Returns the state name used in log events.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Start => "start",
            ControllerState::Idle => "idle",
            ControllerState::DebounceCorOn => "debounce-cor-on",
            ControllerState::PttOn => "ptt-on",
            ControllerState::Ptt => "ptt",
            ControllerState::DebounceCorOff => "debounce-cor-off",
            ControllerState::SqtOn => "sqt-on",
            ControllerState::SqtBeep => "sqt-beep",
            ControllerState::Sqt => "sqt",
            ControllerState::SqtOff => "sqt-off",
            ControllerState::PttOff => "ptt-off",
            ControllerState::Id => "id",
        }
    }
}

/// Snapshot of the controller for logging, UI, or tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepeaterStatus {
    /// Current state.
    pub state: ControllerState,
    /// State before the most recent transition.
    pub previous: ControllerState,
    /// Logical PTT (true = transmitting).
    pub ptt_asserted: bool,
    /// Logical carrier from the last sample.
    pub carrier: bool,
    /// True while an identification is owed.
    pub needs_id: bool,
    /// Tone currently keyed, if any.
    pub tone: Option<u32>,
}

/// Main repeater controller.
///
/// Owns the transmitter HAL and the complete mutable context: state
/// triple, debounce filter, both deadline timers, playback sequencer, and
/// the NeedsID flag. The carrier input is sampled by the caller's loop and
/// passed in raw; the configured polarities are applied here before any
/// comparison.
///
/// # Type Parameter
///
/// - `T`: The transmitter implementation ([`Transmitter`] trait)
#[derive(Debug)]
pub struct RepeaterController<T: Transmitter> {
    tx: T,
    config: RepeaterConfig,
    state: ControllerState,
    previous: ControllerState,
    pending: ControllerState,
    debounce: DebounceFilter,
    id_timer: DeadlineTimer,
    tail_timer: DeadlineTimer,
    sequencer: AudioSequencer,
    id_schedule: Schedule,
    beep_schedule: Schedule,
    id_element_count: usize,
    needs_id: bool,
    ptt_asserted: bool,
    carrier: bool,
    active_tone: Option<u32>,
}

impl<T: Transmitter> RepeaterController<T> {
    /// Creates a controller, validating the configuration and building the
    /// playback schedules up front.
    ///
    /// The ID deadline starts expired and `NeedsID` set, so the station
    /// identifies as soon as it reaches `Idle` (within the first second of
    /// operation).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration fails validation or
    /// the encoded call sign exceeds the element or segment buffers.
    pub fn new(tx: T, config: RepeaterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let elements = encode_call_sign(config.call_sign.as_str()).map_err(|e| match e {
            EncodeError::Overflow { capacity } => ConfigError::IdTooLong { capacity },
        })?;
        let id_schedule = build_id_schedule(&elements, &config).map_err(|e| match e {
            SequenceError::Overflow { capacity } => ConfigError::IdTooLong { capacity },
        })?;
        let beep_schedule = build_beep_schedule(&config).map_err(|e| match e {
            SequenceError::Overflow { capacity } => ConfigError::IdTooLong { capacity },
        })?;

        Ok(Self {
            tx,
            debounce: DebounceFilter::new(config.debounce_ms),
            id_timer: DeadlineTimer::new(),
            tail_timer: DeadlineTimer::new(),
            sequencer: AudioSequencer::new(),
            id_element_count: elements.len(),
            config,
            id_schedule,
            beep_schedule,
            state: ControllerState::Start,
            previous: ControllerState::Start,
            pending: ControllerState::Idle,
            needs_id: true,
            ptt_asserted: false,
            carrier: false,
            active_tone: None,
        })
    }

    /// Advances the controller by one tick.
    ///
    /// `now_ms` comes from the monotonic clock; `cor_level` is the raw
    /// electrical carrier-detect level, interpreted under the configured
    /// polarity. Performs at most one state transition and applies any PTT
    /// or tone edges to the transmitter.
    pub fn update(&mut self, now_ms: u64, cor_level: Level) -> Result<RepeaterStatus, T::Error> {
        let now_s = now_ms / 1000;
        let carrier = self.config.cor_polarity.is_active(cor_level);
        self.carrier = carrier;
        let from = self.state;

        match self.state {
            ControllerState::Start => {
                self.log_startup();
                self.state = ControllerState::Idle;
            }

            ControllerState::Idle => {
                if carrier {
                    self.debounce.begin(now_ms, true);
                    self.state = ControllerState::DebounceCorOn;
                }
                // The identification check runs second and wins a
                // same-tick race against the carrier.
                if self.id_timer.is_expired(now_s) && self.needs_id {
                    self.debounce.cancel();
                    self.apply_ptt(true)?;
                    self.sequencer.start(&self.id_schedule, now_ms);
                    self.state = ControllerState::Id;
                }
            }

            ControllerState::DebounceCorOn => match self.debounce.poll(now_ms, carrier) {
                None => {}
                Some(Verdict::Stable) => {
                    tracing::info!("carrier up");
                    self.pending = ControllerState::Ptt;
                    self.state = ControllerState::PttOn;
                }
                Some(Verdict::Flake) => {
                    tracing::warn!("carrier flake during keyup");
                    // A flake can arrive here from the tail with PTT
                    // keyed; Idle never transmits.
                    self.apply_ptt(false)?;
                    self.state = ControllerState::Idle;
                }
            },

            ControllerState::PttOn => {
                self.apply_ptt(true)?;
                self.state = self.pending;
            }

            ControllerState::Ptt => {
                if !carrier {
                    self.debounce.begin(now_ms, false);
                    self.state = ControllerState::DebounceCorOff;
                }
            }

            ControllerState::DebounceCorOff => match self.debounce.poll(now_ms, carrier) {
                None => {}
                Some(Verdict::Stable) => {
                    tracing::info!("carrier down");
                    self.state = ControllerState::SqtOn;
                }
                Some(Verdict::Flake) => {
                    tracing::warn!("carrier flake during keydown");
                    self.state = ControllerState::Ptt;
                }
            },

            ControllerState::SqtOn => {
                self.tail_timer.reset(now_s, self.config.squelch_tail_s);
                self.sequencer.start(&self.beep_schedule, now_ms);
                self.state = ControllerState::SqtBeep;
            }

            ControllerState::SqtBeep => {
                if carrier {
                    // The beep is a courtesy; a returning carrier is not.
                    self.sequencer.abort();
                    self.apply_tone(None)?;
                    self.debounce.begin(now_ms, true);
                    self.state = ControllerState::DebounceCorOn;
                } else {
                    let playback = self.sequencer.tick(now_ms);
                    self.apply_tone(playback.tone)?;
                    if playback.finished {
                        self.state = ControllerState::Sqt;
                    }
                }
            }

            ControllerState::Sqt => {
                if self.tail_timer.is_expired(now_s) {
                    self.state = ControllerState::SqtOff;
                }
                // The carrier check runs second and wins a same-tick race
                // against tail expiry.
                if carrier {
                    self.debounce.begin(now_ms, true);
                    self.state = ControllerState::DebounceCorOn;
                }
            }

            ControllerState::SqtOff => {
                self.needs_id = true;
                self.pending = ControllerState::Idle;
                self.state = ControllerState::PttOff;
            }

            ControllerState::PttOff => {
                self.apply_ptt(false)?;
                self.state = self.pending;
            }

            ControllerState::Id => {
                // Identification always runs to completion; the carrier
                // stays sampled and is handled from Idle afterwards.
                let playback = self.sequencer.tick(now_ms);
                self.apply_tone(playback.tone)?;
                if playback.finished {
                    self.apply_ptt(false)?;
                    self.id_timer.reset(now_s, self.config.id_interval_s);
                    self.needs_id = false;
                    tracing::info!("identification complete");
                    self.state = ControllerState::Idle;
                }
            }
        }

        if self.state != from {
            self.previous = from;
            tracing::info!(from = from.as_str(), to = self.state.as_str(), "state");
        }

        Ok(self.status())
    }

    /// Current snapshot.
    pub fn status(&self) -> RepeaterStatus {
        RepeaterStatus {
            state: self.state,
            previous: self.previous,
            ptt_asserted: self.ptt_asserted,
            carrier: self.carrier,
            needs_id: self.needs_id,
            tone: self.active_tone,
        }
    }

    /// Current state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// State before the most recent transition.
    pub fn previous_state(&self) -> ControllerState {
        self.previous
    }

    /// Logical PTT.
    pub fn ptt_asserted(&self) -> bool {
        self.ptt_asserted
    }

    /// Electrical level currently on the PTT line.
    pub fn ptt_level(&self) -> Level {
        self.config.ptt_polarity.level_for(self.ptt_asserted)
    }

    /// True while an identification is owed.
    pub fn needs_id(&self) -> bool {
        self.needs_id
    }

    /// Logical carrier from the last sample.
    pub fn carrier(&self) -> bool {
        self.carrier
    }

    /// The configuration the controller runs with.
    pub fn config(&self) -> &RepeaterConfig {
        &self.config
    }

    /// The owned transmitter, for inspection.
    pub fn transmitter(&self) -> &T {
        &self.tx
    }

    fn apply_ptt(&mut self, asserted: bool) -> Result<(), T::Error> {
        if self.ptt_asserted != asserted {
            let level = self.config.ptt_polarity.level_for(asserted);
            self.tx.set_ptt(level)?;
            self.ptt_asserted = asserted;
            tracing::info!(on = asserted, "ptt");
        }
        Ok(())
    }

    fn apply_tone(&mut self, tone: Option<u32>) -> Result<(), T::Error> {
        if self.active_tone != tone {
            self.tx.set_tone(tone)?;
            self.active_tone = tone;
        }
        Ok(())
    }

    fn log_startup(&self) {
        tracing::info!(
            call_sign = self.config.call_sign.as_str(),
            id_elements = self.id_element_count,
            id_interval_s = self.config.id_interval_s,
            squelch_tail_s = self.config.squelch_tail_s,
            id_tone_hz = self.config.id_tone_hz,
            beep_tone1_hz = self.config.beep_tone1_hz,
            beep_tone2_hz = self.config.beep_tone2_hz,
            beep = self.config.beep.as_str(),
            cor = self.config.cor_polarity.as_str(),
            ptt = self.config.ptt_polarity.as_str(),
            "repeater starting"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Polarity;
    use crate::hal::MockRadio;

    const COR_ON: Level = Level::Low; // default COR polarity is active-low
    const COR_OFF: Level = Level::High;

    fn controller() -> RepeaterController<MockRadio> {
        // Single-dit call sign keeps ID playback short in tests.
        let config = RepeaterConfig::default().with_call_sign("E");
        RepeaterController::new(MockRadio::new(), config).unwrap()
    }

    /// Advances in 20 ms steps until the controller reaches `target`.
    fn run_until(
        c: &mut RepeaterController<MockRadio>,
        mut now_ms: u64,
        cor: Level,
        target: ControllerState,
        limit_ms: u64,
    ) -> u64 {
        let deadline = now_ms + limit_ms;
        while c.state() != target {
            now_ms += 20;
            assert!(now_ms <= deadline, "never reached {target:?}");
            c.update(now_ms, cor).unwrap();
        }
        now_ms
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn new_rejects_invalid_call_sign() {
        let config = RepeaterConfig::default().with_call_sign("N0*");
        let err = RepeaterController::new(MockRadio::new(), config).unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedCallSignChar { ch: '*' });
    }

    #[test]
    fn starts_idle_and_unkeyed() {
        let mut c = controller();
        let status = c.update(0, COR_OFF).unwrap();
        assert_eq!(status.state, ControllerState::Idle);
        assert!(!status.ptt_asserted);
        assert!(status.needs_id);
        assert_eq!(status.tone, None);
    }

    // =========================================================================
    // Startup Identification
    // =========================================================================

    #[test]
    fn identifies_shortly_after_startup() {
        let mut c = controller();
        c.update(0, COR_OFF).unwrap();

        // Still in the zeroth second: deadline not strictly passed.
        let status = c.update(500, COR_OFF).unwrap();
        assert_eq!(status.state, ControllerState::Idle);

        let status = c.update(1020, COR_OFF).unwrap();
        assert_eq!(status.state, ControllerState::Id);
        assert!(status.ptt_asserted);
    }

    #[test]
    fn id_completion_clears_needs_id_and_unkeys() {
        let mut c = controller();
        c.update(0, COR_OFF).unwrap();
        let now = run_until(&mut c, 0, COR_OFF, ControllerState::Id, 2_000);

        let now = run_until(&mut c, now, COR_OFF, ControllerState::Idle, 5_000);
        assert!(!c.needs_id());
        assert!(!c.ptt_asserted());
        assert_eq!(c.status().tone, None);

        // The ID actually keyed the tone at least once (dit + beep).
        assert!(c.transmitter().tone_starts >= 2);

        // No further ID until the interval passes again.
        let status = c.update(now + 20, COR_OFF).unwrap();
        assert_eq!(status.state, ControllerState::Idle);
    }

    // =========================================================================
    // PTT Polarity
    // =========================================================================

    #[test]
    fn ptt_level_follows_polarity() {
        let config = RepeaterConfig::default()
            .with_call_sign("E")
            .with_ptt_polarity(Polarity::ActiveLow);
        let mut c = RepeaterController::new(MockRadio::new(), config).unwrap();

        assert_eq!(c.ptt_level(), Level::High); // released, active-low

        c.update(0, COR_OFF).unwrap();
        run_until(&mut c, 0, COR_OFF, ControllerState::Id, 2_000);
        assert_eq!(c.ptt_level(), Level::Low);
        assert_eq!(c.transmitter().ptt, Level::Low);
    }

    // =========================================================================
    // Keyup Path
    // =========================================================================

    /// Runs a fresh controller past its startup ID, returning the time.
    fn past_startup_id(c: &mut RepeaterController<MockRadio>) -> u64 {
        c.update(0, COR_OFF).unwrap();
        let now = run_until(c, 0, COR_OFF, ControllerState::Id, 2_000);
        run_until(c, now, COR_OFF, ControllerState::Idle, 5_000)
    }

    #[test]
    fn carrier_keys_ptt_after_debounce() {
        let mut c = controller();
        let now = past_startup_id(&mut c);

        let status = c.update(now + 20, COR_ON).unwrap();
        assert_eq!(status.state, ControllerState::DebounceCorOn);
        assert!(!status.ptt_asserted);

        // Window still open 20 ms in.
        let status = c.update(now + 40, COR_ON).unwrap();
        assert_eq!(status.state, ControllerState::DebounceCorOn);

        // Past the 50 ms window: confirmed, then keyed one tick later.
        let status = c.update(now + 80, COR_ON).unwrap();
        assert_eq!(status.state, ControllerState::PttOn);
        let status = c.update(now + 100, COR_ON).unwrap();
        assert_eq!(status.state, ControllerState::Ptt);
        assert!(status.ptt_asserted);
    }

    #[test]
    fn short_pulse_never_leaves_idle_keyed() {
        let mut c = controller();
        let now = past_startup_id(&mut c);

        let changes_before = c.transmitter().ptt_changes;
        c.update(now + 20, COR_ON).unwrap();
        // Gone again by the time the window closes.
        let status = c.update(now + 80, COR_OFF).unwrap();
        assert_eq!(status.state, ControllerState::Idle);
        assert!(!status.ptt_asserted);
        assert_eq!(c.transmitter().ptt_changes, changes_before);
    }

    // =========================================================================
    // NeedsID Lifecycle
    // =========================================================================

    #[test]
    fn transmission_sets_needs_id_exactly_once() {
        let mut c = controller();
        let mut now = past_startup_id(&mut c);
        assert!(!c.needs_id());

        // Key up, hold, drop.
        now = run_until(&mut c, now, COR_ON, ControllerState::Ptt, 1_000);
        now = run_until(&mut c, now, COR_OFF, ControllerState::SqtOff, 5_000);

        // Teardown flags the debt and it survives into idle.
        now = run_until(&mut c, now, COR_OFF, ControllerState::Idle, 1_000);
        assert!(c.needs_id());

        // Next deadline expiry pays the debt.
        now = run_until(&mut c, now, COR_OFF, ControllerState::Id, 601_000);
        run_until(&mut c, now, COR_OFF, ControllerState::Idle, 5_000);
        assert!(!c.needs_id());
    }
}
