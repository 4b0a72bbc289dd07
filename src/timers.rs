//! Whole-second deadline timers for the ID and squelch-tail intervals.
//!
//! Timing here is deliberately coarse: deadlines live on the whole-second
//! clock and expire on strict greater-than, so an armed interval of N
//! seconds actually waits somewhere in [N, N+1) depending on where in the
//! current second it was armed. Both repeater timers tolerate that slack
//! and rely on the exact comparison rule, so it is part of the contract
//! here, not an implementation detail.

/// A one-shot absolute deadline on the whole-second clock.
///
/// A freshly constructed timer carries deadline zero and is therefore
/// already expired at any `now > 0`; the controller exploits this for the
/// identification timer so a newly started station IDs immediately.
///
/// # Example
///
/// ```
/// use rs_repeater::timers::DeadlineTimer;
///
/// let mut timer = DeadlineTimer::new();
/// timer.reset(100, 600);
/// assert!(!timer.is_expired(700)); // boundary second: still waiting
/// assert!(timer.is_expired(701));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DeadlineTimer {
    deadline_s: u64,
}

impl DeadlineTimer {
    /// Creates a timer whose deadline has already passed.
    pub const fn new() -> Self {
        Self { deadline_s: 0 }
    }

    /// Re-arms the deadline to `now_s + interval_s`.
    pub fn reset(&mut self, now_s: u64, interval_s: u64) {
        self.deadline_s = now_s.saturating_add(interval_s);
    }

    /// True once the current second is strictly past the deadline.
    #[inline]
    pub fn is_expired(&self, now_s: u64) -> bool {
        now_s > self.deadline_s
    }

    /// The armed deadline in whole seconds.
    #[inline]
    pub fn deadline_s(&self) -> u64 {
        self.deadline_s
    }
}
