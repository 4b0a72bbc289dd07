//! Settle filter for noisy digital transitions.
//!
//! A transition is acted on only if the line still shows the new level one
//! settle interval after it was first seen: a single re-sample at the
//! deadline, no averaging and no retries. The filter keeps the deadline
//! instead of sleeping through the interval, so callers poll it from a
//! running loop and the input stays live while a window is open.

/// Outcome of a completed debounce window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate level held; act on the transition.
    Stable,
    /// The line reverted; discard the transition.
    Flake,
}

/// One-shot settle window over a logical level.
///
/// `begin` latches the candidate level and arms the deadline; `poll`
/// returns `None` until the deadline, then judges the transition from the
/// sample supplied at that moment and closes the window. Samples supplied
/// mid-window are ignored, matching a single re-sample after a fixed
/// delay.
///
/// # Example
///
/// ```
/// use rs_repeater::debounce::{DebounceFilter, Verdict};
///
/// let mut filter = DebounceFilter::new(50);
/// filter.begin(1000, true);
///
/// assert_eq!(filter.poll(1020, true), None); // still settling
/// assert_eq!(filter.poll(1050, true), Some(Verdict::Stable));
/// ```
#[derive(Clone, Debug)]
pub struct DebounceFilter {
    settle_ms: u64,
    window: Option<Window>,
}

#[derive(Clone, Copy, Debug)]
struct Window {
    candidate: bool,
    deadline_ms: u64,
}

impl DebounceFilter {
    /// Creates a filter with the given settle interval.
    pub const fn new(settle_ms: u64) -> Self {
        Self {
            settle_ms,
            window: None,
        }
    }

    /// Opens a window for `candidate`, replacing any window in progress.
    pub fn begin(&mut self, now_ms: u64, candidate: bool) {
        self.window = Some(Window {
            candidate,
            deadline_ms: now_ms.saturating_add(self.settle_ms),
        });
    }

    /// Abandons the window in progress, if any.
    pub fn cancel(&mut self) {
        self.window = None;
    }

    /// True while a window is open.
    pub fn is_active(&self) -> bool {
        self.window.is_some()
    }

    /// Judges the window against the current sample once the settle
    /// interval has elapsed.
    ///
    /// Returns `None` while settling (or when no window is open); once the
    /// deadline is reached, returns the verdict and closes the window.
    pub fn poll(&mut self, now_ms: u64, current: bool) -> Option<Verdict> {
        let window = self.window?;
        if now_ms < window.deadline_ms {
            return None;
        }

        self.window = None;
        if current == window.candidate {
            Some(Verdict::Stable)
        } else {
            Some(Verdict::Flake)
        }
    }
}
