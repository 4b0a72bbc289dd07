//! ESP32 clock implementation using the ESP-IDF timer.

use crate::traits::Clock;

/// ESP32 clock backed by `esp_timer_get_time()`.
///
/// The ESP-IDF timer counts microseconds since boot and never goes
/// backwards, which is what the debounce windows and tone deadlines
/// need; this wrapper just scales it to the controller's millisecond
/// clock.
///
/// # Example
///
/// ```ignore
/// use rs_repeater::hal::esp32::Esp32Clock;
/// use rs_repeater::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// loop {
///     let status = controller.update(clock.now_ms(), cor.level()?)?;
///     // ...
/// }
/// ```
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // Microseconds since boot; the read has no side effects.
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        (micros / 1000) as u64
    }
}
