//! Transmitter keying and tone generation using ESP32 GPIO and LEDC PWM.
//!
//! The transmitter side needs two signals:
//! - PTT (GPIO2): keys the transmitter
//! - Tone (GPIO6): square wave into the audio chain for the beep and CW ID
//!
//! The tone is a 50% duty LEDC output whose timer is retuned to the
//! requested pitch on `tone_on`. A simple RC low-pass between GPIO6 and
//! the audio input rounds the square wave off enough for on-air use.

use crate::traits::{Level, Transmitter};
use esp_idf_hal::gpio::{Output, OutputPin, PinDriver};
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimer, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

/// Transmitter interface for ESP32.
///
/// Owns the PTT output pin and one LEDC timer/channel pair for tone
/// generation. The timer driver stays owned so the pitch can be changed
/// while the channel keeps running.
///
/// # Hardware Setup
///
/// - GPIO2 → PTT keying circuit (opto or open-collector driver)
/// - GPIO6 → RC low-pass → transmitter audio input
///
/// # Example
///
/// ```ignore
/// use rs_repeater::hal::esp32::Esp32Radio;
/// use rs_repeater::traits::{Level, Transmitter};
///
/// let peripherals = Peripherals::take()?;
/// let mut radio = Esp32Radio::new(
///     peripherals.pins.gpio2,
///     peripherals.pins.gpio6,
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
///     Level::Low, // released PTT level for an active-high keying circuit
/// )?;
///
/// radio.set_ptt(Level::High)?;
/// radio.tone_on(1200)?;
/// ```
pub struct Esp32Radio<'d, PTT, TIMER>
where
    PTT: OutputPin,
    TIMER: LedcTimer,
{
    /// PTT keying output
    ptt: PinDriver<'d, PTT, Output>,
    /// LEDC timer that sets the tone pitch
    tone_timer: LedcTimerDriver<'d, TIMER>,
    /// LEDC channel driving the tone pin
    tone: LedcDriver<'d>,
}

impl<'d, PTT, TIMER> Esp32Radio<'d, PTT, TIMER>
where
    PTT: OutputPin,
    TIMER: LedcTimer + 'd,
{
    /// Timer frequency before the first tone request.
    const IDLE_FREQ_HZ: u32 = 1_000;

    /// PWM resolution (10-bit = 1024 steps)
    const PWM_RESOLUTION: Resolution = Resolution::Bits10;

    /// Creates a new transmitter interface.
    ///
    /// The PTT pin is driven to `released` immediately so the transmitter
    /// never keys during boot. The tone channel starts at 0% duty
    /// (silent).
    ///
    /// # Arguments
    ///
    /// * `ptt_pin` - GPIO keying the transmitter (typically GPIO2)
    /// * `tone_pin` - GPIO for the tone output (typically GPIO6)
    /// * `timer` - LEDC timer peripheral
    /// * `channel` - LEDC channel for the tone output
    /// * `released` - electrical level of an unkeyed PTT line
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO or PWM initialization fails.
    pub fn new<T, C, CI, TP, TPI>(
        ptt_pin: impl Peripheral<P = PTT> + 'd,
        tone_pin: TP,
        timer: T,
        channel: C,
        released: Level,
    ) -> Result<Self, esp_idf_hal::sys::EspError>
    where
        T: Peripheral<P = TIMER> + 'd,
        CI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TIMER::SpeedMode> + 'd,
        C: Peripheral<P = CI> + 'd,
        TPI: OutputPin + 'd,
        TP: Peripheral<P = TPI> + 'd,
    {
        let timer_config = TimerConfig::default()
            .frequency(Self::IDLE_FREQ_HZ.Hz())
            .resolution(Self::PWM_RESOLUTION);
        let tone_timer = LedcTimerDriver::new(timer, &timer_config)?;

        let mut tone = LedcDriver::new(channel, &tone_timer, tone_pin)?;
        tone.set_duty(0)?;

        let mut ptt = PinDriver::output(ptt_pin)?;
        match released {
            Level::High => ptt.set_high()?,
            Level::Low => ptt.set_low()?,
        }

        Ok(Self {
            ptt,
            tone_timer,
            tone,
        })
    }
}

impl<PTT, TIMER> Transmitter for Esp32Radio<'_, PTT, TIMER>
where
    PTT: OutputPin,
    TIMER: LedcTimer,
{
    type Error = esp_idf_hal::sys::EspError;

    fn set_ptt(&mut self, level: Level) -> Result<(), Self::Error> {
        match level {
            Level::High => self.ptt.set_high(),
            Level::Low => self.ptt.set_low(),
        }
    }

    fn tone_on(&mut self, freq_hz: u32) -> Result<(), Self::Error> {
        self.tone_timer.set_frequency(freq_hz.Hz())?;
        let half = self.tone.get_max_duty() / 2;
        self.tone.set_duty(half)
    }

    fn tone_off(&mut self) -> Result<(), Self::Error> {
        self.tone.set_duty(0)
    }
}
