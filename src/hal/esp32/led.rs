//! Carrier indicator on the SuperMini onboard LED.

use crate::traits::CarrierIndicator;
use esp_idf_hal::gpio::{Output, OutputPin, PinDriver};
use esp_idf_hal::peripheral::Peripheral;

/// Carrier indicator for ESP32.
///
/// Drives the onboard blue LED on GPIO8, which is wired active-low on
/// the SuperMini: the pin is pulled low to light it.
///
/// # Example
///
/// ```ignore
/// use rs_repeater::hal::esp32::Esp32CarrierLed;
/// use rs_repeater::traits::CarrierIndicator;
///
/// let peripherals = Peripherals::take()?;
/// let mut led = Esp32CarrierLed::new(peripherals.pins.gpio8)?;
/// led.set_active(true)?; // lit while the carrier is up
/// ```
pub struct Esp32CarrierLed<'d, P>
where
    P: OutputPin,
{
    led: PinDriver<'d, P, Output>,
}

impl<'d, P> Esp32CarrierLed<'d, P>
where
    P: OutputPin,
{
    /// Creates a new indicator, initially unlit.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(led_pin: impl Peripheral<P = P> + 'd) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut led = PinDriver::output(led_pin)?;
        led.set_high()?;
        Ok(Self { led })
    }
}

impl<P> CarrierIndicator for Esp32CarrierLed<'_, P>
where
    P: OutputPin,
{
    type Error = esp_idf_hal::sys::EspError;

    fn set_active(&mut self, active: bool) -> Result<(), Self::Error> {
        // Onboard LED is active-low
        if active {
            self.led.set_low()
        } else {
            self.led.set_high()
        }
    }
}
