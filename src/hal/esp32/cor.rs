//! Carrier-detect input for ESP32.
//!
//! Most receiver boards bring the squelch gate out as an open-collector
//! COR line that pulls to ground when a carrier opens the squelch. This
//! implementation enables the internal pull-up so the line idles high and
//! reads low on carrier, which matches the controller's default
//! active-low COR polarity.
//!
//! # Wiring
//!
//! - COR → GPIO3
//! - GND → GND

use crate::traits::{CarrierInput, Level};
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// Receiver carrier-detect line for ESP32.
///
/// Polling-based; the main loop samples it every tick and hands the raw
/// level to the controller, which applies the configured polarity and
/// debounce.
///
/// # Example
///
/// ```ignore
/// use rs_repeater::hal::esp32::Esp32CarrierInput;
/// use rs_repeater::traits::CarrierInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut cor = Esp32CarrierInput::new(peripherals.pins.gpio3)?;
///
/// loop {
///     let level = cor.level()?;
///     // feed level into RepeaterController::update
/// }
/// ```
pub struct Esp32CarrierInput<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Carrier-detect signal input
    cor: PinDriver<'d, P, Input>,
}

impl<'d, P> Esp32CarrierInput<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Creates a new carrier-detect input.
    ///
    /// Configures the GPIO with the internal pull-up resistor so an
    /// open-collector COR line idles high.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(cor_pin: impl Peripheral<P = P> + 'd) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut cor = PinDriver::input(cor_pin)?;
        cor.set_pull(Pull::Up)?;
        Ok(Self { cor })
    }
}

impl<P> CarrierInput for Esp32CarrierInput<'_, P>
where
    P: InputPin + OutputPin,
{
    type Error = esp_idf_hal::sys::EspError;

    fn level(&mut self) -> Result<Level, Self::Error> {
        if self.cor.is_high() {
            Ok(Level::High)
        } else {
            Ok(Level::Low)
        }
    }
}
