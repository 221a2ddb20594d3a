//! Pin claiming by number
//!
//! A [`PinSource`] owns every pin of the chip and hands each one out at most
//! once, typed for the role the driver needs. This is what lets the board
//! registry build drivers from a connector's pin numbers at runtime.

use crate::adc::AdcReader;
use crate::gpio::{FlexPin, InputPin, OutputPin, Pull};
use crate::pwm::PwmOutput;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number does not exist on this chip
    InvalidPin,
    /// Pin already claimed by another driver
    AlreadyTaken,
    /// Pin has no ADC channel
    NotAnalog,
    /// The pin's PWM counter already drives another pin
    PwmBusy,
}

/// Hands out pins by number
pub trait PinSource {
    /// Push-pull output pin
    type Output: OutputPin;
    /// Input pin
    type Input: InputPin;
    /// Direction-switchable pin
    type Flex: FlexPin;
    /// ADC channel
    type Analog: AdcReader;
    /// PWM channel
    type Pwm: PwmOutput;

    /// Claim `pin` as an output, initially low
    fn output(&mut self, pin: u8) -> Result<Self::Output, PinError>;

    /// Claim `pin` as an input
    fn input(&mut self, pin: u8, pull: Pull) -> Result<Self::Input, PinError>;

    /// Claim `pin` as a flex pin (starts as input)
    fn flex(&mut self, pin: u8) -> Result<Self::Flex, PinError>;

    /// Claim `pin` as an ADC channel
    fn analog(&mut self, pin: u8) -> Result<Self::Analog, PinError>;

    /// Claim `pin` as a PWM output, initially silent (duty 0)
    fn pwm(&mut self, pin: u8) -> Result<Self::Pwm, PinError>;
}
