//! Grove analog sensors (light, loudness, rotary angle, ...)

use picogrove_hal::AdcReader;

/// Analog sensor on one ADC channel
pub struct AnalogSensor<A> {
    adc: A,
}

impl<A: AdcReader> AnalogSensor<A> {
    pub fn new(adc: A) -> Self {
        Self { adc }
    }

    /// Raw 12-bit sample (0-4095)
    pub fn read_raw(&mut self) -> Result<u16, A::Error> {
        self.adc.read()
    }

    /// Sample scaled to the full 16-bit range (0-65535)
    ///
    /// The top bits are replicated into the low nibble so 4095 maps to 65535.
    pub fn read_u16(&mut self) -> Result<u16, A::Error> {
        self.read_raw().map(scale_12_to_16)
    }
}

/// Widen a 12-bit sample to 16 bits
pub fn scale_12_to_16(raw: u16) -> u16 {
    let raw = raw & 0x0FFF;
    (raw << 4) | (raw >> 8)
}
