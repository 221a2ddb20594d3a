//! Analog input abstraction

/// Single ADC channel
pub trait AdcReader {
    /// Error type for conversions
    type Error;

    /// Read one raw sample (12-bit, 0-4095 on RP2040)
    fn read(&mut self) -> Result<u16, Self::Error>;
}
