//! Distance sensor trait

use crate::ranging::{EchoPulse, RangingError};

/// Pulse-echo distance sensor
pub trait RangeFinder {
    /// Time budget used by the `measure_*` conversions (µs)
    fn timeout_us(&self) -> u32;

    /// Trigger one measurement and time the echo pulse
    ///
    /// Blocks for at most `timeout_us` plus the trigger sequence.
    fn measure_duration(&mut self, timeout_us: u32) -> Result<EchoPulse, RangingError>;

    /// Measure once and convert to centimeters
    fn measure_centimeters(&mut self) -> Result<f32, RangingError> {
        let timeout = self.timeout_us();
        self.measure_duration(timeout).map(|p| p.centimeters())
    }

    /// Measure once and convert to millimeters
    fn measure_millimeters(&mut self) -> Result<f32, RangingError> {
        let timeout = self.timeout_us();
        self.measure_duration(timeout).map(|p| p.millimeters())
    }

    /// Measure once and convert to inches
    fn measure_inches(&mut self) -> Result<f32, RangingError> {
        let timeout = self.timeout_us();
        self.measure_duration(timeout).map(|p| p.inches())
    }
}
