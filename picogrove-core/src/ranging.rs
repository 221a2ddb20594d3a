//! Ultrasonic echo ranging
//!
//! The ranger is triggered with a short high pulse and answers with a high
//! pulse whose width is the round-trip time of the sound burst. Distances
//! are derived from that width with fixed divisors (speed of sound ~343 m/s,
//! halved for the round trip):
//!
//! - centimeters = µs / 29 / 2
//! - millimeters = µs × (10 / 2) / 29
//! - inches      = µs / 74 / 2
//!
//! The divisors are kept exactly as written so readings match other Grove
//! ranger libraries digit for digit.

/// Default time budget for one measurement (µs)
pub const DEFAULT_TIMEOUT_US: u32 = 100_000;

/// Quiet time before the trigger pulse (µs)
pub const TRIGGER_SETTLE_US: u32 = 2;

/// Trigger pulse width (µs)
pub const TRIGGER_PULSE_US: u32 = 5;

/// Errors that can occur while ranging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangingError {
    /// No complete echo pulse within the time budget
    TimedOut,
}

/// Width of a received echo pulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoPulse {
    micros: u32,
}

impl EchoPulse {
    pub const fn from_micros(micros: u32) -> Self {
        Self { micros }
    }

    /// Pulse width in microseconds
    pub const fn micros(&self) -> u32 {
        self.micros
    }

    /// Distance to the target in centimeters
    pub fn centimeters(&self) -> f32 {
        self.micros as f32 / 29.0 / 2.0
    }

    /// Distance to the target in millimeters
    pub fn millimeters(&self) -> f32 {
        self.micros as f32 * (10.0 / 2.0) / 29.0
    }

    /// Distance to the target in inches
    pub fn inches(&self) -> f32 {
        self.micros as f32 / 74.0 / 2.0
    }
}
