//! PWM output traits and timing
//!
//! A PWM channel here is a square-wave source: the frequency sets the pitch
//! of a buzzer, the duty sets how long each period is high.

/// Divider and wrap value for a PWM counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Integer clock divider (1..=255)
    pub divider: u8,
    /// Counter wraps after `top`, so one period is `top + 1` counts
    pub top: u16,
}

impl PwmTiming {
    /// Smallest divider that fits `hz` into a 16-bit counter
    ///
    /// `hz` is clamped to what the counter can produce from `clock_hz`.
    pub fn for_frequency(clock_hz: u32, hz: u32) -> Self {
        let hz = hz.max(1) as u64;
        let clock = clock_hz as u64;
        let period = 1u64 << 16;

        let divider = clock.div_ceil(hz * period).clamp(1, u8::MAX as u64);
        let counts = (clock / (divider * hz)).clamp(2, period);

        Self {
            divider: divider as u8,
            top: (counts - 1) as u16,
        }
    }

    /// Frequency this timing produces from `clock_hz`
    pub fn frequency(&self, clock_hz: u32) -> u32 {
        clock_hz / (self.divider as u32 * (self.top as u32 + 1))
    }

    /// Compare value for a duty cycle given as a fraction of `u16::MAX`
    pub fn compare(&self, duty: u16) -> u16 {
        let counts = self.top as u32 + 1;
        let compare = counts * duty as u32 / u16::MAX as u32;
        compare.min(u16::MAX as u32) as u16
    }
}

/// Square-wave output on one pin
pub trait PwmOutput {
    /// Change the output frequency, keeping the duty fraction
    fn set_frequency(&mut self, hz: u32);

    /// Set the high fraction of each period (`0` is off, `u16::MAX` is
    /// always high)
    fn set_duty(&mut self, duty: u16);
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYS_CLOCK: u32 = 125_000_000;

    #[test]
    fn test_buzzer_tone() {
        let timing = PwmTiming::for_frequency(SYS_CLOCK, 888);
        assert_eq!(timing.divider, 3);
        assert_eq!(timing.top, 46_920);
        // within 1 Hz of the request
        assert!(timing.frequency(SYS_CLOCK).abs_diff(888) <= 1);
    }

    #[test]
    fn test_high_frequency_uses_no_divider() {
        let timing = PwmTiming::for_frequency(SYS_CLOCK, 10_000);
        assert_eq!(timing.divider, 1);
        assert_eq!(timing.top, 12_499);
    }

    #[test]
    fn test_out_of_range_frequencies_clamp() {
        let low = PwmTiming::for_frequency(SYS_CLOCK, 0);
        assert_eq!(low.divider, 255);
        assert_eq!(low.top, u16::MAX);

        let high = PwmTiming::for_frequency(SYS_CLOCK, u32::MAX);
        assert_eq!(high.divider, 1);
        assert_eq!(high.top, 1);
    }

    #[test]
    fn test_compare() {
        let timing = PwmTiming { divider: 1, top: 999 };
        assert_eq!(timing.compare(0), 0);
        assert_eq!(timing.compare(u16::MAX), 1000);
        assert_eq!(timing.compare(u16::MAX / 2 + 1), 500);

        let full = PwmTiming { divider: 1, top: u16::MAX };
        assert_eq!(full.compare(u16::MAX), u16::MAX);
    }
}
