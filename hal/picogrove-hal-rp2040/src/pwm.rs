//! PWM channels
//!
//! The RP2040 has 8 PWM slices with two channels each; GPIO `n` sits on
//! slice `(n / 2) % 8`, channel A for even pins and B for odd. A claimed
//! channel owns its whole slice, since both channels share one counter and
//! so one frequency.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::FixedU16;
use picogrove_hal::{PwmOutput, PwmTiming};

/// Number of PWM slices
pub const SLICE_COUNT: u8 = 8;

/// Slice that drives a GPIO
pub const fn slice_of(gpio: u8) -> u8 {
    (gpio / 2) % SLICE_COUNT
}

/// One PWM output pin
pub struct RpPwm {
    pwm: Pwm<'static>,
    config: Config,
    timing: PwmTiming,
    duty: u16,
}

impl RpPwm {
    pub(crate) fn new(pwm: Pwm<'static>, config: Config) -> Self {
        let timing = PwmTiming {
            divider: 1,
            top: config.top,
        };
        let mut out = Self {
            pwm,
            config,
            timing,
            duty: 0,
        };
        out.apply();
        out
    }

    /// Push divider, wrap and compare to the slice
    fn apply(&mut self) {
        let compare = self.timing.compare(self.duty);
        self.config.divider = FixedU16::from_num(self.timing.divider);
        self.config.top = self.timing.top;
        // the idle channel of the slice mirrors the active one
        self.config.compare_a = compare;
        self.config.compare_b = compare;
        self.pwm.set_config(&self.config);
    }
}

impl PwmOutput for RpPwm {
    fn set_frequency(&mut self, hz: u32) {
        self.timing = PwmTiming::for_frequency(clk_sys_freq(), hz);
        self.apply();
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.apply();
    }
}
