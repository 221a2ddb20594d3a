//! Grove buzzer
//!
//! A passive piezo on the connector's first pin, driven by a PWM square
//! wave. The tone is the PWM frequency; sounding it means a 50 % duty
//! cycle, silence means duty 0.

use picogrove_hal::PwmOutput;

/// Tone a new buzzer is tuned to (Hz)
pub const DEFAULT_FREQUENCY_HZ: u32 = 888;

/// Duty for a sounding buzzer (half of each period high)
const SOUNDING_DUTY: u16 = u16::MAX / 2 + 1;

/// PWM-driven passive buzzer
pub struct Buzzer<P> {
    pwm: P,
    frequency_hz: u32,
    on: bool,
}

impl<P: PwmOutput> Buzzer<P> {
    /// Tune `pwm` to [`DEFAULT_FREQUENCY_HZ`], silent
    pub fn new(mut pwm: P) -> Self {
        pwm.set_duty(0);
        pwm.set_frequency(DEFAULT_FREQUENCY_HZ);
        Self {
            pwm,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            on: false,
        }
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Change the tone; a sounding buzzer keeps sounding
    pub fn set_frequency(&mut self, hz: u32) {
        self.frequency_hz = hz;
        self.pwm.set_frequency(hz);
    }

    pub fn on(&mut self) {
        self.set_on(true);
    }

    pub fn off(&mut self) {
        self.set_on(false);
    }

    pub fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pwm.set_duty(if on { SOUNDING_DUTY } else { 0 });
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Silence the buzzer and give the PWM channel back
    pub fn release(mut self) -> P {
        self.pwm.set_duty(0);
        self.pwm
    }
}
