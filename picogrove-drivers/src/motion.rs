//! Grove mini PIR motion sensor
//!
//! The sensor output goes high while motion is detected.

use picogrove_hal::InputPin;

/// Passive-infrared motion sensor
pub struct MotionSensor<P> {
    pin: P,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn is_motion_detected(&self) -> bool {
        self.pin.is_high()
    }
}
