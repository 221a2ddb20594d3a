//! Grove LED button
//!
//! The LED sits on the connector's first pin, the switch on the second.
//! The switch pulls its line low when pressed.

use picogrove_hal::{InputPin, OutputPin};

/// Momentary button with a built-in LED
pub struct LedButton<L, B> {
    led: L,
    button: B,
}

impl<L: OutputPin, B: InputPin> LedButton<L, B> {
    pub fn new(led: L, button: B) -> Self {
        Self { led, button }
    }

    /// Switch the LED on or off
    pub fn set_led(&mut self, on: bool) {
        self.led.set_state(on);
    }

    pub fn is_led_on(&self) -> bool {
        self.led.is_set_high()
    }

    /// Check if the button is held down
    pub fn is_pressed(&self) -> bool {
        self.button.is_low()
    }
}
