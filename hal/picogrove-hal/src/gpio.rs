//! GPIO pin abstractions
//!
//! Provides traits for digital input, output and direction-switchable pins
//! that can be implemented by chip-specific HALs.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Writes are assumed infallible at this layer.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinDirection {
    /// Pin samples the line
    Input,
    /// Pin drives the line
    Output,
}

/// Internal pull resistor selection for inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Floating input
    #[default]
    None,
    /// Pull-up enabled
    Up,
    /// Pull-down enabled
    Down,
}

/// Pin whose direction can be switched at runtime
///
/// Single-wire protocols (ultrasonic trigger/echo on one line) drive the
/// line as an output and then sample it as an input.
pub trait FlexPin: OutputPin + InputPin {
    /// Reconfigure the pin direction
    fn set_direction(&mut self, direction: PinDirection);

    /// Configure the pin as an output
    fn set_as_output(&mut self) {
        self.set_direction(PinDirection::Output);
    }

    /// Configure the pin as an input
    fn set_as_input(&mut self) {
        self.set_direction(PinDirection::Input);
    }
}
