//! GPIO wrappers implementing the picogrove pin traits

use embassy_rp::gpio::{self, Flex, Input, Output};
use picogrove_hal::{FlexPin, InputPin, OutputPin, PinDirection, Pull};

pub(crate) fn to_rp_pull(pull: Pull) -> gpio::Pull {
    match pull {
        Pull::None => gpio::Pull::None,
        Pull::Up => gpio::Pull::Up,
        Pull::Down => gpio::Pull::Down,
    }
}

/// Push-pull output
pub struct RpOutput(pub(crate) Output<'static>);

impl OutputPin for RpOutput {
    #[inline]
    fn set_high(&mut self) {
        self.0.set_high();
    }

    #[inline]
    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Digital input
pub struct RpInput(pub(crate) Input<'static>);

impl InputPin for RpInput {
    #[inline]
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Pin that switches between output and input at runtime
pub struct RpFlex(pub(crate) Flex<'static>);

impl OutputPin for RpFlex {
    #[inline]
    fn set_high(&mut self) {
        self.0.set_high();
    }

    #[inline]
    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

impl InputPin for RpFlex {
    #[inline]
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl FlexPin for RpFlex {
    fn set_direction(&mut self, direction: PinDirection) {
        match direction {
            PinDirection::Output => self.0.set_as_output(),
            PinDirection::Input => self.0.set_as_input(),
        }
    }
}
