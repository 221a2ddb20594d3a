//! Pin allocation by number
//!
//! [`PinBank`] owns every GPIO and hands each one out at most once, which
//! is what lets connector names be resolved to drivers at runtime. GPIO26
//! to GPIO29 keep their concrete types until claimed, since only the typed
//! pins can be bound to an ADC channel. The PWM slices live here too, so a
//! buzzer claims its pin and its slice in one step.

use embassy_rp::adc::Channel;
use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output};
use embassy_rp::peripherals::{
    PIN_26, PIN_27, PIN_28, PIN_29, PWM_SLICE0, PWM_SLICE1, PWM_SLICE2, PWM_SLICE3, PWM_SLICE4,
    PWM_SLICE5, PWM_SLICE6, PWM_SLICE7,
};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::Peri;
use picogrove_hal::{PinError, PinSource, Pull};

use crate::adc::{AdcChannel, AnalogInput, SharedAdc};
use crate::gpio::{to_rp_pull, RpFlex, RpInput, RpOutput};
use crate::pwm::{slice_of, RpPwm};

/// GPIO pins on the RP2040
pub const GPIO_COUNT: u8 = 30;

/// First ADC-capable GPIO
const ADC_BASE: u8 = 26;

/// PWM slices, moved out of `Peripherals`
pub struct PwmSlices {
    pub slice0: Peri<'static, PWM_SLICE0>,
    pub slice1: Peri<'static, PWM_SLICE1>,
    pub slice2: Peri<'static, PWM_SLICE2>,
    pub slice3: Peri<'static, PWM_SLICE3>,
    pub slice4: Peri<'static, PWM_SLICE4>,
    pub slice5: Peri<'static, PWM_SLICE5>,
    pub slice6: Peri<'static, PWM_SLICE6>,
    pub slice7: Peri<'static, PWM_SLICE7>,
}

/// Every GPIO and PWM slice, moved out of `Peripherals`
///
/// Build with [`bank_pins!`](crate::bank_pins).
pub struct BankPins {
    pub gpio: [Peri<'static, AnyPin>; ADC_BASE as usize],
    pub pin26: Peri<'static, PIN_26>,
    pub pin27: Peri<'static, PIN_27>,
    pub pin28: Peri<'static, PIN_28>,
    pub pin29: Peri<'static, PIN_29>,
    pub pwm: PwmSlices,
}

/// Move all GPIOs and PWM slices out of an `embassy_rp::Peripherals` value
///
/// ```ignore
/// let p = embassy_rp::init(Default::default());
/// let pins = bank_pins!(p);
/// ```
#[macro_export]
macro_rules! bank_pins {
    ($p:ident) => {
        $crate::pins::BankPins {
            gpio: [
                $p.PIN_0.into(), $p.PIN_1.into(), $p.PIN_2.into(), $p.PIN_3.into(),
                $p.PIN_4.into(), $p.PIN_5.into(), $p.PIN_6.into(), $p.PIN_7.into(),
                $p.PIN_8.into(), $p.PIN_9.into(), $p.PIN_10.into(), $p.PIN_11.into(),
                $p.PIN_12.into(), $p.PIN_13.into(), $p.PIN_14.into(), $p.PIN_15.into(),
                $p.PIN_16.into(), $p.PIN_17.into(), $p.PIN_18.into(), $p.PIN_19.into(),
                $p.PIN_20.into(), $p.PIN_21.into(), $p.PIN_22.into(), $p.PIN_23.into(),
                $p.PIN_24.into(), $p.PIN_25.into(),
            ],
            pin26: $p.PIN_26,
            pin27: $p.PIN_27,
            pin28: $p.PIN_28,
            pin29: $p.PIN_29,
            pwm: $crate::pins::PwmSlices {
                slice0: $p.PWM_SLICE0,
                slice1: $p.PWM_SLICE1,
                slice2: $p.PWM_SLICE2,
                slice3: $p.PWM_SLICE3,
                slice4: $p.PWM_SLICE4,
                slice5: $p.PWM_SLICE5,
                slice6: $p.PWM_SLICE6,
                slice7: $p.PWM_SLICE7,
            },
        }
    };
}

/// Unclaimed PWM slices
struct SliceBank {
    slice0: Option<Peri<'static, PWM_SLICE0>>,
    slice1: Option<Peri<'static, PWM_SLICE1>>,
    slice2: Option<Peri<'static, PWM_SLICE2>>,
    slice3: Option<Peri<'static, PWM_SLICE3>>,
    slice4: Option<Peri<'static, PWM_SLICE4>>,
    slice5: Option<Peri<'static, PWM_SLICE5>>,
    slice6: Option<Peri<'static, PWM_SLICE6>>,
    slice7: Option<Peri<'static, PWM_SLICE7>>,
}

impl SliceBank {
    fn new(s: PwmSlices) -> Self {
        Self {
            slice0: Some(s.slice0),
            slice1: Some(s.slice1),
            slice2: Some(s.slice2),
            slice3: Some(s.slice3),
            slice4: Some(s.slice4),
            slice5: Some(s.slice5),
            slice6: Some(s.slice6),
            slice7: Some(s.slice7),
        }
    }

    fn is_free(&self, slice: u8) -> bool {
        match slice {
            0 => self.slice0.is_some(),
            1 => self.slice1.is_some(),
            2 => self.slice2.is_some(),
            3 => self.slice3.is_some(),
            4 => self.slice4.is_some(),
            5 => self.slice5.is_some(),
            6 => self.slice6.is_some(),
            7 => self.slice7.is_some(),
            _ => false,
        }
    }
}

/// Bind GPIO `$gpio` to its PWM slice and channel
///
/// Each arm is `gpio => pin type, slice field, constructor`.
macro_rules! pwm_channel {
    ($slices:expr, $gpio:expr, $config:expr, { $($n:literal => $pin:ident, $slice:ident, $ctor:ident;)* }) => {
        match $gpio {
            $(
                $n => $slices.$slice.take().map(|slice| {
                    // SAFETY: the caller has just taken GPIO $n out of the
                    // bank, so no other handle to the pin exists.
                    let pin = unsafe { embassy_rp::peripherals::$pin::steal() };
                    Pwm::$ctor(slice, pin, $config)
                }),
            )*
            _ => None,
        }
    };
}

/// Pin source for the RP2040
pub struct PinBank {
    digital: [Option<Peri<'static, AnyPin>>; ADC_BASE as usize],
    pin26: Option<Peri<'static, PIN_26>>,
    pin27: Option<Peri<'static, PIN_27>>,
    pin28: Option<Peri<'static, PIN_28>>,
    pin29: Option<Peri<'static, PIN_29>>,
    slices: SliceBank,
    adc: &'static SharedAdc,
}

impl PinBank {
    pub fn new(pins: BankPins, adc: &'static SharedAdc) -> Self {
        Self {
            digital: pins.gpio.map(Some),
            pin26: Some(pins.pin26),
            pin27: Some(pins.pin27),
            pin28: Some(pins.pin28),
            pin29: Some(pins.pin29),
            slices: SliceBank::new(pins.pwm),
            adc,
        }
    }

    /// Check if a pin is still unclaimed
    pub fn is_available(&self, pin: u8) -> bool {
        match pin {
            0..=25 => self.digital[pin as usize].is_some(),
            26 => self.pin26.is_some(),
            27 => self.pin27.is_some(),
            28 => self.pin28.is_some(),
            29 => self.pin29.is_some(),
            _ => false,
        }
    }

    /// Claim a pin for digital use
    fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        let taken = match pin {
            0..=25 => self.digital[pin as usize].take(),
            26 => self.pin26.take().map(Into::into),
            27 => self.pin27.take().map(Into::into),
            28 => self.pin28.take().map(Into::into),
            29 => self.pin29.take().map(Into::into),
            _ => return Err(PinError::InvalidPin),
        };
        taken.ok_or(PinError::AlreadyTaken)
    }

    /// Claim a pin and bind it to its ADC channel
    fn take_channel(&mut self, pin: u8) -> Result<Channel<'static>, PinError> {
        let pull = embassy_rp::gpio::Pull::None;
        let channel = match pin {
            26 => self.pin26.take().map(|p| Channel::new_pin(p, pull)),
            27 => self.pin27.take().map(|p| Channel::new_pin(p, pull)),
            28 => self.pin28.take().map(|p| Channel::new_pin(p, pull)),
            29 => self.pin29.take().map(|p| Channel::new_pin(p, pull)),
            _ => return Err(PinError::NotAnalog),
        };
        channel.ok_or(PinError::AlreadyTaken)
    }

    /// Claim a pin together with its PWM slice
    ///
    /// Nothing is claimed unless both the pin and the slice are free.
    fn take_pwm(&mut self, pin: u8) -> Result<Pwm<'static>, PinError> {
        if pin >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if !self.is_available(pin) {
            return Err(PinError::AlreadyTaken);
        }
        if !self.slices.is_free(slice_of(pin)) {
            return Err(PinError::PwmBusy);
        }
        // The typed pin is rebuilt below; the AnyPin handle is dropped
        let _ = self.take(pin)?;

        let pwm = pwm_channel!(self.slices, pin, PwmConfig::default(), {
            0 => PIN_0, slice0, new_output_a;
            1 => PIN_1, slice0, new_output_b;
            2 => PIN_2, slice1, new_output_a;
            3 => PIN_3, slice1, new_output_b;
            4 => PIN_4, slice2, new_output_a;
            5 => PIN_5, slice2, new_output_b;
            6 => PIN_6, slice3, new_output_a;
            7 => PIN_7, slice3, new_output_b;
            8 => PIN_8, slice4, new_output_a;
            9 => PIN_9, slice4, new_output_b;
            10 => PIN_10, slice5, new_output_a;
            11 => PIN_11, slice5, new_output_b;
            12 => PIN_12, slice6, new_output_a;
            13 => PIN_13, slice6, new_output_b;
            14 => PIN_14, slice7, new_output_a;
            15 => PIN_15, slice7, new_output_b;
            16 => PIN_16, slice0, new_output_a;
            17 => PIN_17, slice0, new_output_b;
            18 => PIN_18, slice1, new_output_a;
            19 => PIN_19, slice1, new_output_b;
            20 => PIN_20, slice2, new_output_a;
            21 => PIN_21, slice2, new_output_b;
            22 => PIN_22, slice3, new_output_a;
            23 => PIN_23, slice3, new_output_b;
            24 => PIN_24, slice4, new_output_a;
            25 => PIN_25, slice4, new_output_b;
            26 => PIN_26, slice5, new_output_a;
            27 => PIN_27, slice5, new_output_b;
            28 => PIN_28, slice6, new_output_a;
            29 => PIN_29, slice6, new_output_b;
        });
        pwm.ok_or(PinError::PwmBusy)
    }
}

impl PinSource for PinBank {
    type Output = RpOutput;
    type Input = RpInput;
    type Flex = RpFlex;
    type Analog = AnalogInput;
    type Pwm = RpPwm;

    fn output(&mut self, pin: u8) -> Result<RpOutput, PinError> {
        let pin = self.take(pin)?;
        Ok(RpOutput(Output::new(pin, Level::Low)))
    }

    fn input(&mut self, pin: u8, pull: Pull) -> Result<RpInput, PinError> {
        let pin = self.take(pin)?;
        Ok(RpInput(Input::new(pin, to_rp_pull(pull))))
    }

    fn flex(&mut self, pin: u8) -> Result<RpFlex, PinError> {
        let mut flex = Flex::new(self.take(pin)?);
        flex.set_as_input();
        Ok(RpFlex(flex))
    }

    fn analog(&mut self, pin: u8) -> Result<AnalogInput, PinError> {
        let id = AdcChannel::from_gpio(pin).ok_or(if pin < GPIO_COUNT {
            PinError::NotAnalog
        } else {
            PinError::InvalidPin
        })?;
        let channel = self.take_channel(pin)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("GPIO{} bound to {}", pin, id);
        Ok(AnalogInput::new(id, channel, self.adc))
    }

    fn pwm(&mut self, pin: u8) -> Result<RpPwm, PinError> {
        let pwm = self.take_pwm(pin)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("GPIO{} bound to PWM slice {}", pin, slice_of(pin));
        Ok(RpPwm::new(pwm, PwmConfig::default()))
    }
}
