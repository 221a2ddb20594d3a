//! RP2040 backend for the picogrove HAL
//!
//! Implements the `picogrove-hal` traits on top of `embassy-rp`:
//!
//! - GPIO wrappers ([`RpOutput`], [`RpInput`], [`RpFlex`])
//! - A microsecond clock over the embassy time driver
//! - Shared blocking ADC with per-channel readers
//! - PWM outputs, one slice per claimed pin
//! - [`PinBank`], the [`PinSource`](picogrove_hal::PinSource) for the chip

#![no_std]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod pins;
pub mod pwm;

pub use adc::{AdcChannel, AnalogInput, SharedAdc};
pub use clock::EmbassyClock;
pub use gpio::{RpFlex, RpInput, RpOutput};
pub use pins::{BankPins, PinBank, PwmSlices, GPIO_COUNT};
pub use pwm::RpPwm;
