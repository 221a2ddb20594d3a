//! ADC channel management
//!
//! RP2040 has a single ADC with 5 channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//! - ADC4: Internal temperature sensor
//!
//! All channels share one converter, so the converter lives in a
//! [`SharedAdc`] and each [`AnalogInput`] borrows it for a single read.

use core::cell::RefCell;

use embassy_rp::adc::{self, Adc, Blocking, Channel};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use picogrove_hal::AdcReader;

/// ADC converter shared between channels
pub type SharedAdc = Mutex<CriticalSectionRawMutex, RefCell<Adc<'static, Blocking>>>;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
    /// Internal temperature sensor
    Temperature,
}

impl AdcChannel {
    /// GPIO pin for this channel
    pub fn gpio(&self) -> Option<u8> {
        match self {
            AdcChannel::Adc0 => Some(26),
            AdcChannel::Adc1 => Some(27),
            AdcChannel::Adc2 => Some(28),
            AdcChannel::Adc3 => Some(29),
            AdcChannel::Temperature => None,
        }
    }

    /// Channel wired to a GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }
}

/// One ADC channel with access to the shared converter
pub struct AnalogInput {
    id: AdcChannel,
    channel: Channel<'static>,
    adc: &'static SharedAdc,
}

impl AnalogInput {
    pub(crate) fn new(id: AdcChannel, channel: Channel<'static>, adc: &'static SharedAdc) -> Self {
        Self { id, channel, adc }
    }

    pub fn id(&self) -> AdcChannel {
        self.id
    }
}

impl AdcReader for AnalogInput {
    type Error = adc::Error;

    /// Blocking 12-bit conversion
    fn read(&mut self) -> Result<u16, adc::Error> {
        let channel = &mut self.channel;
        self.adc
            .lock(|adc| adc.borrow_mut().blocking_read(channel))
    }
}
