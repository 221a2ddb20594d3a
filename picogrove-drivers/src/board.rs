//! Board registry
//!
//! [`Board`] turns connector names into drivers. It owns the pin source,
//! the clock, the delay and the board configuration, and caches one driver
//! per connector and kind: asking twice for `board.ultrasonic(Connector::D16)`
//! returns the same ranger.
//!
//! Pins are claimed when a driver is first requested. Two drivers that need
//! the same pin (A0 and A1 share GPIO26, for example) cannot both exist; the
//! second request fails with [`BoardError::Pin`]. Two-pin drivers are
//! refused up front on a connector whose pins coincide (A0). A two-pin
//! driver whose second pin is taken keeps its first pin claimed, since such
//! a conflict is a wiring/config mistake rather than something to retry.

use heapless::FnvIndexMap;
use picogrove_core::config::BoardConfig;
use picogrove_core::{Connector, LedError};
use picogrove_hal::{DelayNs, MicrosClock, PinError, PinSource, Pull};

use crate::analog::AnalogSensor;
use crate::button::LedButton;
use crate::buzzer::Buzzer;
use crate::chained_led::{ChainedLed, P9813BitBang};
use crate::motion::MotionSensor;
use crate::ultrasonic::EchoRanger;

/// Driver slots per kind (power of two, at least the connector count)
pub const REGISTRY_SIZE: usize = 16;

type Registry<V> = FnvIndexMap<Connector, V, REGISTRY_SIZE>;

/// Chained LED driver built from a pin source's outputs
pub type BitBangLed<S> =
    ChainedLed<P9813BitBang<<S as PinSource>::Output, <S as PinSource>::Output>>;

/// Errors from the board registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError {
    /// A connector pin could not be claimed
    Pin(PinError),
    /// Chained LED could not be created
    Led(LedError),
    /// Two-pin device on a connector that has only one distinct pin
    SinglePinConnector,
    /// No free registry slot
    RegistryFull,
}

impl From<PinError> for BoardError {
    fn from(e: PinError) -> Self {
        BoardError::Pin(e)
    }
}

impl From<LedError> for BoardError {
    fn from(e: LedError) -> Self {
        BoardError::Led(e)
    }
}

/// Connector-addressed driver registry
pub struct Board<S: PinSource, C, D> {
    pins: S,
    clock: C,
    delay: D,
    config: BoardConfig,
    rangers: Registry<EchoRanger<S::Flex, C, D>>,
    buttons: Registry<LedButton<S::Output, S::Input>>,
    motion: Registry<MotionSensor<S::Input>>,
    analog: Registry<AnalogSensor<S::Analog>>,
    buzzers: Registry<Buzzer<S::Pwm>>,
    leds: Registry<BitBangLed<S>>,
}

impl<S, C, D> Board<S, C, D>
where
    S: PinSource,
    C: MicrosClock + Clone,
    D: DelayNs + Clone,
{
    pub fn new(pins: S, clock: C, delay: D, config: BoardConfig) -> Self {
        Self {
            pins,
            clock,
            delay,
            config,
            rangers: Registry::new(),
            buttons: Registry::new(),
            motion: Registry::new(),
            analog: Registry::new(),
            buzzers: Registry::new(),
            leds: Registry::new(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Ultrasonic ranger on `connector` (pin1), using the configured timeout
    pub fn ultrasonic(
        &mut self,
        connector: Connector,
    ) -> Result<&mut EchoRanger<S::Flex, C, D>, BoardError> {
        let timeout_us = self.config.ultrasonic.timeout_us;
        let (pins, clock, delay) = (&mut self.pins, &self.clock, &self.delay);
        cached(&mut self.rangers, connector, || {
            let pin = pins.flex(connector.pin1())?;
            Ok(EchoRanger::with_timeout(
                pin,
                clock.clone(),
                delay.clone(),
                timeout_us,
            ))
        })
    }

    /// LED button on `connector` (LED on pin1, switch on pin2)
    pub fn led_button(
        &mut self,
        connector: Connector,
    ) -> Result<&mut LedButton<S::Output, S::Input>, BoardError> {
        let pins = &mut self.pins;
        cached(&mut self.buttons, connector, || {
            two_pins(connector)?;
            let led = pins.output(connector.pin1())?;
            let button = pins.input(connector.pin2(), Pull::None)?;
            Ok(LedButton::new(led, button))
        })
    }

    /// PIR motion sensor on `connector` (pin1)
    pub fn motion_sensor(
        &mut self,
        connector: Connector,
    ) -> Result<&mut MotionSensor<S::Input>, BoardError> {
        let pins = &mut self.pins;
        cached(&mut self.motion, connector, || {
            let pin = pins.input(connector.pin1(), Pull::None)?;
            Ok(MotionSensor::new(pin))
        })
    }

    /// Analog sensor on `connector` (pin1, must be ADC-capable)
    pub fn analog_sensor(
        &mut self,
        connector: Connector,
    ) -> Result<&mut AnalogSensor<S::Analog>, BoardError> {
        let pins = &mut self.pins;
        cached(&mut self.analog, connector, || {
            let adc = pins.analog(connector.pin1())?;
            Ok(AnalogSensor::new(adc))
        })
    }

    /// Buzzer on `connector` (pin1), silent at the default tone
    pub fn buzzer(&mut self, connector: Connector) -> Result<&mut Buzzer<S::Pwm>, BoardError> {
        let pins = &mut self.pins;
        cached(&mut self.buzzers, connector, || {
            let pwm = pins.pwm(connector.pin1())?;
            Ok(Buzzer::new(pwm))
        })
    }

    /// Chained LEDs on `connector` (clock on pin1, data on pin2)
    ///
    /// Uses the configured LED count and auto-write flag. The chain is
    /// blanked when first created.
    pub fn chained_led(&mut self, connector: Connector) -> Result<&mut BitBangLed<S>, BoardError> {
        let count = self.config.led_count();
        let auto_write = self.config.chained_led.auto_write;
        let pins = &mut self.pins;
        cached(&mut self.leds, connector, || {
            two_pins(connector)?;
            let clock = pins.output(connector.pin1())?;
            let data = pins.output(connector.pin2())?;
            let leds = ChainedLed::new(P9813BitBang::new(clock, data), count, auto_write)?;
            Ok(leds)
        })
    }
}

fn two_pins(connector: Connector) -> Result<(), BoardError> {
    if connector.has_two_pins() {
        Ok(())
    } else {
        Err(BoardError::SinglePinConnector)
    }
}

/// Look up `connector`, creating the driver with `init` on first use
fn cached<V, F>(
    registry: &mut Registry<V>,
    connector: Connector,
    init: F,
) -> Result<&mut V, BoardError>
where
    F: FnOnce() -> Result<V, BoardError>,
{
    if !registry.contains_key(&connector) {
        let driver = init()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("driver created on {}", connector);
        registry
            .insert(connector, driver)
            .map_err(|_| BoardError::RegistryFull)?;
    }
    registry.get_mut(&connector).ok_or(BoardError::RegistryFull)
}
