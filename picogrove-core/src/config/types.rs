//! Board configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::connector::Connector;
use crate::led::MAX_CHAINED_LEDS;
use crate::ranging::DEFAULT_TIMEOUT_US;

/// Configuration layout this firmware understands
pub const CONFIG_VERSION: u8 = 1;

/// Ultrasonic ranger settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UltrasonicConfig {
    /// Time budget for one measurement (µs)
    pub timeout_us: u32,
}

impl Default for UltrasonicConfig {
    fn default() -> Self {
        Self {
            timeout_us: DEFAULT_TIMEOUT_US,
        }
    }
}

/// Chained LED settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainedLedConfig {
    /// Number of LEDs in the chain (at most [`MAX_CHAINED_LEDS`])
    pub count: u8,
    /// Transmit after every color change
    pub auto_write: bool,
}

impl Default for ChainedLedConfig {
    fn default() -> Self {
        Self {
            count: 1,
            auto_write: true,
        }
    }
}

/// Which connector each application device is plugged into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bindings {
    /// Ultrasonic ranger
    pub ranger: Option<Connector>,
    /// Chained LED string
    pub leds: Option<Connector>,
    /// LED button
    pub button: Option<Connector>,
    /// PIR motion sensor
    pub motion: Option<Connector>,
    /// Analog light sensor
    pub light: Option<Connector>,
    /// PWM buzzer
    pub buzzer: Option<Connector>,
}

/// Distance band mapped onto the LED color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProximityConfig {
    /// At or below this distance the LEDs show the "near" color (mm)
    pub near_mm: u16,
    /// At or above this distance the LEDs show the "far" color (mm)
    pub far_mm: u16,
    /// Pause between measurements (ms)
    pub interval_ms: u32,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            near_mm: 100,
            far_mm: 1000,
            interval_ms: 250,
        }
    }
}

impl ProximityConfig {
    /// Position of `mm` within the band, 0 (near) to 255 (far)
    pub fn ramp(&self, mm: f32) -> u8 {
        let near = self.near_mm as f32;
        let far = self.far_mm as f32;
        if mm <= near || far <= near {
            return 0;
        }
        if mm >= far {
            return 255;
        }
        ((mm - near) * 255.0 / (far - near)) as u8
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Configuration layout version, always [`CONFIG_VERSION`]
    pub version: u8,
    pub ultrasonic: UltrasonicConfig,
    pub chained_led: ChainedLedConfig,
    pub bindings: Bindings,
    pub proximity: ProximityConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ultrasonic: UltrasonicConfig::default(),
            chained_led: ChainedLedConfig::default(),
            bindings: Bindings::default(),
            proximity: ProximityConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Chained LED count as a buffer length
    pub fn led_count(&self) -> usize {
        (self.chained_led.count as usize).min(MAX_CHAINED_LEDS)
    }
}
