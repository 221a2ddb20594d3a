//! picogrove Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the picogrove drivers need.
//! Chip-specific crates implement them so the same drivers run on any board
//! with Grove-style connectors.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (picogrove-firmware)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picogrove-drivers (Board, drivers)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picogrove-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picogrove-hal-rp2040                   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital I/O
//! - [`clock::MicrosClock`] - Wrapping microsecond tick counter
//! - [`adc::AdcReader`] - Analog sampling
//! - [`pwm::PwmOutput`] - Square-wave output (buzzers)
//! - [`source::PinSource`] - Claiming pins by number
//! - [`DelayNs`] - Blocking delays (re-exported from `embedded-hal`)

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod clock;
pub mod gpio;
pub mod pwm;
pub mod source;

// Re-export key traits at crate root for convenience
pub use adc::AdcReader;
pub use clock::{ticks_diff, MicrosClock};
pub use embedded_hal::delay::DelayNs;
pub use gpio::{FlexPin, InputPin, OutputPin, PinDirection, Pull};
pub use pwm::{PwmOutput, PwmTiming};
pub use source::{PinError, PinSource};
