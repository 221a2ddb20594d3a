//! Grove peripheral drivers
//!
//! This crate provides drivers built on the `picogrove-hal` traits and the
//! [`Board`] registry that hands them out by connector name:
//!
//! - Ultrasonic ranger (single-wire trigger/echo, busy-wait timed)
//! - Chained RGB LEDs (P9813, bit-banged clock + data)
//! - LED button, PIR motion sensor, analog sensor, PWM buzzer

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod analog;
pub mod board;
pub mod button;
pub mod buzzer;
pub mod chained_led;
pub mod motion;
pub mod ultrasonic;

pub use analog::AnalogSensor;
pub use board::{BitBangLed, Board, BoardError};
pub use button::LedButton;
pub use buzzer::Buzzer;
pub use chained_led::{ChainedLed, P9813BitBang};
pub use motion::MotionSensor;
pub use ultrasonic::EchoRanger;
