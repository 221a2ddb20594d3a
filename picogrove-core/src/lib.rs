//! Board-agnostic core logic for Grove connector boards
//!
//! This crate contains all logic that does not touch hardware:
//!
//! - Connector name to pin number table
//! - Chained LED frame buffer, checksum encoding and slice addressing
//! - Echo pulse to distance conversions
//! - Capability traits implemented by the drivers
//! - Board configuration types and the `board.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod connector;
pub mod led;
pub mod ranging;
pub mod traits;

pub use color::Rgb;
pub use connector::{Connector, ConnectorError};
pub use led::{FrameBuffer, IndexRange, LedError, LedRecord};
pub use ranging::{EchoPulse, RangingError};
