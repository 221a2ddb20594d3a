//! Capability traits
//!
//! These traits define the interface between application code and the
//! driver implementations in `picogrove-drivers`.

pub mod led;
pub mod ranging;

pub use led::{FrameBus, Transmittable};
pub use ranging::RangeFinder;
