//! Chained LED output traits

use crate::led::FrameBuffer;

/// Something that can push its current state to hardware
pub trait Transmittable {
    /// Send the complete current state
    ///
    /// Open loop: there is no acknowledgment and no failure path.
    fn transmit(&mut self);
}

/// Transport that serializes a whole frame buffer onto an LED chain
///
/// The bit-banged clock/data transport is one implementation; a hardware
/// shift-register transport would be another.
pub trait FrameBus {
    /// Send every record of `frame`, delimited by start and end frames
    fn send(&mut self, frame: &FrameBuffer);
}
