//! Chained RGB LED driver (P9813)
//!
//! [`ChainedLed`] owns the frame buffer and the auto-write policy; the
//! transport that puts bytes on the wire is a [`FrameBus`]. The only
//! transport here is [`P9813BitBang`], which toggles clock and data GPIOs
//! directly.
//!
//! ```ignore
//! let bus = P9813BitBang::new(clock_pin, data_pin);
//! let mut leds = ChainedLed::new(bus, 3, true)?;
//! leds.set(0, Rgb::RED)?;          // transmits immediately
//! leds.fill(Rgb::BLUE);            // one transmit for the whole chain
//! ```

mod bitbang;

pub use bitbang::{P9813BitBang, FRAME_PULSES};

use heapless::Vec;
use picogrove_core::led::MAX_CHAINED_LEDS;
use picogrove_core::traits::{FrameBus, Transmittable};
use picogrove_core::{FrameBuffer, IndexRange, LedError, Rgb};

/// Chain of P9813 LEDs behind a frame transport
pub struct ChainedLed<B> {
    bus: B,
    frame: FrameBuffer,
    auto_write: bool,
}

impl<B: FrameBus> ChainedLed<B> {
    /// Create a chain of `count` LEDs
    ///
    /// The chain is blanked and transmitted once, whatever `auto_write` is.
    pub fn new(bus: B, count: usize, auto_write: bool) -> Result<Self, LedError> {
        let mut leds = Self {
            bus,
            frame: FrameBuffer::new(count)?,
            auto_write,
        };
        leds.reset();
        Ok(leds)
    }

    /// Number of LEDs in the chain
    pub fn len(&self) -> usize {
        self.frame.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.is_empty()
    }

    pub fn auto_write(&self) -> bool {
        self.auto_write
    }

    /// Enable or disable transmitting after every change
    pub fn set_auto_write(&mut self, auto_write: bool) {
        self.auto_write = auto_write;
    }

    /// Color of one LED (negative indices count from the end)
    pub fn get(&self, index: isize) -> Result<Rgb, LedError> {
        self.frame.get(index)
    }

    /// Colors of the LEDs selected by `range`
    pub fn get_range(
        &self,
        range: impl Into<IndexRange>,
    ) -> Result<Vec<Rgb, MAX_CHAINED_LEDS>, LedError> {
        self.frame.get_range(range.into())
    }

    /// Set one LED
    pub fn set(&mut self, index: isize, color: impl Into<Rgb>) -> Result<(), LedError> {
        self.frame.set(index, color.into())?;
        self.write_if_auto();
        Ok(())
    }

    /// Set the LEDs selected by `range`, one color per LED
    ///
    /// Nothing is written unless `colors` matches the range length. With
    /// auto-write on, the chain is transmitted once after all writes.
    pub fn set_range(
        &mut self,
        range: impl Into<IndexRange>,
        colors: &[Rgb],
    ) -> Result<(), LedError> {
        self.frame.set_range(range.into(), colors)?;
        self.write_if_auto();
        Ok(())
    }

    /// Set every LED to `color` (one transmit with auto-write on)
    pub fn fill(&mut self, color: impl Into<Rgb>) {
        self.frame.fill(color.into());
        self.write_if_auto();
    }

    /// Blank every LED and transmit
    pub fn reset(&mut self) {
        self.frame.clear();
        self.transmit();
    }

    /// Current frame buffer
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Borrow the transport
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Give the transport back
    pub fn release(self) -> B {
        self.bus
    }

    fn write_if_auto(&mut self) {
        if self.auto_write {
            self.transmit();
        }
    }
}

impl<B: FrameBus> Transmittable for ChainedLed<B> {
    fn transmit(&mut self) {
        self.bus.send(&self.frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec as StdVec;

    /// Bus that keeps a copy of every frame it is asked to send
    #[derive(Default)]
    struct CaptureBus {
        sent: StdVec<StdVec<[u8; 4]>>,
    }

    impl FrameBus for CaptureBus {
        fn send(&mut self, frame: &FrameBuffer) {
            self.sent
                .push(frame.records().iter().map(|r| r.bytes()).collect());
        }
    }

    #[test]
    fn test_new_transmits_blank_frame() {
        for auto_write in [true, false] {
            let leds = ChainedLed::new(CaptureBus::default(), 2, auto_write).unwrap();
            assert_eq!(leds.bus().sent.len(), 1);
            assert_eq!(leds.bus().sent[0], [[0xC0, 0, 0, 0]; 2]);
        }
    }

    #[test]
    fn test_set_with_auto_write() {
        let mut leds = ChainedLed::new(CaptureBus::default(), 2, true).unwrap();
        leds.set(1, (0xFF, 0x10, 0x20)).unwrap();
        assert_eq!(leds.bus().sent.len(), 2);
        assert_eq!(leds.bus().sent[1][1], [0xC3, 0x20, 0x10, 0xFF]);
        assert_eq!(leds.get(1), Ok(Rgb::new(0xFF, 0x10, 0x20)));
    }

    #[test]
    fn test_set_without_auto_write() {
        let mut leds = ChainedLed::new(CaptureBus::default(), 2, false).unwrap();
        leds.set(0, Rgb::RED).unwrap();
        leds.fill(Rgb::GREEN);
        assert_eq!(leds.bus().sent.len(), 1);

        leds.transmit();
        assert_eq!(leds.bus().sent.len(), 2);
        assert_eq!(leds.bus().sent[1], [[0xCC, 0, 0xFF, 0]; 2]);
    }

    #[test]
    fn test_errors_do_not_transmit() {
        let mut leds = ChainedLed::new(CaptureBus::default(), 3, true).unwrap();
        assert_eq!(leds.set(3, Rgb::RED), Err(LedError::IndexOutOfRange));
        assert_eq!(
            leds.set_range(IndexRange::span(0, 2), &[Rgb::RED]),
            Err(LedError::LengthMismatch)
        );
        assert_eq!(leds.bus().sent.len(), 1);
    }

    #[test]
    fn test_set_range_single_transmit() {
        let mut leds = ChainedLed::new(CaptureBus::default(), 4, true).unwrap();
        leds.set_range(.., &[Rgb::RED, Rgb::GREEN, Rgb::BLUE, Rgb::WHITE])
            .unwrap();
        assert_eq!(leds.bus().sent.len(), 2);
        assert_eq!(
            leds.get_range(IndexRange::span(1, 3)).unwrap().as_slice(),
            &[Rgb::GREEN, Rgb::BLUE]
        );
    }

    #[test]
    fn test_reset_after_colors() {
        let mut leds = ChainedLed::new(CaptureBus::default(), 2, false).unwrap();
        leds.fill(Rgb::WHITE);
        leds.reset();
        assert_eq!(leds.get(0), Ok(Rgb::BLACK));
        assert_eq!(leds.get(-1), Ok(Rgb::BLACK));
        assert_eq!(leds.frame().records()[1].checksum(), 0xC0);
        assert_eq!(leds.bus().sent.len(), 2);
    }
}
