//! Bit-banged P9813 transport
//!
//! Wire format, clocked on the rising edge with no minimum pulse width:
//!
//! ```text
//! start frame   32 × 0
//! per LED       checksum, blue, green, red  (8 bits each, MSB first)
//! end frame     32 × 0
//! ```
//!
//! Pulses are as fast as the GPIO writes. The P9813 tolerates this on an
//! RP2040 at 125 MHz; a much faster core may need a delay between edges.

use picogrove_core::traits::FrameBus;
use picogrove_core::FrameBuffer;
use picogrove_hal::OutputPin;

/// Zero bits in a start or end frame
pub const FRAME_PULSES: usize = 32;

/// P9813 transport over two GPIO outputs
pub struct P9813BitBang<CLK, DAT> {
    clock: CLK,
    data: DAT,
}

impl<CLK: OutputPin, DAT: OutputPin> P9813BitBang<CLK, DAT> {
    pub fn new(clock: CLK, data: DAT) -> Self {
        Self { clock, data }
    }

    /// Give both pins back
    pub fn release(self) -> (CLK, DAT) {
        (self.clock, self.data)
    }

    /// One low→high edge on the clock line
    fn clock_pulse(&mut self) {
        self.clock.set_low();
        self.clock.set_high();
    }

    /// Start/end delimiter: data held low for 32 clocks
    fn write_frame_marker(&mut self) {
        self.data.set_low();
        for _ in 0..FRAME_PULSES {
            self.clock_pulse();
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if byte == 0 {
            // Fast path: 8 zero bits with a single data write
            self.data.set_low();
            for _ in 0..8 {
                self.clock_pulse();
            }
            return;
        }

        let mut bits = byte;
        for _ in 0..8 {
            self.data.set_state(bits & 0x80 != 0);
            self.clock_pulse();
            bits <<= 1;
        }
    }
}

impl<CLK: OutputPin, DAT: OutputPin> FrameBus for P9813BitBang<CLK, DAT> {
    fn send(&mut self, frame: &FrameBuffer) {
        self.write_frame_marker();
        for record in frame.records() {
            for byte in record.bytes() {
                self.write_byte(byte);
            }
        }
        self.write_frame_marker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picogrove_core::Rgb;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Shared view of both lines: the data level sampled at each rising
    /// clock edge, plus the number of data writes
    #[derive(Default)]
    struct Wire {
        clock: bool,
        data: bool,
        bits: Vec<bool>,
        data_writes: usize,
    }

    struct ClockLine(Rc<RefCell<Wire>>);
    struct DataLine(Rc<RefCell<Wire>>);

    impl OutputPin for ClockLine {
        fn set_high(&mut self) {
            let mut wire = self.0.borrow_mut();
            if !wire.clock {
                let bit = wire.data;
                wire.bits.push(bit);
            }
            wire.clock = true;
        }

        fn set_low(&mut self) {
            self.0.borrow_mut().clock = false;
        }

        fn is_set_high(&self) -> bool {
            self.0.borrow().clock
        }
    }

    impl OutputPin for DataLine {
        fn set_high(&mut self) {
            let mut wire = self.0.borrow_mut();
            wire.data = true;
            wire.data_writes += 1;
        }

        fn set_low(&mut self) {
            let mut wire = self.0.borrow_mut();
            wire.data = false;
            wire.data_writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.0.borrow().data
        }
    }

    fn bus() -> (P9813BitBang<ClockLine, DataLine>, Rc<RefCell<Wire>>) {
        let wire = Rc::new(RefCell::new(Wire::default()));
        (
            P9813BitBang::new(ClockLine(wire.clone()), DataLine(wire.clone())),
            wire,
        )
    }

    #[test]
    fn test_byte_msb_first() {
        let (mut bus, wire) = bus();
        bus.write_byte(0b1010_0011);
        assert_eq!(
            wire.borrow().bits,
            [true, false, true, false, false, false, true, true]
        );
        assert_eq!(wire.borrow().data_writes, 8);
    }

    #[test]
    fn test_zero_byte_fast_path() {
        let (mut bus, wire) = bus();
        bus.write_byte(0);
        assert_eq!(wire.borrow().bits, [false; 8]);
        // One data write instead of eight
        assert_eq!(wire.borrow().data_writes, 1);
    }

    #[test]
    fn test_empty_chain_is_two_markers() {
        let (mut bus, wire) = bus();
        bus.send(&FrameBuffer::new(0).unwrap());
        assert_eq!(wire.borrow().bits.len(), 2 * FRAME_PULSES);
        assert!(wire.borrow().bits.iter().all(|&b| !b));
    }

    #[test]
    fn test_send_does_not_touch_buffer() {
        let (mut bus, _) = bus();
        let mut frame = FrameBuffer::new(2).unwrap();
        frame.set(0, Rgb::new(0x81, 0x42, 0xFF)).unwrap();
        let before = frame.clone();
        bus.send(&frame);
        assert_eq!(frame, before);
    }
}
