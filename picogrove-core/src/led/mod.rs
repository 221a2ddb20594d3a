//! Chained RGB LED (P9813) frame model
//!
//! The P9813 expects, for every LED in the chain, a control byte followed by
//! blue, green and red. The control byte carries two constant `1` bits and
//! the top two bits of each channel:
//!
//! ```text
//!  bit:   7   6   5   4   3   2   1   0
//!         1   1  B7  B6  G7  G6  R7  R6
//! ```
//!
//! [`FrameBuffer`] stores records in that wire order so a transport can send
//! them byte for byte.

pub mod frame;
pub mod range;

pub use frame::{checksum, FrameBuffer, LedRecord, CHECKSUM_BASE, MAX_CHAINED_LEDS};
pub use range::{IndexRange, Indices};

/// Errors from LED addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    /// Index outside `[0, len)` after negative wrap
    IndexOutOfRange,
    /// Bulk write length differs from the number of target indices
    LengthMismatch,
    /// Range step of zero
    InvalidStep,
    /// Requested chain longer than [`MAX_CHAINED_LEDS`]
    CapacityExceeded,
}
