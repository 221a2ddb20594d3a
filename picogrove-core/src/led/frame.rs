//! Frame buffer with embedded checksum bytes

use heapless::Vec;

use super::range::IndexRange;
use super::LedError;
use crate::color::Rgb;

/// Maximum number of LEDs in one chain
pub const MAX_CHAINED_LEDS: usize = 32;

/// Control byte with no color bits set
pub const CHECKSUM_BASE: u8 = 0b1100_0000;

/// Control byte for a color
pub const fn checksum(color: Rgb) -> u8 {
    CHECKSUM_BASE | ((color.b & 0xC0) >> 2) | ((color.g & 0xC0) >> 4) | ((color.r & 0xC0) >> 6)
}

/// One LED as sent on the wire: `[checksum, blue, green, red]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedRecord([u8; 4]);

impl LedRecord {
    /// Record for an unlit LED
    pub const BLANK: LedRecord = LedRecord([CHECKSUM_BASE, 0, 0, 0]);

    /// Encode a color, computing its checksum
    pub const fn encode(color: Rgb) -> Self {
        Self([checksum(color), color.b, color.g, color.r])
    }

    /// Stored control byte
    pub const fn checksum(&self) -> u8 {
        self.0[0]
    }

    /// Stored color (checksum excluded)
    pub const fn color(&self) -> Rgb {
        Rgb::new(self.0[3], self.0[2], self.0[1])
    }

    /// Bytes in transmit order
    pub const fn bytes(&self) -> [u8; 4] {
        self.0
    }
}

impl Default for LedRecord {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Color records for a fixed-length LED chain
///
/// The length is set at construction and never changes. Every write goes
/// through [`LedRecord::encode`], so a record's checksum always matches its
/// color bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    records: Vec<LedRecord, MAX_CHAINED_LEDS>,
}

impl FrameBuffer {
    /// Create a buffer of `count` blank records
    pub fn new(count: usize) -> Result<Self, LedError> {
        if count > MAX_CHAINED_LEDS {
            return Err(LedError::CapacityExceeded);
        }
        let mut records = Vec::new();
        records
            .resize(count, LedRecord::BLANK)
            .map_err(|_| LedError::CapacityExceeded)?;
        Ok(Self { records })
    }

    /// Number of LEDs
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a possibly negative index to a buffer position
    ///
    /// `-1` is the last LED. Anything outside `[-len, len)` is an error.
    pub fn resolve(&self, index: isize) -> Result<usize, LedError> {
        let len = self.len() as isize;
        let resolved = if index < 0 { index + len } else { index };
        if resolved < 0 || resolved >= len {
            return Err(LedError::IndexOutOfRange);
        }
        Ok(resolved as usize)
    }

    /// Read one LED's color
    pub fn get(&self, index: isize) -> Result<Rgb, LedError> {
        let i = self.resolve(index)?;
        Ok(self.records[i].color())
    }

    /// Write one LED's color and checksum
    pub fn set(&mut self, index: isize, color: Rgb) -> Result<(), LedError> {
        let i = self.resolve(index)?;
        self.records[i] = LedRecord::encode(color);
        Ok(())
    }

    /// Read the colors selected by `range`
    pub fn get_range(&self, range: IndexRange) -> Result<Vec<Rgb, MAX_CHAINED_LEDS>, LedError> {
        let mut out = Vec::new();
        for i in range.indices(self.len())? {
            let record = self.records.get(i).ok_or(LedError::IndexOutOfRange)?;
            out.push(record.color())
                .map_err(|_| LedError::CapacityExceeded)?;
        }
        Ok(out)
    }

    /// Write `colors` to the LEDs selected by `range`
    ///
    /// All-or-nothing: the buffer is untouched unless every index is valid
    /// and `colors` has exactly one entry per selected LED.
    pub fn set_range(&mut self, range: IndexRange, colors: &[Rgb]) -> Result<(), LedError> {
        let indices = range.indices(self.len())?;
        if indices.len() != colors.len() {
            return Err(LedError::LengthMismatch);
        }
        if indices.clone().any(|i| i >= self.len()) {
            return Err(LedError::IndexOutOfRange);
        }
        for (i, &color) in indices.zip(colors) {
            self.records[i] = LedRecord::encode(color);
        }
        Ok(())
    }

    /// Set every LED to `color`
    pub fn fill(&mut self, color: Rgb) {
        let record = LedRecord::encode(color);
        self.records.iter_mut().for_each(|r| *r = record);
    }

    /// Blank every LED (color zero, base checksum)
    pub fn clear(&mut self) {
        self.records.iter_mut().for_each(|r| *r = LedRecord::BLANK);
    }

    /// Records in chain order
    pub fn records(&self) -> &[LedRecord] {
        &self.records
    }

    /// Colors in chain order
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.records.iter().map(LedRecord::color)
    }
}
