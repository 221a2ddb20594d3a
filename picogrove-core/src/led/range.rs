//! Slice-style index ranges
//!
//! An [`IndexRange`] selects LEDs the way `start:stop:step` does in a
//! slice expression: missing bounds default to the ends of the chain,
//! negative bounds count from the end, and out-of-range bounds are clamped
//! instead of rejected. A negative step walks the chain backwards.

use core::ops::{Range, RangeFull};

use super::LedError;

/// `start:stop:step` selection over a chain of LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndexRange {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: isize,
}

impl IndexRange {
    /// Every LED, in chain order
    pub const FULL: IndexRange = IndexRange::new(None, None, 1);

    pub const fn new(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        Self { start, stop, step }
    }

    /// `start..stop` with step 1
    pub const fn span(start: isize, stop: isize) -> Self {
        Self::new(Some(start), Some(stop), 1)
    }

    /// Same bounds, different step
    pub const fn with_step(self, step: isize) -> Self {
        Self { step, ..self }
    }

    /// Resolve against a chain of `len` LEDs
    ///
    /// The returned iterator yields only indices in `[0, len)`.
    pub fn indices(&self, len: usize) -> Result<Indices, LedError> {
        if self.step == 0 {
            return Err(LedError::InvalidStep);
        }
        let len = len as isize;
        let step = self.step;

        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: Option<isize>, default: isize| match bound {
            None => default,
            Some(v) if v < 0 => v.saturating_add(len).max(lower),
            Some(v) => v.min(upper),
        };

        let start = clamp(self.start, if step < 0 { upper } else { lower });
        let stop = clamp(self.stop, if step < 0 { lower } else { upper });

        let stride = step.unsigned_abs();
        let remaining = if step > 0 && start < stop {
            (stop - start - 1) as usize / stride + 1
        } else if step < 0 && stop < start {
            (start - stop - 1) as usize / stride + 1
        } else {
            0
        };

        Ok(Indices {
            next: start,
            step,
            remaining,
        })
    }

    /// Number of LEDs selected in a chain of `len`
    pub fn count(&self, len: usize) -> Result<usize, LedError> {
        self.indices(len).map(|i| i.len())
    }
}

impl Default for IndexRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl From<Range<isize>> for IndexRange {
    fn from(r: Range<isize>) -> Self {
        Self::span(r.start, r.end)
    }
}

impl From<RangeFull> for IndexRange {
    fn from(_: RangeFull) -> Self {
        Self::FULL
    }
}

/// Resolved LED positions of an [`IndexRange`]
#[derive(Debug, Clone)]
pub struct Indices {
    next: isize,
    step: isize,
    remaining: usize,
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next;
        self.remaining -= 1;
        self.next = self.next.saturating_add(self.step);
        Some(current as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Indices {}
