//! Monotonic microsecond clock
//!
//! The tick counter is 32 bits wide and wraps after ~71.6 minutes.
//! Elapsed times are computed with wrapping subtraction so a measurement
//! that straddles the wrap point is still correct.

/// Monotonic microsecond tick source
pub trait MicrosClock {
    /// Current tick count in microseconds (wraps at `u32::MAX`)
    fn now_micros(&self) -> u32;

    /// Microseconds from `earlier` to `later`, wraparound-safe
    fn elapsed(&self, later: u32, earlier: u32) -> u32 {
        ticks_diff(later, earlier)
    }

    /// Microseconds elapsed since `earlier`
    fn elapsed_since(&self, earlier: u32) -> u32 {
        self.elapsed(self.now_micros(), earlier)
    }
}

impl<C: MicrosClock + ?Sized> MicrosClock for &C {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }
}

/// Wraparound-safe tick difference
///
/// Valid as long as the true interval is shorter than one full wrap.
#[inline]
pub const fn ticks_diff(later: u32, earlier: u32) -> u32 {
    later.wrapping_sub(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_diff_plain() {
        assert_eq!(ticks_diff(150, 100), 50);
        assert_eq!(ticks_diff(100, 100), 0);
    }

    #[test]
    fn test_ticks_diff_across_wrap() {
        // 10 ticks before wrap to 5 ticks after
        assert_eq!(ticks_diff(5, u32::MAX - 9), 15);
        assert_eq!(ticks_diff(0, u32::MAX), 1);
    }
}
