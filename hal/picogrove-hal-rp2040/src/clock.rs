//! Microsecond clock backed by the embassy time driver

use embassy_time::Instant;
use picogrove_hal::MicrosClock;

/// Free-running microsecond counter
///
/// The RP2040 timer counts at 1 MHz. Truncating to `u32` wraps about every
/// 71.6 minutes; [`MicrosClock::elapsed`] handles the wrap.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    #[inline]
    fn now_micros(&self) -> u32 {
        Instant::now().as_micros() as u32
    }
}
