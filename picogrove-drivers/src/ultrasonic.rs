//! Ultrasonic ranger (Grove single-pin type)
//!
//! Trigger and echo share one line. A measurement:
//!
//! 1. drives the line low for 2 µs, high for 5 µs, then low again
//! 2. switches the line to input
//! 3. waits out any echo still in progress from a previous trigger
//! 4. waits for the echo to rise, then for it to fall
//!
//! All three waits poll against one deadline taken right after the line is
//! switched to input, so a measurement never blocks longer than the timeout.
//! The caller is blocked for the whole measurement; nothing yields.

use picogrove_core::ranging::{DEFAULT_TIMEOUT_US, TRIGGER_PULSE_US, TRIGGER_SETTLE_US};
use picogrove_core::traits::RangeFinder;
use picogrove_core::{EchoPulse, RangingError};
use picogrove_hal::{DelayNs, FlexPin, MicrosClock};

/// Return a timed-out wait, tracing which stage ran out of time
macro_rules! bail_on_timeout {
    ($wait:expr, $stage:literal) => {
        if let Err(e) = $wait {
            #[cfg(feature = "defmt")]
            defmt::trace!("echo timeout: {=str}", $stage);
            return Err(e);
        }
    };
}

/// Single-pin ultrasonic ranger
pub struct EchoRanger<P, C, D> {
    pin: P,
    clock: C,
    delay: D,
    timeout_us: u32,
}

impl<P, C, D> EchoRanger<P, C, D> {
    /// Create a ranger with the default 100 ms timeout
    pub fn new(pin: P, clock: C, delay: D) -> Self {
        Self::with_timeout(pin, clock, delay, DEFAULT_TIMEOUT_US)
    }

    /// Create a ranger with a custom timeout (µs)
    pub fn with_timeout(pin: P, clock: C, delay: D, timeout_us: u32) -> Self {
        Self {
            pin,
            clock,
            delay,
            timeout_us,
        }
    }

    /// Change the timeout used by the `measure_*` conversions
    pub fn set_timeout_us(&mut self, timeout_us: u32) {
        self.timeout_us = timeout_us;
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: FlexPin, C: MicrosClock, D: DelayNs> EchoRanger<P, C, D> {
    /// Send the trigger pulse and leave the line as input
    fn trigger(&mut self) {
        self.pin.set_as_output();
        self.pin.set_low();
        self.delay.delay_us(TRIGGER_SETTLE_US);
        self.pin.set_high();
        self.delay.delay_us(TRIGGER_PULSE_US);
        self.pin.set_low();
        self.pin.set_as_input();
    }

    /// Spin while the line reads `high`, bounded by `begin + timeout_us`
    fn wait_while(&self, high: bool, begin: u32, timeout_us: u32) -> Result<(), RangingError> {
        while self.pin.is_high() == high {
            if self.clock.elapsed_since(begin) >= timeout_us {
                return Err(RangingError::TimedOut);
            }
        }
        Ok(())
    }

    /// Time the width of the next high pulse on the line
    fn pulse_in(&self, timeout_us: u32) -> Result<EchoPulse, RangingError> {
        let begin = self.clock.now_micros();

        bail_on_timeout!(self.wait_while(true, begin, timeout_us), "previous echo still high");

        bail_on_timeout!(self.wait_while(false, begin, timeout_us), "no echo");
        let pulse_start = self.clock.now_micros();

        bail_on_timeout!(self.wait_while(true, begin, timeout_us), "echo never ended");
        let pulse_end = self.clock.now_micros();

        Ok(EchoPulse::from_micros(
            self.clock.elapsed(pulse_end, pulse_start),
        ))
    }
}

impl<P: FlexPin, C: MicrosClock, D: DelayNs> RangeFinder for EchoRanger<P, C, D> {
    fn timeout_us(&self) -> u32 {
        self.timeout_us
    }

    fn measure_duration(&mut self, timeout_us: u32) -> Result<EchoPulse, RangingError> {
        self.trigger();
        self.pulse_in(timeout_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picogrove_hal::{InputPin, OutputPin, PinDirection};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::vec::Vec;

    /// Clock that advances 1 µs every time it is read
    #[derive(Clone)]
    struct SimClock {
        now: Rc<Cell<u32>>,
    }

    impl MicrosClock for SimClock {
        fn now_micros(&self) -> u32 {
            let t = self.now.get();
            self.now.set(t.wrapping_add(1));
            t
        }
    }

    /// Delay that advances the simulated clock and records the request
    struct SimDelay {
        now: Rc<Cell<u32>>,
        log: Rc<RefCell<Vec<Event>>>,
    }

    impl DelayNs for SimDelay {
        fn delay_ns(&mut self, ns: u32) {
            let us = ns / 1000;
            self.log.borrow_mut().push(Event::Delay(us));
            self.now.set(self.now.get().wrapping_add(us));
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Dir(PinDirection),
        Drive(bool),
        Delay(u32),
    }

    /// Line that is high while `start <= t - origin < end` for any window
    struct SimPin {
        now: Rc<Cell<u32>>,
        origin: u32,
        windows: Vec<(u32, u32)>,
        driven: bool,
        log: Rc<RefCell<Vec<Event>>>,
    }

    impl OutputPin for SimPin {
        fn set_high(&mut self) {
            self.driven = true;
            self.log.borrow_mut().push(Event::Drive(true));
        }

        fn set_low(&mut self) {
            self.driven = false;
            self.log.borrow_mut().push(Event::Drive(false));
        }

        fn is_set_high(&self) -> bool {
            self.driven
        }
    }

    impl InputPin for SimPin {
        fn is_high(&self) -> bool {
            let t = self.now.get().wrapping_sub(self.origin);
            self.windows.iter().any(|&(start, end)| t >= start && t < end)
        }
    }

    impl FlexPin for SimPin {
        fn set_direction(&mut self, direction: PinDirection) {
            self.log.borrow_mut().push(Event::Dir(direction));
        }
    }

    type SimRanger = EchoRanger<SimPin, SimClock, SimDelay>;

    fn sim_ranger(origin: u32, windows: &[(u32, u32)]) -> (SimRanger, Rc<RefCell<Vec<Event>>>) {
        let now = Rc::new(Cell::new(origin));
        let log = Rc::new(RefCell::new(Vec::new()));
        let pin = SimPin {
            now: now.clone(),
            origin,
            windows: windows.to_vec(),
            driven: false,
            log: log.clone(),
        };
        let clock = SimClock { now: now.clone() };
        let delay = SimDelay {
            now,
            log: log.clone(),
        };
        (EchoRanger::new(pin, clock, delay), log)
    }

    #[test]
    fn test_trigger_sequence() {
        let (mut ranger, log) = sim_ranger(0, &[(100, 680)]);
        ranger.measure_duration(10_000).unwrap();

        assert_eq!(
            log.borrow().as_slice(),
            &[
                Event::Dir(PinDirection::Output),
                Event::Drive(false),
                Event::Delay(2),
                Event::Drive(true),
                Event::Delay(5),
                Event::Drive(false),
                Event::Dir(PinDirection::Input),
            ]
        );
    }

    #[test]
    fn test_measures_pulse_width() {
        let (mut ranger, _) = sim_ranger(0, &[(100, 680)]);
        assert_eq!(
            ranger.measure_duration(10_000),
            Ok(EchoPulse::from_micros(580))
        );
    }

    #[test]
    fn test_drains_stale_echo() {
        // Line still high from an earlier ping when the wait starts
        let (mut ranger, _) = sim_ranger(0, &[(0, 50), (200, 500)]);
        assert_eq!(
            ranger.measure_duration(10_000),
            Ok(EchoPulse::from_micros(300))
        );
    }

    #[test]
    fn test_pulse_across_clock_wrap() {
        let (mut ranger, _) = sim_ranger(u32::MAX - 150, &[(100, 400)]);
        assert_eq!(
            ranger.measure_duration(10_000),
            Ok(EchoPulse::from_micros(300))
        );
    }

    #[test]
    fn test_timeout_each_phase() {
        // Never stops being high (drain)
        let (mut stuck_high, _) = sim_ranger(0, &[(0, u32::MAX)]);
        // Never rises
        let (mut silent, _) = sim_ranger(0, &[]);
        // Rises but never falls
        let (mut endless, _) = sim_ranger(0, &[(100, u32::MAX)]);

        assert_eq!(stuck_high.measure_duration(1000), Err(RangingError::TimedOut));
        assert_eq!(silent.measure_duration(1000), Err(RangingError::TimedOut));
        assert_eq!(endless.measure_duration(1000), Err(RangingError::TimedOut));
    }

    #[test]
    fn test_single_deadline_for_all_phases() {
        // Echo is 600 µs wide, shorter than the 1000 µs budget, but it ends
        // 1200 µs after the wait started
        let (mut ranger, _) = sim_ranger(0, &[(600, 1200)]);
        assert_eq!(ranger.measure_duration(1000), Err(RangingError::TimedOut));
    }

    #[test]
    fn test_conversions_use_configured_timeout() {
        let (mut ranger, _) = sim_ranger(0, &[(100, 680)]);
        ranger.set_timeout_us(10_000);
        let cm = ranger.measure_centimeters().unwrap();
        assert!((cm - 10.0).abs() < 1e-4);

        let (mut ranger, _) = sim_ranger(0, &[(100, 680)]);
        let mm = ranger.measure_millimeters().unwrap();
        assert!((mm - 100.0).abs() < 1e-3);

        // Echo arrives after the configured budget
        let (mut late, _) = sim_ranger(0, &[(5_000, 5_100)]);
        late.set_timeout_us(1_000);
        assert_eq!(late.measure_inches(), Err(RangingError::TimedOut));
    }
}
