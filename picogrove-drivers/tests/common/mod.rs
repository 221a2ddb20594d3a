//! Recording mocks shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use picogrove_hal::{
    AdcReader, DelayNs, FlexPin, InputPin, MicrosClock, OutputPin, PinDirection, PinError,
    PinSource, Pull, PwmOutput,
};

/// Every pin level, plus the ordered log of output writes
#[derive(Default)]
pub struct Lines {
    pub levels: HashMap<u8, bool>,
    pub writes: Vec<(u8, bool)>,
}

pub type SharedLines = Rc<RefCell<Lines>>;

impl Lines {
    /// Data bits sampled on each rising edge of `clock`
    pub fn clocked_bits(&self, clock: u8, data: u8) -> Vec<bool> {
        let mut clock_level = false;
        let mut data_level = false;
        let mut bits = Vec::new();
        for &(pin, level) in &self.writes {
            if pin == data {
                data_level = level;
            }
            if pin == clock {
                if level && !clock_level {
                    bits.push(data_level);
                }
                clock_level = level;
            }
        }
        bits
    }

    /// Number of writes to `pin`
    pub fn write_count(&self, pin: u8) -> usize {
        self.writes.iter().filter(|(p, _)| *p == pin).count()
    }
}

pub struct MockOutput {
    pub pin: u8,
    lines: SharedLines,
}

impl OutputPin for MockOutput {
    fn set_high(&mut self) {
        let mut lines = self.lines.borrow_mut();
        lines.levels.insert(self.pin, true);
        lines.writes.push((self.pin, true));
    }

    fn set_low(&mut self) {
        let mut lines = self.lines.borrow_mut();
        lines.levels.insert(self.pin, false);
        lines.writes.push((self.pin, false));
    }

    fn is_set_high(&self) -> bool {
        self.lines.borrow().levels.get(&self.pin).copied().unwrap_or(false)
    }
}

pub struct MockInput {
    pub pin: u8,
    lines: SharedLines,
}

impl InputPin for MockInput {
    fn is_high(&self) -> bool {
        self.lines.borrow().levels.get(&self.pin).copied().unwrap_or(false)
    }
}

pub struct MockFlex {
    pub pin: u8,
    pub direction: PinDirection,
    lines: SharedLines,
}

impl OutputPin for MockFlex {
    fn set_high(&mut self) {
        let mut lines = self.lines.borrow_mut();
        lines.levels.insert(self.pin, true);
        lines.writes.push((self.pin, true));
    }

    fn set_low(&mut self) {
        let mut lines = self.lines.borrow_mut();
        lines.levels.insert(self.pin, false);
        lines.writes.push((self.pin, false));
    }

    fn is_set_high(&self) -> bool {
        self.lines.borrow().levels.get(&self.pin).copied().unwrap_or(false)
    }
}

impl InputPin for MockFlex {
    fn is_high(&self) -> bool {
        self.lines.borrow().levels.get(&self.pin).copied().unwrap_or(false)
    }
}

impl FlexPin for MockFlex {
    fn set_direction(&mut self, direction: PinDirection) {
        self.direction = direction;
    }
}

pub struct MockAdc {
    pub pin: u8,
    pub value: u16,
}

impl AdcReader for MockAdc {
    type Error = ();

    fn read(&mut self) -> Result<u16, ()> {
        Ok(self.value)
    }
}

/// Last frequency and duty written to a PWM channel
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PwmState {
    pub frequency_hz: u32,
    pub duty: u16,
}

pub struct MockPwm {
    pub pin: u8,
    state: Rc<RefCell<HashMap<u8, PwmState>>>,
}

impl MockPwm {
    fn update(&self, f: impl FnOnce(&mut PwmState)) {
        f(self.state.borrow_mut().entry(self.pin).or_default());
    }
}

impl PwmOutput for MockPwm {
    fn set_frequency(&mut self, hz: u32) {
        self.update(|s| s.frequency_hz = hz);
    }

    fn set_duty(&mut self, duty: u16) {
        self.update(|s| s.duty = duty);
    }
}

/// Pin source that refuses double claims, like a real pin bank
///
/// PWM pins also claim their slice, `(pin / 2) % 8`, as on the RP2040.
pub struct MockPins {
    pub lines: SharedLines,
    pub claimed: HashSet<u8>,
    pub slices: HashSet<u8>,
    pub pwm: Rc<RefCell<HashMap<u8, PwmState>>>,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            lines: Rc::new(RefCell::new(Lines::default())),
            claimed: HashSet::new(),
            slices: HashSet::new(),
            pwm: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    fn claim(&mut self, pin: u8) -> Result<(), PinError> {
        if pin >= 30 {
            return Err(PinError::InvalidPin);
        }
        if !self.claimed.insert(pin) {
            return Err(PinError::AlreadyTaken);
        }
        Ok(())
    }
}

impl PinSource for MockPins {
    type Output = MockOutput;
    type Input = MockInput;
    type Flex = MockFlex;
    type Analog = MockAdc;
    type Pwm = MockPwm;

    fn output(&mut self, pin: u8) -> Result<MockOutput, PinError> {
        self.claim(pin)?;
        Ok(MockOutput {
            pin,
            lines: self.lines.clone(),
        })
    }

    fn input(&mut self, pin: u8, _pull: Pull) -> Result<MockInput, PinError> {
        self.claim(pin)?;
        Ok(MockInput {
            pin,
            lines: self.lines.clone(),
        })
    }

    fn flex(&mut self, pin: u8) -> Result<MockFlex, PinError> {
        self.claim(pin)?;
        Ok(MockFlex {
            pin,
            direction: PinDirection::Input,
            lines: self.lines.clone(),
        })
    }

    fn analog(&mut self, pin: u8) -> Result<MockAdc, PinError> {
        if !(26..=29).contains(&pin) {
            return Err(PinError::NotAnalog);
        }
        self.claim(pin)?;
        Ok(MockAdc {
            pin,
            value: 2048,
        })
    }

    fn pwm(&mut self, pin: u8) -> Result<MockPwm, PinError> {
        if pin >= 30 {
            return Err(PinError::InvalidPin);
        }
        if self.claimed.contains(&pin) {
            return Err(PinError::AlreadyTaken);
        }
        if !self.slices.insert((pin / 2) % 8) {
            return Err(PinError::PwmBusy);
        }
        self.claim(pin)?;
        Ok(MockPwm {
            pin,
            state: self.pwm.clone(),
        })
    }
}

/// Clock that advances 1 µs per read
#[derive(Clone, Default)]
pub struct TickClock {
    now: Rc<Cell<u32>>,
}

impl MicrosClock for TickClock {
    fn now_micros(&self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(1));
        t
    }
}

#[derive(Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
