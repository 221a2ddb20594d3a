//! Grove connector table
//!
//! Every Grove header carries two signal pins. Drivers that need one line
//! (ultrasonic, motion, analog) use `pin1`; two-line drivers (LED button,
//! chained LED) use both.
//!
//! | Connector | pin1 | pin2 |
//! |-----------|------|------|
//! | UART0     | 1    | 0    |
//! | UART1     | 5    | 4    |
//! | D16       | 16   | 17   |
//! | D18       | 18   | 19   |
//! | D20       | 20   | 21   |
//! | I2C0      | 9    | 8    |
//! | I2C1      | 7    | 6    |
//! | A0        | 26   | 26   |
//! | A1        | 27   | 26   |
//! | A2        | 28   | 27   |
//!
//! The analog headers overlap: A0 reports GPIO26 for both pins, and A1/A2
//! share their second pin with the neighbouring header. Claiming both pins
//! of an analog header can therefore conflict with another connector.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error resolving a connector name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectorError {
    /// No connector with that name
    Unknown,
}

/// Named Grove connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Connector {
    Uart0,
    Uart1,
    D16,
    D18,
    D20,
    I2c0,
    I2c1,
    A0,
    A1,
    A2,
}

impl Connector {
    /// All connectors in board order
    pub const ALL: [Connector; 10] = [
        Connector::Uart0,
        Connector::Uart1,
        Connector::D16,
        Connector::D18,
        Connector::D20,
        Connector::I2c0,
        Connector::I2c1,
        Connector::A0,
        Connector::A1,
        Connector::A2,
    ];

    /// Silkscreen name
    pub const fn name(self) -> &'static str {
        match self {
            Connector::Uart0 => "UART0",
            Connector::Uart1 => "UART1",
            Connector::D16 => "D16",
            Connector::D18 => "D18",
            Connector::D20 => "D20",
            Connector::I2c0 => "I2C0",
            Connector::I2c1 => "I2C1",
            Connector::A0 => "A0",
            Connector::A1 => "A1",
            Connector::A2 => "A2",
        }
    }

    /// First signal pin
    pub const fn pin1(self) -> u8 {
        match self {
            Connector::Uart0 => 1,
            Connector::Uart1 => 5,
            Connector::D16 => 16,
            Connector::D18 => 18,
            Connector::D20 => 20,
            Connector::I2c0 => 9,
            Connector::I2c1 => 7,
            Connector::A0 => 26,
            Connector::A1 => 27,
            Connector::A2 => 28,
        }
    }

    /// Second signal pin
    pub const fn pin2(self) -> u8 {
        match self {
            Connector::Uart0 => 0,
            Connector::Uart1 => 4,
            Connector::D16 => 17,
            Connector::D18 => 19,
            Connector::D20 => 21,
            Connector::I2c0 => 8,
            Connector::I2c1 => 6,
            Connector::A0 => 26,
            Connector::A1 => 26,
            Connector::A2 => 27,
        }
    }

    /// Whether pin1 and pin2 are different GPIOs
    ///
    /// A0 routes GPIO26 to both positions, so it can only host one-pin
    /// devices.
    pub const fn has_two_pins(self) -> bool {
        self.pin1() != self.pin2()
    }

    /// Look up a connector by its silkscreen name (exact match)
    pub fn from_name(name: &str) -> Result<Self, ConnectorError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or(ConnectorError::Unknown)
    }
}

impl FromStr for Connector {
    type Err = ConnectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
