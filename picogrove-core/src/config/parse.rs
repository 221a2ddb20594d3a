//! Minimal parser for `board.toml`
//!
//! Handles only the subset of TOML the board file uses; it is not a general
//! TOML parser.
//!
//! Supported:
//! - `[section]` headers
//! - `key = value` pairs (string, integer with optional `_` separators, boolean)
//! - Comments (`# ...`), full-line and trailing
//!
//! ```toml
//! [ultrasonic]
//! timeout_us = 100_000
//!
//! [chained_led]
//! count = 1
//! auto_write = true
//!
//! [bindings]
//! ranger = "D16"
//! leds = "D18"
//! ```

use heapless::String;

use super::types::{BoardConfig, CONFIG_VERSION};
use crate::connector::Connector;
use crate::led::MAX_CHAINED_LEDS;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
    /// Connector name not on the board
    InvalidConnector,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// `version` is not one this parser understands
    UnsupportedVersion,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Ultrasonic,
    ChainedLed,
    Bindings,
    Proximity,
}

/// Parse `board.toml` into a [`BoardConfig`]
///
/// Keys that are absent keep their default values.
pub fn parse_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    if config.proximity.far_mm <= config.proximity.near_mm {
        return Err(ParseError::InvalidValue);
    }

    Ok(config)
}

/// Parse a section header like "[chained_led]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|l| l.split('#').next())
        .map(str::trim)
        .and_then(|l| l.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match name.trim() {
        "ultrasonic" => Ok(Section::Ultrasonic),
        "chained_led" => Ok(Section::ChainedLed),
        "bindings" => Ok(Section::Bindings),
        "proximity" => Ok(Section::Proximity),
        _ => Err(ParseError::InvalidSection),
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Root, "version") => {
            if parse_int::<u8>(value)? != CONFIG_VERSION {
                return Err(ParseError::UnsupportedVersion);
            }
        }

        (Section::Ultrasonic, "timeout_us") => {
            let timeout: u32 = parse_int(value)?;
            if timeout == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.ultrasonic.timeout_us = timeout;
        }

        (Section::ChainedLed, "count") => {
            let count: u8 = parse_int(value)?;
            if count == 0 || count as usize > MAX_CHAINED_LEDS {
                return Err(ParseError::InvalidValue);
            }
            config.chained_led.count = count;
        }
        (Section::ChainedLed, "auto_write") => config.chained_led.auto_write = parse_bool(value)?,

        (Section::Bindings, "ranger") => config.bindings.ranger = Some(parse_connector(value)?),
        (Section::Bindings, "leds") => config.bindings.leds = Some(parse_two_pin_connector(value)?),
        (Section::Bindings, "button") => {
            config.bindings.button = Some(parse_two_pin_connector(value)?)
        }
        (Section::Bindings, "motion") => config.bindings.motion = Some(parse_connector(value)?),
        (Section::Bindings, "light") => config.bindings.light = Some(parse_connector(value)?),
        (Section::Bindings, "buzzer") => config.bindings.buzzer = Some(parse_connector(value)?),

        (Section::Proximity, "near_mm") => config.proximity.near_mm = parse_int(value)?,
        (Section::Proximity, "far_mm") => config.proximity.far_mm = parse_int(value)?,
        (Section::Proximity, "interval_ms") => {
            let interval: u32 = parse_int(value)?;
            if interval == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.proximity.interval_ms = interval;
        }

        _ => return Err(ParseError::UnknownKey),
    }
    Ok(())
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        // # inside a string is part of the value
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseError> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseError::InvalidValue)
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

fn parse_connector(value: &str) -> Result<Connector, ParseError> {
    let name = parse_string(value)?;
    Connector::from_name(name).map_err(|_| ParseError::InvalidConnector)
}

/// Connector for a device that needs both pins
fn parse_two_pin_connector(value: &str) -> Result<Connector, ParseError> {
    let connector = parse_connector(value)?;
    if !connector.has_two_pins() {
        return Err(ParseError::InvalidConnector);
    }
    Ok(connector)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Proximity lamp on a Grove Shield for Pi Pico
version = 1

[ultrasonic]
timeout_us = 30_000   # ~5 m max range

[chained_led]
count = 3
auto_write = false

[bindings]
ranger = "D16"
leds = "D18"
button = "D20"
light = "A0"
buzzer = "UART1"

[proximity]
near_mm = 50
far_mm = 800
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.ultrasonic.timeout_us, 30_000);
        assert_eq!(config.chained_led.count, 3);
        assert!(!config.chained_led.auto_write);
        assert_eq!(config.bindings.ranger, Some(Connector::D16));
        assert_eq!(config.bindings.leds, Some(Connector::D18));
        assert_eq!(config.bindings.button, Some(Connector::D20));
        assert_eq!(config.bindings.motion, None);
        assert_eq!(config.bindings.light, Some(Connector::A0));
        assert_eq!(config.bindings.buzzer, Some(Connector::Uart1));
        assert_eq!(config.proximity.near_mm, 50);
        assert_eq!(config.proximity.far_mm, 800);
        // Not in the file, keeps default
        assert_eq!(config.proximity.interval_ms, 250);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config(""), Ok(BoardConfig::default()));
        assert_eq!(parse_config("# nothing\n\n"), Ok(BoardConfig::default()));
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(parse_config("[stepper]\n"), Err(ParseError::InvalidSection));
        assert_eq!(parse_config("[bindings\n"), Err(ParseError::InvalidSection));
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_config("[ultrasonic]\nspeed = 3\n"),
            Err(ParseError::UnknownKey)
        );
        // Key in the wrong section
        assert_eq!(
            parse_config("[bindings]\ncount = 3\n"),
            Err(ParseError::UnknownKey)
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[chained_led]\ncount = 33\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[chained_led]\nauto_write = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[ultrasonic]\ntimeout_us = 0\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[bindings]\nranger = D16\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[proximity]\nnear_mm = 500\nfar_mm = 400\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_invalid_connector() {
        assert_eq!(
            parse_config("[bindings]\nleds = \"D17\"\n"),
            Err(ParseError::InvalidConnector)
        );
    }

    #[test]
    fn test_two_pin_devices_need_two_pins() {
        // A0 puts GPIO26 on both positions
        assert_eq!(
            parse_config("[bindings]\nleds = \"A0\"\n"),
            Err(ParseError::InvalidConnector)
        );
        assert_eq!(
            parse_config("[bindings]\nbutton = \"A0\"\n"),
            Err(ParseError::InvalidConnector)
        );
        // one-pin devices are fine there
        let config = parse_config("[bindings]\nlight = \"A0\"\nbuzzer = \"A0\"\n").unwrap();
        assert_eq!(config.bindings.light, Some(Connector::A0));
        assert_eq!(config.bindings.buzzer, Some(Connector::A0));
        // A1 has distinct pins even though pin2 overlaps A0
        assert!(parse_config("[bindings]\nleds = \"A1\"\n").is_ok());
    }

    #[test]
    fn test_zero_count_and_interval() {
        assert_eq!(
            parse_config("[chained_led]\ncount = 0\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[proximity]\ninterval_ms = 0\n"),
            Err(ParseError::InvalidValue)
        );
        let config = parse_config("[chained_led]\ncount = 1\n[proximity]\ninterval_ms = 1\n").unwrap();
        assert_eq!((config.chained_led.count, config.proximity.interval_ms), (1, 1));
    }

    #[test]
    fn test_version() {
        assert_eq!(parse_config("version = 1\n").map(|c| c.version), Ok(CONFIG_VERSION));
        assert_eq!(parse_config("version = 2\n"), Err(ParseError::UnsupportedVersion));
        assert_eq!(parse_config("version = 0\n"), Err(ParseError::UnsupportedVersion));
        assert_eq!(parse_config("version = \"1\"\n"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_invalid_line() {
        assert_eq!(parse_config("[ultrasonic]\ntimeout_us\n"), Err(ParseError::InvalidLine));
    }
}
