//! Build script for picogrove-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Connector names and the pins each binding claims on them
const CONNECTORS: &[(&str, u8, u8)] = &[
    ("UART0", 1, 0),
    ("UART1", 5, 4),
    ("D16", 16, 17),
    ("D18", 18, 19),
    ("D20", 20, 21),
    ("I2C0", 9, 8),
    ("I2C1", 7, 6),
    ("A0", 26, 26),
    ("A1", 27, 26),
    ("A2", 28, 27),
];

/// Bindings that use both connector pins
const TWO_PIN_BINDINGS: &[&str] = &["leds", "button"];

const BINDINGS: &[&str] = &["ranger", "leds", "button", "motion", "light", "buzzer"];

const MAX_CHAINED_LEDS: i64 = 32;

const CONFIG_VERSION: i64 = 1;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x in OUT_DIR");
    f.write_all(memory_x).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml from the picogrove-firmware      ║\n\
            ║  directory. Create one there (see the [bindings] section for     ║\n\
            ║  connector names).                                               ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_version(&config, &mut errors);
    validate_ultrasonic(&config, &mut errors);
    validate_chained_led(&config, &mut errors);
    validate_bindings(&config, &mut errors);
    validate_proximity(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<i64> {
    config.get(section)?.get(key)?.as_integer()
}

fn validate_version(config: &toml::Value, errors: &mut Vec<String>) {
    match config.get("version") {
        None => {}
        Some(toml::Value::Integer(v)) if *v == CONFIG_VERSION => {}
        Some(_) => errors.push(format!("version must be {}", CONFIG_VERSION)),
    }
}

fn validate_ultrasonic(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(timeout) = integer(config, "ultrasonic", "timeout_us") {
        if timeout <= 0 || timeout > u32::MAX as i64 {
            errors.push("[ultrasonic] timeout_us must be 1-4294967295".to_string());
        }
    }
}

fn validate_chained_led(config: &toml::Value, errors: &mut Vec<String>) {
    if let Some(count) = integer(config, "chained_led", "count") {
        if !(1..=MAX_CHAINED_LEDS).contains(&count) {
            errors.push(format!("[chained_led] count must be 1-{}", MAX_CHAINED_LEDS));
        }
    }
    if let Some(value) = config.get("chained_led").and_then(|s| s.get("auto_write")) {
        if !value.is_bool() {
            errors.push("[chained_led] auto_write must be true or false".to_string());
        }
    }
}

/// Connector names must exist and no two bindings may share a pin
fn validate_bindings(config: &toml::Value, errors: &mut Vec<String>) {
    let bindings = match config.get("bindings") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            errors.push("[bindings] must be a table".to_string());
            return;
        }
        None => return,
    };

    let mut claimed: Vec<(u8, String)> = Vec::new();

    for (name, value) in bindings {
        if !BINDINGS.contains(&name.as_str()) {
            errors.push(format!("[bindings] unknown device '{}'", name));
            continue;
        }
        let connector = match value.as_str() {
            Some(c) => c,
            None => {
                errors.push(format!("[bindings] {} must be a connector name", name));
                continue;
            }
        };
        let Some(&(_, pin1, pin2)) = CONNECTORS.iter().find(|(n, _, _)| *n == connector) else {
            errors.push(format!("[bindings] {} uses unknown connector '{}'", name, connector));
            continue;
        };

        let mut pins = vec![pin1];
        if TWO_PIN_BINDINGS.contains(&name.as_str()) {
            if pin2 == pin1 {
                errors.push(format!(
                    "[bindings] {} needs two pins, {} has only GPIO{}",
                    name, connector, pin1
                ));
                continue;
            }
            pins.push(pin2);
        }
        for pin in pins {
            if let Some((_, other)) = claimed.iter().find(|(p, _)| *p == pin) {
                errors.push(format!("[bindings] {} and {} both use GPIO{}", other, name, pin));
            } else {
                claimed.push((pin, name.clone()));
            }
        }
    }
}

fn validate_proximity(config: &toml::Value, errors: &mut Vec<String>) {
    let near = integer(config, "proximity", "near_mm").unwrap_or(100);
    let far = integer(config, "proximity", "far_mm").unwrap_or(1000);
    if near < 0 || far > u16::MAX as i64 {
        errors.push("[proximity] distances must be 0-65535 mm".to_string());
    }
    if far <= near {
        errors.push("[proximity] far_mm must be greater than near_mm".to_string());
    }
    if let Some(interval) = integer(config, "proximity", "interval_ms") {
        if interval <= 0 || interval > u32::MAX as i64 {
            errors.push("[proximity] interval_ms must be 1-4294967295".to_string());
        }
    }
}
