//! picogrove - Grove proximity lamp
//!
//! Firmware for an RP2040 carrier with Grove connectors. Devices are found
//! by connector name from `board.toml`: an ultrasonic ranger drives the
//! color of a chained RGB LED string, an LED button pauses the lamp (with
//! a chirp from the buzzer), and optional motion and light sensors gate
//! and log it.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Config as AdcConfig};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use picogrove_core::config::{parse_config, BoardConfig};
use picogrove_core::Connector;
use picogrove_drivers::{Board, BoardError};
use picogrove_hal_rp2040::{bank_pins, EmbassyClock, PinBank, SharedAdc};

mod tasks;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// The registry as wired on this chip
pub type RpBoard = Board<PinBank, EmbassyClock, Delay>;

static ADC: StaticCell<SharedAdc> = StaticCell::new();
static BOARD: StaticCell<RpBoard> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("picogrove firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let adc = ADC.init(Mutex::new(RefCell::new(Adc::new_blocking(
        p.ADC,
        AdcConfig::default(),
    ))));
    let pins = PinBank::new(bank_pins!(p), adc);
    let board = BOARD.init(Board::new(pins, EmbassyClock, Delay, config));

    claim_bound_devices(board);

    unwrap!(spawner.spawn(tasks::proximity_task(board)));
}

/// Parse the embedded board.toml, falling back to defaults
fn load_config() -> BoardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration: {}", config);
            config
        }
        Err(e) => {
            // build.rs validates board.toml, so this only trips on keys
            // the runtime parser is stricter about
            warn!("Failed to parse embedded config: {}", e);
            warn!("Using default configuration");
            BoardConfig::default()
        }
    }
}

/// Create every bound driver up front so wiring conflicts show at boot
fn claim_bound_devices(board: &mut RpBoard) {
    let bindings = board.config().bindings;

    if let Some(c) = bindings.ranger {
        report("ranger", c, board.ultrasonic(c).map(|_| ()));
    }
    if let Some(c) = bindings.leds {
        report("chained LEDs", c, board.chained_led(c).map(|_| ()));
    }
    if let Some(c) = bindings.button {
        report("LED button", c, board.led_button(c).map(|_| ()));
    }
    if let Some(c) = bindings.motion {
        report("motion sensor", c, board.motion_sensor(c).map(|_| ()));
    }
    if let Some(c) = bindings.light {
        report("light sensor", c, board.analog_sensor(c).map(|_| ()));
    }
    if let Some(c) = bindings.buzzer {
        report("buzzer", c, board.buzzer(c).map(|_| ()));
    }
}

fn report(device: &str, connector: Connector, result: Result<(), BoardError>) {
    match result {
        Ok(()) => info!("{} on {}", device, connector),
        Err(e) => warn!("{} on {} unavailable: {}", device, connector, e),
    }
}
