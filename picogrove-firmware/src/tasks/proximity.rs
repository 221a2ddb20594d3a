//! Proximity lamp task
//!
//! Each tick:
//! - Measure the distance on the bound ranger
//! - Map it onto a red (near) to blue (far) ramp and fill the LED chain
//! - Toggle pause on a button press, with the button LED showing "running"
//!   and a short chirp from the buzzer
//! - Blank the LEDs while the motion sensor sees nobody

use defmt::*;
use embassy_time::{Duration, Ticker, Timer};

use picogrove_core::traits::{RangeFinder, Transmittable};
use picogrove_core::Rgb;

use crate::RpBoard;

/// Ramp end points
const NEAR_COLOR: Rgb = Rgb::RED;
const FAR_COLOR: Rgb = Rgb::BLUE;

/// Length of the pause/resume chirp
const CHIRP_MS: u64 = 40;

/// Light sensor is logged every this many ticks
const LIGHT_LOG_TICKS: u32 = 20;

#[embassy_executor::task]
pub async fn proximity_task(board: &'static mut RpBoard) {
    info!("Proximity task started");

    let config = *board.config();
    let bindings = config.bindings;
    let mut ticker = Ticker::every(Duration::from_millis(config.proximity.interval_ms as u64));

    let mut running = true;
    let mut was_pressed = false;
    let mut tick: u32 = 0;

    if let Some(button) = bindings.button.and_then(|c| board.led_button(c).ok()) {
        button.set_led(running);
    }

    loop {
        ticker.next().await;
        tick = tick.wrapping_add(1);

        // Pause toggles on the press edge
        let mut toggled = false;
        if let Some(button) = bindings.button.and_then(|c| board.led_button(c).ok()) {
            let pressed = button.is_pressed();
            if pressed && !was_pressed {
                running = !running;
                toggled = true;
                button.set_led(running);
                info!("Lamp {}", if running { "running" } else { "paused" });
            }
            was_pressed = pressed;
        }

        if toggled {
            if let Some(buzzer) = bindings.buzzer.and_then(|c| board.buzzer(c).ok()) {
                buzzer.on();
                Timer::after_millis(CHIRP_MS).await;
                buzzer.off();
            }
        }

        if tick % LIGHT_LOG_TICKS == 0 {
            if let Some(light) = bindings.light.and_then(|c| board.analog_sensor(c).ok()) {
                match light.read_u16() {
                    Ok(level) => debug!("Light level {}", level),
                    Err(e) => warn!("Light sensor read failed: {}", e),
                }
            }
        }

        let present = bindings
            .motion
            .and_then(|c| board.motion_sensor(c).ok())
            .map_or(true, |sensor| sensor.is_motion_detected());

        let color = if !running || !present {
            Rgb::BLACK
        } else {
            match bindings.ranger.and_then(|c| board.ultrasonic(c).ok()) {
                Some(ranger) => match ranger.measure_millimeters() {
                    Ok(mm) => {
                        let t = config.proximity.ramp(mm);
                        trace!("{} mm -> ramp {}", mm, t);
                        NEAR_COLOR.lerp(FAR_COLOR, t)
                    }
                    Err(e) => {
                        debug!("No echo: {}", e);
                        FAR_COLOR
                    }
                },
                None => FAR_COLOR,
            }
        };

        if let Some(leds) = bindings.leds.and_then(|c| board.chained_led(c).ok()) {
            leds.fill(color);
            if !leds.auto_write() {
                leds.transmit();
            }
        }
    }
}
