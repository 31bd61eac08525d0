//! Pocketcalc - Scientific Calculator Firmware
//!
//! RP2040 firmware for a handheld calculator: a 4×6 key matrix, five
//! navigation buttons and a 128×64 SSD1306 OLED on I2C0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use pocketcalc_core::Config;
use pocketcalc_hal_rp2040::{KeypadPins, NavPins};

use crate::display::Oled;

mod board;
mod display;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!(
        "Pocketcalc firmware v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = Config::DEFAULT;

    let keypad = KeypadPins {
        row0: p.PIN_6,
        row1: p.PIN_7,
        row2: p.PIN_8,
        row3: p.PIN_9,
        col0: p.PIN_10,
        col1: p.PIN_11,
        col2: p.PIN_12,
        col3: p.PIN_13,
        col4: p.PIN_14,
        col5: p.PIN_15,
    }
    .into_keypad();

    let buttons = NavPins {
        up: p.PIN_16,
        down: p.PIN_17,
        left: p.PIN_18,
        right: p.PIN_19,
        enter: p.PIN_20,
    }
    .into_buttons();

    info!("Keypad and navigation buttons initialized");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::OLED_I2C_FREQUENCY;
    let bus = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let oled = Oled::new(bus);
    if oled.is_ready() {
        info!("OLED initialized");
    } else {
        warn!("OLED not responding, will retry on each frame");
    }

    spawner.spawn(tasks::tick_task(config.tick_interval_ms)).unwrap();
    spawner
        .spawn(tasks::calculator_task(config, keypad, buttons, oled))
        .unwrap();

    info!("All tasks spawned, calculator running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
