//! Calculator task
//!
//! Waits for each tick, runs the controller's scan pipeline against the
//! board hardware, logs what happened, and draws on render ticks.

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Timer};

use pocketcalc_core::input::Command;
use pocketcalc_core::{Config, Controller, TickReport};
use pocketcalc_display::Screen;
use pocketcalc_hal_rp2040::{RpKeypad, RpNavButtons};

use crate::display::Oled;
use crate::tasks::tick::TICK_SIGNAL;

/// The OLED as wired on this board
pub type BoardOled = Oled<I2c<'static, I2C0, Blocking>>;

/// Main loop: one scan per tick
#[embassy_executor::task]
pub async fn calculator_task(
    config: Config,
    mut keypad: RpKeypad,
    mut buttons: RpNavButtons,
    mut oled: BoardOled,
) {
    info!("Calculator task started");

    let mut controller: Controller = Controller::new(config, Default::default());
    let mut delay = Delay;
    let mut screen = Screen::new();

    draw(&controller, &mut screen, &mut oled);

    loop {
        let now_ms = TICK_SIGNAL.wait().await;

        match controller.process_tick(&mut keypad, &mut buttons, &mut delay, now_ms) {
            Ok(report) => {
                log_report(&report);
                if report.render_due {
                    draw(&controller, &mut screen, &mut oled);
                }
            }
            Err(e) => {
                warn!("Tick aborted: {:?}", e);
                Timer::after_millis(controller.config().fault_backoff_ms as u64).await;
            }
        }
    }
}

fn log_report(report: &TickReport) {
    for command in &report.commands {
        match command {
            Command::Key(key) => debug!("Key {}", key.label()),
            Command::Evaluate => debug!("Evaluate"),
            Command::Navigate(button) => debug!("Navigate {}", button.name()),
        }
    }
    for button in &report.nav_faults {
        warn!("Nav button {} read failed", button.name());
    }
}

fn draw(controller: &Controller, screen: &mut Screen, oled: &mut BoardOled) {
    controller.compose(screen);
    match screen.render(oled) {
        Ok(true) => {}
        Ok(false) => trace!("Frame dropped (display flush failed)"),
        Err(e) => trace!("Frame dropped: {:?}", e),
    }
}
