//! Frame composition
//!
//! Reads the calculator and navigator and lays out a [`Screen`]. Nothing
//! here mutates state; the firmware replays the screen onto the panel.
//!
//! Calculator layout:
//!
//! ```text
//! row 0  history: expression + input + "=", "..." + tail when too long
//! row 2  primary value, centred; inverted when it is a result
//! row 5  keymap indicator "B" or "S", inverted, bottom right
//! ```

use core::fmt::Write;

use heapless::String;
use pocketcalc_display::{Align, Screen, SCREEN_COLS};

use crate::math::NUM_TEXT_LEN;
use crate::state::{CalculatorState, MenuItem, Navigator, UiMode, ABOUT_PAGES, EXPRESSION_LEN};

/// History line width before it is shortened
pub const HISTORY_WIDTH: usize = 20;

/// Characters kept after the ellipsis
pub const HISTORY_TAIL: usize = 17;

/// Primary value width; longer values keep their last digits
pub const VALUE_WIDTH: usize = 16;

const ELLIPSIS: &str = "...";

const HISTORY_ROW: u8 = 0;
const VALUE_ROW: u8 = 2;
const FOOTER_ROW: u8 = 5;

/// Fires on every Nth scan tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderCadence {
    divisor: u8,
    count: u8,
}

impl RenderCadence {
    pub const fn new(divisor: u8) -> Self {
        Self { divisor, count: 0 }
    }

    /// Count one scan tick; true when a frame is due
    pub fn tick(&mut self) -> bool {
        self.count = self.count.saturating_add(1);
        if self.count >= self.divisor {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// Lay out the screen for the current mode
pub fn compose(calc: &CalculatorState, navigator: &Navigator, screen: &mut Screen) {
    screen.clear();
    match navigator.mode() {
        UiMode::Calculator => compose_calculator(calc, screen),
        UiMode::Menu => compose_menu(navigator, screen),
        UiMode::About => compose_about(navigator, screen),
    }
}

fn compose_calculator(calc: &CalculatorState, screen: &mut Screen) {
    let history = history_line(calc);
    if !history.is_empty() {
        screen.put(HISTORY_ROW, Align::Left(0), &history);
    }

    let current = calc.current_input();
    let result = calc.result();
    let value = if result.is_empty() {
        current.as_str()
    } else {
        result.as_str()
    };
    let value = last_chars(value, VALUE_WIDTH);

    let standalone = calc.expression().is_empty() && !current.is_zero() && !current.is_error();
    if !result.is_empty() || standalone {
        screen.put_inverted(VALUE_ROW, Align::Center, value);
    } else {
        screen.put(VALUE_ROW, Align::Center, value);
    }

    let indicator = if calc.shift_mode() { "S" } else { "B" };
    screen.put_inverted(FOOTER_ROW, Align::Right, indicator);
}

/// Top line of the calculator screen
pub fn history_line(calc: &CalculatorState) -> String<SCREEN_COLS> {
    let mut full: String<{ EXPRESSION_LEN + NUM_TEXT_LEN + 1 }> = String::new();
    let _ = full.push_str(calc.expression());
    let current = calc.current_input();
    if !current.is_zero() && !current.is_error() {
        let _ = full.push_str(current.as_str());
    }
    if !calc.result().is_empty() {
        let _ = full.push('=');
    }

    let mut line = String::new();
    if full.chars().count() > HISTORY_WIDTH {
        let _ = line.push_str(ELLIPSIS);
        let _ = line.push_str(last_chars(&full, HISTORY_TAIL));
    } else {
        let _ = line.push_str(&full);
    }
    line
}

fn compose_menu(navigator: &Navigator, screen: &mut Screen) {
    screen.put(0, Align::Center, "MAIN MENU");
    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let marker = if i == navigator.menu_position() { "> " } else { "  " };
        let mut line: String<SCREEN_COLS> = String::new();
        let _ = line.push_str(marker);
        let _ = line.push_str(item.label());
        screen.put(1 + i as u8, Align::Left(1), &line);
    }
    screen.put(FOOTER_ROW, Align::Left(0), "ENTER=Select");
}

fn compose_about(navigator: &Navigator, screen: &mut Screen) {
    let index = navigator.about_page() % ABOUT_PAGES.len();
    for (row, line) in ABOUT_PAGES[index].iter().enumerate() {
        if !line.is_empty() {
            screen.put(row as u8, Align::Center, line);
        }
    }
    let mut footer: String<SCREEN_COLS> = String::new();
    let _ = write!(footer, "Page {}/{}", index + 1, ABOUT_PAGES.len());
    screen.put(FOOTER_ROW, Align::Left(0), &footer);
    screen.put(FOOTER_ROW, Align::Right, "ENTER=Exit");
}

/// The last `n` characters of `text`
fn last_chars(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if count <= n {
        return text;
    }
    let start = text
        .char_indices()
        .nth(count - n)
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}
