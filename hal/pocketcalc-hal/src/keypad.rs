//! Keypad matrix and navigation button abstractions
//!
//! The calculator keypad is a 4×6 matrix without diodes. Rows are driven
//! low one at a time and columns are read through pull-ups, so a pressed key
//! shows up as a low column while its row is active. Navigation buttons are
//! plain active-low inputs.
//!
//! Both traits carry an associated `Error` so boards behind an I/O expander
//! can report bus faults. Direct GPIO implementations use
//! [`core::convert::Infallible`].

use core::convert::Infallible;

use crate::gpio::{InputPin, OutputPin};

/// Row-strobed key matrix
pub trait KeypadMatrix {
    /// Error type for a single cell read
    type Error;

    /// Number of driven rows
    fn rows(&self) -> usize;

    /// Number of sensed columns
    fn cols(&self) -> usize;

    /// Drive a row so its keys become visible on the columns
    fn activate_row(&mut self, row: usize);

    /// Release a row back to idle
    fn deactivate_row(&mut self, row: usize);

    /// Sample one column of the currently active row
    ///
    /// Returns `Ok(true)` when the key at (active row, `col`) reads pressed.
    /// A single sample may bounce; callers apply their own confirm-read.
    fn is_pressed(&mut self, col: usize) -> Result<bool, Self::Error>;
}

/// The five navigation buttons beside the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavButton {
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl NavButton {
    /// All buttons in scan order
    pub const ALL: [NavButton; 5] = [
        NavButton::Up,
        NavButton::Down,
        NavButton::Left,
        NavButton::Right,
        NavButton::Enter,
    ];

    /// Position in [`NavButton::ALL`]
    pub const fn index(self) -> usize {
        match self {
            NavButton::Up => 0,
            NavButton::Down => 1,
            NavButton::Left => 2,
            NavButton::Right => 3,
            NavButton::Enter => 4,
        }
    }

    /// Lowercase name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            NavButton::Up => "up",
            NavButton::Down => "down",
            NavButton::Left => "left",
            NavButton::Right => "right",
            NavButton::Enter => "enter",
        }
    }
}

/// Discrete navigation buttons
pub trait NavButtons {
    /// Error type for a single button read
    type Error;

    /// Sample one button
    ///
    /// A single sample may bounce; callers apply their own confirm-read.
    fn is_pressed(&mut self, button: NavButton) -> Result<bool, Self::Error>;
}

/// Key matrix built from plain GPIO pins
///
/// Rows are outputs held high when idle and pulled low to activate. Columns
/// are inputs with pull-ups; a low column means the key is down.
pub struct PinMatrix<R, C, const ROWS: usize, const COLS: usize> {
    rows: [R; ROWS],
    cols: [C; COLS],
}

impl<R, C, const ROWS: usize, const COLS: usize> PinMatrix<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    /// Take ownership of the pins and park every row in the idle state
    pub fn new(mut rows: [R; ROWS], cols: [C; COLS]) -> Self {
        for row in rows.iter_mut() {
            row.set_high();
        }
        Self { rows, cols }
    }

    /// Give the pins back
    pub fn release(self) -> ([R; ROWS], [C; COLS]) {
        (self.rows, self.cols)
    }
}

impl<R, C, const ROWS: usize, const COLS: usize> KeypadMatrix for PinMatrix<R, C, ROWS, COLS>
where
    R: OutputPin,
    C: InputPin,
{
    type Error = Infallible;

    fn rows(&self) -> usize {
        ROWS
    }

    fn cols(&self) -> usize {
        COLS
    }

    fn activate_row(&mut self, row: usize) {
        if let Some(pin) = self.rows.get_mut(row) {
            pin.set_low();
        }
    }

    fn deactivate_row(&mut self, row: usize) {
        if let Some(pin) = self.rows.get_mut(row) {
            pin.set_high();
        }
    }

    fn is_pressed(&mut self, col: usize) -> Result<bool, Infallible> {
        Ok(self.cols.get(col).map(|pin| pin.is_low()).unwrap_or(false))
    }
}

/// Navigation buttons built from five active-low GPIO inputs
///
/// Pins are given in [`NavButton::ALL`] order: up, down, left, right, enter.
pub struct PinButtons<P> {
    pins: [P; 5],
}

impl<P: InputPin> PinButtons<P> {
    pub fn new(pins: [P; 5]) -> Self {
        Self { pins }
    }
}

impl<P: InputPin> NavButtons for PinButtons<P> {
    type Error = Infallible;

    fn is_pressed(&mut self, button: NavButton) -> Result<bool, Infallible> {
        Ok(self.pins[button.index()].is_low())
    }
}
