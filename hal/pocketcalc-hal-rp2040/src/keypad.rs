//! Keypad and navigation button bindings

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{
    PIN_10, PIN_11, PIN_12, PIN_13, PIN_14, PIN_15, PIN_16, PIN_17, PIN_18, PIN_19, PIN_20,
    PIN_6, PIN_7, PIN_8, PIN_9,
};
use embassy_rp::Peri;
use pocketcalc_hal::{PinButtons, PinMatrix};

use crate::gpio::{RpInput, RpOutput};

/// 4×6 matrix on direct GPIO
pub type RpKeypad = PinMatrix<RpOutput, RpInput, 4, 6>;

/// Up, down, left, right, enter on direct GPIO
pub type RpNavButtons = PinButtons<RpInput>;

/// Pins for the keypad matrix
pub struct KeypadPins {
    pub row0: Peri<'static, PIN_6>,
    pub row1: Peri<'static, PIN_7>,
    pub row2: Peri<'static, PIN_8>,
    pub row3: Peri<'static, PIN_9>,
    pub col0: Peri<'static, PIN_10>,
    pub col1: Peri<'static, PIN_11>,
    pub col2: Peri<'static, PIN_12>,
    pub col3: Peri<'static, PIN_13>,
    pub col4: Peri<'static, PIN_14>,
    pub col5: Peri<'static, PIN_15>,
}

impl KeypadPins {
    /// Rows start released (high); columns get pull-ups
    pub fn into_keypad(self) -> RpKeypad {
        let rows = [
            RpOutput::from(Output::new(self.row0, Level::High)),
            RpOutput::from(Output::new(self.row1, Level::High)),
            RpOutput::from(Output::new(self.row2, Level::High)),
            RpOutput::from(Output::new(self.row3, Level::High)),
        ];
        let cols = [
            RpInput::from(Input::new(self.col0, Pull::Up)),
            RpInput::from(Input::new(self.col1, Pull::Up)),
            RpInput::from(Input::new(self.col2, Pull::Up)),
            RpInput::from(Input::new(self.col3, Pull::Up)),
            RpInput::from(Input::new(self.col4, Pull::Up)),
            RpInput::from(Input::new(self.col5, Pull::Up)),
        ];
        PinMatrix::new(rows, cols)
    }
}

/// Pins for the navigation buttons
pub struct NavPins {
    pub up: Peri<'static, PIN_16>,
    pub down: Peri<'static, PIN_17>,
    pub left: Peri<'static, PIN_18>,
    pub right: Peri<'static, PIN_19>,
    pub enter: Peri<'static, PIN_20>,
}

impl NavPins {
    pub fn into_buttons(self) -> RpNavButtons {
        PinButtons::new([
            RpInput::from(Input::new(self.up, Pull::Up)),
            RpInput::from(Input::new(self.down, Pull::Up)),
            RpInput::from(Input::new(self.left, Pull::Up)),
            RpInput::from(Input::new(self.right, Pull::Up)),
            RpInput::from(Input::new(self.enter, Pull::Up)),
        ])
    }
}
