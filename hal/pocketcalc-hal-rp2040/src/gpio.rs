//! GPIO wrappers
//!
//! embassy-rp pins are type-erased, so one wrapper covers every row and one
//! covers every column or button.

use embassy_rp::gpio::{Input, Output};
use pocketcalc_hal::{InputPin, OutputPin};

/// Push-pull output
pub struct RpOutput(Output<'static>);

impl From<Output<'static>> for RpOutput {
    fn from(pin: Output<'static>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}

/// Input with whatever pull was configured at construction
pub struct RpInput(Input<'static>);

impl From<Input<'static>> for RpInput {
    fn from(pin: Input<'static>) -> Self {
        Self(pin)
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }

    fn is_low(&self) -> bool {
        self.0.is_low()
    }
}
