//! Calculator and UI state
//!
//! [`CalculatorState`] owns the expression line and the operand being typed;
//! [`Navigator`] owns the UI mode, the menu cursor and the about page.
//! Both are plain data mutated only from the tick pipeline.

pub mod calculator;
pub mod entry;
pub mod navigator;

pub use calculator::{CalculatorState, Expression, EXPRESSION_LEN, MAX_INPUT_LEN};
pub use entry::{Entry, Readout, ERROR_TEXT};
pub use navigator::{MenuItem, Navigator, UiMode, ABOUT_PAGES};
