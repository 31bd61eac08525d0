//! Embassy async tasks
//!
//! The tick task paces the calculator task through a signal.

pub mod calculator;
pub mod tick;

pub use calculator::{calculator_task, BoardOled};
pub use tick::tick_task;
