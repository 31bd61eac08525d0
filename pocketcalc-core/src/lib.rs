//! Board-agnostic core logic for the pocketcalc handheld calculator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Key scanning with confirm-reads and the two keymaps
//! - Set debouncing and edge detection for matrix keys
//! - Input routing and the navigation rate limiter
//! - Calculator state machine (expression, current input, result)
//! - Menu and about-page navigation
//! - Expression evaluation and result formatting
//! - Frame composition for the text display
//!
//! Everything is driven from [`controller::Controller::process_tick`], which
//! borrows the hardware for the duration of one scan.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod math;
pub mod render;
pub mod state;

pub use config::{Config, ScanTiming};
pub use controller::{Controller, TickError, TickReport};
