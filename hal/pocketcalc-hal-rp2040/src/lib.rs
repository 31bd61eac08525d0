//! RP2040-specific HAL for the calculator firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `pocketcalc-hal` traits:
//!
//! - GPIO wrappers over embassy-rp `Output`/`Input`
//! - Keypad matrix and navigation button types built from those wrappers

#![no_std]

pub mod gpio;
pub mod keypad;

pub use gpio::{RpInput, RpOutput};
pub use keypad::{KeypadPins, NavPins, RpKeypad, RpNavButtons};
