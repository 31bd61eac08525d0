//! Display abstraction and screen buffer for pocketcalc
//!
//! This crate provides:
//! - `DisplayBackend` trait: the three render primitives the calculator
//!   needs (draw text, draw inverted text, flush) plus clear
//! - `Screen`: a character-cell frame that the render coordinator fills
//!   and that knows how to replay itself onto any backend
//!
//! # Architecture
//!
//! The calculator core composes a `Screen` from its state on every render
//! tick. The firmware owns a concrete backend (an SSD1306 OLED) and asks the
//! screen to draw itself. Host tests use a recording backend instead.

#![no_std]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{Align, Cell, Screen, SCREEN_COLS, SCREEN_ROWS};
