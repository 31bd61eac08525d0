//! pocketcalc Hardware Abstraction Layer
//!
//! This crate defines the raw-read contract between the calculator core and
//! whatever board it runs on. The core never touches registers; it activates
//! keypad rows, samples columns and samples navigation buttons through these
//! traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pocketcalc-core (scanner, controller)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pocketcalc-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   firmware    │       │  host tests   │
//! │  (embassy-rp) │       │ (mock pins)   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`keypad::KeypadMatrix`] - Row-strobed key matrix
//! - [`keypad::NavButtons`] - Discrete navigation buttons

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod keypad;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use keypad::{KeypadMatrix, NavButton, NavButtons, PinButtons, PinMatrix};
