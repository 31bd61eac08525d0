//! Input pipeline
//!
//! ```text
//! KeypadMatrix ──┐
//!                ├─► KeyScanner ─► Debouncer ─► InputRouter ─► Command
//! NavButtons ────┘
//! ```
//!
//! The scanner confirm-reads every cell and button, the debouncers keep a
//! set only once it has been seen on two consecutive ticks, and the router
//! turns stable sets into commands depending on the UI mode.

pub mod debounce;
pub mod keymap;
pub mod router;
pub mod scanner;

pub use debounce::Debouncer;
pub use keymap::{Key, Keymap, Operator, KEYPAD_COLS, KEYPAD_ROWS};
pub use router::{dispatch, Command, Commands, InputRouter, RateLimiter};
pub use scanner::{KeyScanner, MatrixKeyEvent, MatrixKeys, NavScan, NavSet};
