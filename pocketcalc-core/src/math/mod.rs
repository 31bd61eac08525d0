//! Numeric side of the calculator
//!
//! - [`eval`]: infix expression evaluator behind the [`Evaluator`] trait
//! - [`format`]: turning results into display text
//! - [`functions`]: the scientific keys, evaluated directly

pub mod eval;
pub mod format;
pub mod functions;

pub use eval::{EvalError, Evaluator, InfixEvaluator};
pub use format::{format_number, NumText, NUM_TEXT_LEN};
pub use functions::{DomainError, Function};
