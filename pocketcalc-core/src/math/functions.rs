//! Scientific functions
//!
//! These keys bypass the expression evaluator: the operand is converted and
//! the function applied directly, while a fixed template is written to the
//! expression line for history display.

use core::f64::consts::PI;
use core::fmt::Write;

/// Largest operand accepted by factorial
pub const FACTORIAL_MAX: u32 = 20;

/// Scientific key functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Factorial,
    Reciprocal,
    Square,
    Cube,
    Negate,
    Pi,
    E,
}

/// Operand outside the function's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DomainError;

impl Function {
    /// Key legend
    pub const fn label(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Factorial => "!",
            Function::Reciprocal => "1/x",
            Function::Square => "x²",
            Function::Cube => "x³",
            Function::Negate => "±",
            Function::Pi => "pi",
            Function::E => "e",
        }
    }

    /// Fixed display text for the constant keys
    ///
    /// Constants ignore the operand and never fail.
    pub const fn constant_text(self) -> Option<&'static str> {
        match self {
            Function::Pi => Some("3.14159265359"),
            Function::E => Some("2.71828182846"),
            _ => None,
        }
    }

    /// Write the history template with `operand` substituted
    pub fn write_template<W: Write>(self, operand: &str, out: &mut W) -> core::fmt::Result {
        match self {
            Function::Sin => write!(out, "sin({})", operand),
            Function::Cos => write!(out, "cos({})", operand),
            Function::Tan => write!(out, "tan({})", operand),
            Function::Log => write!(out, "log({})", operand),
            Function::Ln => write!(out, "ln({})", operand),
            Function::Sqrt => write!(out, "sqrt({})", operand),
            Function::Factorial => write!(out, "fact({})", operand),
            Function::Reciprocal => write!(out, "1/({})", operand),
            // FONT_6X10 is ASCII only, so no superscript digits
            Function::Square => write!(out, "({})^2", operand),
            Function::Cube => write!(out, "({})^3", operand),
            Function::Negate => write!(out, "-({})", operand),
            Function::Pi => out.write_str("pi"),
            Function::E => out.write_str("e"),
        }
    }

    /// Apply the function; trigonometry takes degrees
    pub fn apply(self, x: f64) -> Result<f64, DomainError> {
        let value = match self {
            Function::Sin => libm::sin(to_radians(x)),
            Function::Cos => libm::cos(to_radians(x)),
            Function::Tan => libm::tan(to_radians(x)),
            Function::Log if x > 0.0 => libm::log10(x),
            Function::Ln if x > 0.0 => libm::log(x),
            Function::Sqrt if x >= 0.0 => libm::sqrt(x),
            Function::Factorial => factorial(x)?,
            Function::Reciprocal if x != 0.0 => 1.0 / x,
            Function::Square => x * x,
            Function::Cube => x * x * x,
            Function::Negate => -x,
            Function::Pi => PI,
            Function::E => core::f64::consts::E,
            Function::Log | Function::Ln | Function::Sqrt | Function::Reciprocal => {
                return Err(DomainError)
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(DomainError)
        }
    }
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

fn factorial(x: f64) -> Result<f64, DomainError> {
    if x < 0.0 || x > FACTORIAL_MAX as f64 || x != libm::trunc(x) {
        return Err(DomainError);
    }
    Ok((1..=x as u32).fold(1.0, |acc, n| acc * n as f64))
}
