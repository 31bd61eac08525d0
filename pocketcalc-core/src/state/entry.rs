//! Operand and result values
//!
//! The error sentinel is a variant, never a magic string; it only becomes
//! the text `Error` when displayed.

use crate::math::{format_number, NumText};

/// Display text of the error sentinel
pub const ERROR_TEXT: &str = "Error";

/// The operand being typed
///
/// A number is `"0"`, a lone `"-"`, or a numeral with an optional leading
/// minus and at most one decimal point. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Number(NumText),
    Error,
}

impl Default for Entry {
    fn default() -> Self {
        Self::zero()
    }
}

impl Entry {
    pub fn zero() -> Self {
        Self::from_char('0')
    }

    pub fn minus() -> Self {
        Self::from_char('-')
    }

    pub fn from_char(ch: char) -> Self {
        let mut text = NumText::new();
        let _ = text.push(ch);
        Entry::Number(text)
    }

    pub fn is_zero(&self) -> bool {
        self.as_str() == "0"
    }

    pub fn is_minus(&self) -> bool {
        self.as_str() == "-"
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Entry::Error)
    }

    /// Anything other than `"0"`, a lone `"-"` or the error sentinel
    pub fn is_pending_operand(&self) -> bool {
        !self.is_error() && !self.is_zero() && !self.is_minus()
    }

    /// Numeric value, if the text parses
    pub fn value(&self) -> Option<f64> {
        match self {
            Entry::Number(text) => text.parse().ok(),
            Entry::Error => None,
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.as_str().contains(ch)
    }

    /// Append a character while staying under `limit` characters
    pub fn push_limited(&mut self, ch: char, limit: usize) -> bool {
        match self {
            Entry::Number(text) if text.len() < limit => text.push(ch).is_ok(),
            _ => false,
        }
    }

    /// Drop the last character, falling back to `"0"`
    pub fn backspace(&mut self) {
        match self {
            Entry::Number(text) if text.len() > 1 => {
                text.pop();
            }
            _ => *self = Self::zero(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Entry::Number(text) => text.as_str(),
            Entry::Error => ERROR_TEXT,
        }
    }
}

/// The last computed value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Readout {
    #[default]
    Empty,
    Value(NumText),
    Error,
}

impl Readout {
    /// Format a computed value; non-finite values become the error sentinel
    pub fn from_value(value: f64) -> Self {
        format_number(value).map_or(Readout::Error, Readout::Value)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Readout::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Readout::Error)
    }

    /// Text of a numeric result
    pub fn value_text(&self) -> Option<&NumText> {
        match self {
            Readout::Value(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Readout::Empty => "",
            Readout::Value(text) => text.as_str(),
            Readout::Error => ERROR_TEXT,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Entry {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Readout {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=str}", self.as_str());
    }
}
