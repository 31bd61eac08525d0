//! Infix expression evaluator
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | '(' expr ')'
//! ```
//!
//! `^` binds tighter than unary minus and associates to the right, so
//! `-2^2` is `-4` and `2^3^2` is `512`. Whitespace is ignored.

/// Nesting limit for parentheses and unary signs
pub const MAX_DEPTH: u8 = 32;

/// Evaluation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EvalError {
    /// Nothing to evaluate
    Empty,
    /// Input ended where an operand was expected
    UnexpectedEnd,
    /// Character outside the grammar, with its byte offset
    UnexpectedChar(usize),
    /// Numeral that does not parse
    BadNumber,
    /// Missing `(` or `)`
    UnbalancedParen,
    /// Well-formed prefix followed by more input
    TrailingInput,
    /// Division by zero
    DivisionByZero,
    /// Nesting deeper than [`MAX_DEPTH`]
    TooDeep,
    /// Overflow or an undefined power
    NonFinite,
}

/// Something that turns expression text into a number
pub trait Evaluator {
    fn evaluate(&self, text: &str) -> Result<f64, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str) -> Result<f64, EvalError>,
{
    fn evaluate(&self, text: &str) -> Result<f64, EvalError> {
        self(text)
    }
}

/// Recursive-descent evaluator for `+ - * / ^ ( )` and decimal literals
#[derive(Debug, Clone, Copy, Default)]
pub struct InfixEvaluator;

impl Evaluator for InfixEvaluator {
    fn evaluate(&self, text: &str) -> Result<f64, EvalError> {
        let mut parser = Parser::new(text);
        if parser.peek().is_none() {
            return Err(EvalError::Empty);
        }
        let value = parser.expr()?;
        match parser.peek() {
            None => {}
            Some(b')') => return Err(EvalError::UnbalancedParen),
            Some(_) => return Err(EvalError::TrailingInput),
        }
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: u8,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    /// Next significant byte, skipping whitespace
    fn peek(&mut self) -> Option<u8> {
        while let Some(b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                return Some(*b);
            }
        }
        None
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn descend(&mut self) -> Result<(), EvalError> {
        if self.depth >= MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(b'+') => {
                    self.bump();
                    value += self.term()?;
                }
                Some(b'-') => {
                    self.bump();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(b'*') => {
                    self.bump();
                    value *= self.unary()?;
                }
                Some(b'/') => {
                    self.bump();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(sign @ (b'-' | b'+')) => {
                self.bump();
                self.descend()?;
                let operand = self.unary();
                self.ascend();
                let operand = operand?;
                Ok(if sign == b'-' { -operand } else { operand })
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.primary()?;
        if self.peek() == Some(b'^') {
            self.bump();
            let exponent = self.unary()?;
            return Ok(libm::pow(base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.peek() {
            Some(b'(') => {
                self.bump();
                self.descend()?;
                let inner = self.expr();
                self.ascend();
                let inner = inner?;
                if self.peek() != Some(b')') {
                    return Err(EvalError::UnbalancedParen);
                }
                self.bump();
                Ok(inner)
            }
            Some(b) if b.is_ascii_digit() || b == b'.' => self.number(),
            Some(b')') => Err(EvalError::UnbalancedParen),
            Some(_) => Err(EvalError::UnexpectedChar(self.pos)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;
        let mut seen_point = false;
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_digit() {
                self.pos += 1;
            } else if b == b'.' && !seen_point {
                seen_point = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        core::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|digits| digits.parse::<f64>().ok())
            .ok_or(EvalError::BadNumber)
    }
}
