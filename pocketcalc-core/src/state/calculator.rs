//! Calculator state machine
//!
//! The calculator is a set of fields rather than an explicit state enum:
//!
//! - fresh: empty expression, input `"0"`, no result
//! - entering: an operand is being typed into `current`
//! - chained: the expression ends in an operator or parenthesis
//! - resulted: `result` holds a value and the next input resets
//! - error: `current` holds the error sentinel
//!
//! After Equals or a function, a digit, decimal point or open parenthesis
//! starts a fresh expression; an operator extends the one on screen, so
//! `2+3=` then `*` reads `2+3*`. After a percent only the operand is
//! replaced and the expression is kept.

use heapless::String;

use super::entry::{Entry, Readout};
use crate::input::Operator;
use crate::math::{format_number, Evaluator, Function, NumText, NUM_TEXT_LEN};

/// Longest operand that can be typed
pub const MAX_INPUT_LEN: usize = 20;

/// Capacity of the expression line
pub const EXPRESSION_LEN: usize = 96;

/// Committed part of the formula
pub type Expression = String<EXPRESSION_LEN>;

/// Expression plus the pending operand, as handed to the evaluator
pub type FullText = String<{ EXPRESSION_LEN + NUM_TEXT_LEN }>;

/// What the next digit or decimal point throws away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reset {
    Off,
    /// Percent: the operand only
    Operand,
    /// Equals or a function: the whole expression
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorState {
    expression: Expression,
    current: Entry,
    result: Readout,
    shift: bool,
    reset: Reset,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            expression: Expression::new(),
            current: Entry::zero(),
            result: Readout::Empty,
            shift: false,
            reset: Reset::Off,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn current_input(&self) -> &Entry {
        &self.current
    }

    pub fn result(&self) -> &Readout {
        &self.result
    }

    /// Scientific keymap selected
    pub fn shift_mode(&self) -> bool {
        self.shift
    }

    pub fn set_shift_mode(&mut self, shift: bool) {
        self.shift = shift;
    }

    pub fn reset_on_next_input(&self) -> bool {
        self.reset != Reset::Off
    }

    /// Empty expression, input `"0"`, no result
    pub fn is_fresh(&self) -> bool {
        self.expression.is_empty()
            && self.current.is_zero()
            && self.result.is_empty()
            && self.reset == Reset::Off
    }

    pub fn press_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(digit as u32, 10) else {
            return;
        };
        if self.starts_new_operand() {
            self.begin_fresh();
            self.current = Entry::from_char(ch);
            self.reset = Reset::Off;
        } else {
            self.current.push_limited(ch, MAX_INPUT_LEN);
        }
        self.result = Readout::Empty;
    }

    pub fn press_decimal(&mut self) {
        if self.starts_new_operand() {
            self.begin_fresh();
            self.current = Entry::zero();
            self.current.push_limited('.', MAX_INPUT_LEN);
            self.reset = Reset::Off;
        } else if !self.current.contains('.') {
            self.current.push_limited('.', MAX_INPUT_LEN);
        }
        self.result = Readout::Empty;
    }

    pub fn backspace(&mut self) {
        if self.current.is_error() {
            self.clear();
            return;
        }
        self.current.backspace();
        self.result = Readout::Empty;
        self.reset = Reset::Off;
    }

    /// Back to fresh; the keymap selection is kept
    pub fn clear(&mut self) {
        self.expression.clear();
        self.current = Entry::zero();
        self.result = Readout::Empty;
        self.reset = Reset::Off;
    }

    pub fn press_operator(&mut self, op: Operator) {
        if self.current.is_error() {
            return;
        }
        self.result = Readout::Empty;
        self.reset = Reset::Off;

        if op == Operator::Sub && self.current.is_zero() {
            self.current = Entry::minus();
            return;
        }

        let symbol = op.symbol();
        if self.expression.ends_with(')') {
            if self.expression.push(symbol).is_ok() {
                self.current = Entry::zero();
            }
        } else if self.current.is_pending_operand() {
            self.commit_operand(symbol);
        } else if ends_with_operator(&self.expression) {
            self.expression.pop();
            let _ = self.expression.push(symbol);
        } else {
            let _ = self.expression.push(symbol);
        }
    }

    /// `^` key
    pub fn power(&mut self) {
        self.press_operator(Operator::Pow);
    }

    /// Evaluate expression plus pending operand into `result`
    ///
    /// The expression is left in place for the history line.
    pub fn equals<E: Evaluator + ?Sized>(&mut self, evaluator: &E) {
        if self.current.is_error() || (self.expression.is_empty() && self.current.is_zero()) {
            return;
        }
        let text = self.full_text();
        self.result = match evaluator.evaluate(&text) {
            Ok(value) => Readout::from_value(value),
            Err(_) => Readout::Error,
        };
        self.reset = Reset::Expression;
    }

    /// Text the next Equals would evaluate
    pub fn full_text(&self) -> FullText {
        let mut text = FullText::new();
        let _ = text.push_str(&self.expression);
        if !self.current.is_zero() || ends_with_operator_or_open(&self.expression) {
            let _ = text.push_str(self.current.as_str());
        }
        text
    }

    /// Divide the current input by 100
    ///
    /// Only the operand is affected; the expression is left alone.
    pub fn percent(&mut self) {
        let percent = self.current.value().and_then(|v| format_number(v / 100.0));
        match percent {
            Some(text) => {
                self.current = Entry::Number(text.clone());
                self.result = Readout::Value(text);
                self.reset = Reset::Operand;
            }
            None => {
                self.current = Entry::Error;
                self.reset = Reset::Off;
            }
        }
    }

    pub fn open_paren(&mut self) {
        if self.reset == Reset::Expression {
            self.expression.clear();
            self.current = Entry::zero();
        }
        self.result = Readout::Empty;
        self.reset = Reset::Off;

        if self.current.is_pending_operand() && !self.commit_operand('*') {
            return;
        }
        let _ = self.expression.push('(');
    }

    pub fn close_paren(&mut self) {
        self.result = Readout::Empty;
        self.reset = Reset::Off;

        if self.current.is_pending_operand() {
            self.commit_operand(')');
        } else if self.expression.ends_with('(') {
            self.current = Entry::Error;
        } else {
            let _ = self.expression.push(')');
        }
    }

    /// Switch between the basic and scientific keymaps
    pub fn toggle_shift(&mut self) {
        self.shift = !self.shift;
    }

    /// Apply a scientific function to the current input
    pub fn apply_function(&mut self, function: Function) {
        if let Some(text) = function.constant_text() {
            self.expression.clear();
            let _ = function.write_template("", &mut self.expression);
            self.succeed(NumText::try_from(text).ok());
            return;
        }

        let operand = match &self.current {
            Entry::Error => None,
            entry if entry.is_zero() || entry.is_minus() => Some((Entry::zero(), 0.0)),
            entry => entry.value().map(|value| (entry.clone(), value)),
        };
        let Some((operand, value)) = operand else {
            return self.fail();
        };

        self.expression.clear();
        let _ = function.write_template(operand.as_str(), &mut self.expression);
        self.succeed(function.apply(value).ok().and_then(format_number));
    }

    fn succeed(&mut self, text: Option<NumText>) {
        match text {
            Some(text) => {
                self.result = Readout::Value(text);
                self.current = Entry::zero();
                self.reset = Reset::Expression;
            }
            None => self.fail(),
        }
    }

    fn fail(&mut self) {
        self.result = Readout::Error;
        self.current = Entry::Error;
        self.reset = Reset::Off;
    }

    fn starts_new_operand(&self) -> bool {
        self.current.is_zero() || self.current.is_error() || self.reset != Reset::Off
    }

    fn begin_fresh(&mut self) {
        if self.reset == Reset::Expression {
            self.expression.clear();
        }
    }

    /// Move the pending operand plus `suffix` into the expression
    fn commit_operand(&mut self, suffix: char) -> bool {
        let operand = self.current.as_str();
        if self.expression.len() + operand.len() + suffix.len_utf8() > EXPRESSION_LEN {
            return false;
        }
        let _ = self.expression.push_str(operand);
        let _ = self.expression.push(suffix);
        self.current = Entry::zero();
        true
    }
}

fn ends_with_operator(text: &str) -> bool {
    matches!(text.chars().next_back(), Some(c) if Operator::from_symbol(c).is_some())
}

fn ends_with_operator_or_open(text: &str) -> bool {
    ends_with_operator(text) || text.ends_with('(')
}
