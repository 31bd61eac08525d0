//! Keypad layouts
//!
//! The 4×6 matrix has two legends. The shift key swaps the top three rows
//! between the basic layout and the scientific one; the bottom row is the
//! same in both.

use crate::math::Function;

/// Matrix rows
pub const KEYPAD_ROWS: usize = 4;

/// Matrix columns
pub const KEYPAD_COLS: usize = 6;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    /// Character written into the expression
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    /// Operator for an expression character
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }
}

/// Action bound to a matrix position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Digit(u8),
    Decimal,
    Clear,
    Backspace,
    Operator(Operator),
    Equals,
    Percent,
    Power,
    OpenParen,
    CloseParen,
    Shift,
    Menu,
    Function(Function),
}

impl Key {
    /// Key legend
    pub const fn label(self) -> &'static str {
        match self {
            Key::Digit(d) => match d {
                0 => "0",
                1 => "1",
                2 => "2",
                3 => "3",
                4 => "4",
                5 => "5",
                6 => "6",
                7 => "7",
                8 => "8",
                _ => "9",
            },
            Key::Decimal => ".",
            Key::Clear => "C",
            Key::Backspace => "BS",
            Key::Operator(op) => match op {
                Operator::Add => "+",
                Operator::Sub => "-",
                Operator::Mul => "*",
                Operator::Div => "/",
                Operator::Pow => "^",
            },
            Key::Equals => "=",
            Key::Percent => "%",
            Key::Power => "^",
            Key::OpenParen => "(",
            Key::CloseParen => ")",
            Key::Shift => "SHIFT",
            Key::Menu => "MENU",
            Key::Function(f) => f.label(),
        }
    }
}

use Function as F;
use Key as K;
use Operator as Op;

/// A full keypad legend
pub type Keymap = [[Key; KEYPAD_COLS]; KEYPAD_ROWS];

/// Basic layout
pub const BASIC: Keymap = [
    [K::Digit(7), K::Digit(8), K::Digit(9), K::Operator(Op::Div), K::Clear, K::Backspace],
    [K::Digit(4), K::Digit(5), K::Digit(6), K::Operator(Op::Mul), K::OpenParen, K::CloseParen],
    [K::Digit(1), K::Digit(2), K::Digit(3), K::Operator(Op::Sub), K::Equals, K::Shift],
    [K::Digit(0), K::Decimal, K::Percent, K::Operator(Op::Add), K::Power, K::Menu],
];

/// Scientific layout
pub const SCIENTIFIC: Keymap = [
    [
        K::Function(F::Sin),
        K::Function(F::Cos),
        K::Function(F::Tan),
        K::Function(F::Log),
        K::Function(F::Ln),
        K::Backspace,
    ],
    [
        K::Function(F::Pi),
        K::Function(F::E),
        K::Function(F::Sqrt),
        K::Function(F::Factorial),
        K::OpenParen,
        K::CloseParen,
    ],
    [
        K::Function(F::Reciprocal),
        K::Function(F::Square),
        K::Function(F::Cube),
        K::Function(F::Negate),
        K::Equals,
        K::Shift,
    ],
    [K::Digit(0), K::Decimal, K::Percent, K::Operator(Op::Add), K::Power, K::Menu],
];

/// Layout selected by the shift flag
pub const fn keymap(shift: bool) -> &'static Keymap {
    if shift {
        &SCIENTIFIC
    } else {
        &BASIC
    }
}

/// Key at a matrix position, or `None` outside the 4×6 grid
pub fn lookup(shift: bool, row: usize, col: usize) -> Option<Key> {
    keymap(shift).get(row)?.get(col).copied()
}
