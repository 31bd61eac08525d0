//! Property tests for the input pipeline and calculator

use embedded_hal::delay::DelayNs;
use pocketcalc_core::input::keymap::Key;
use pocketcalc_core::input::{Debouncer, InputRouter, KeyScanner, Operator};
use pocketcalc_core::math::{format_number, Function, InfixEvaluator};
use pocketcalc_core::state::{CalculatorState, Navigator, UiMode};
use pocketcalc_hal::{KeypadMatrix, NavButton};
use proptest::prelude::*;

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Single-cell matrix whose reads follow a script
struct ScriptedCell {
    reads: std::vec::IntoIter<bool>,
}

impl KeypadMatrix for ScriptedCell {
    type Error = ();

    fn rows(&self) -> usize {
        1
    }

    fn cols(&self) -> usize {
        1
    }

    fn activate_row(&mut self, _row: usize) {}

    fn deactivate_row(&mut self, _row: usize) {}

    fn is_pressed(&mut self, _col: usize) -> Result<bool, ()> {
        Ok(self.reads.next().unwrap_or(false))
    }
}

/// Calculator inputs that never open the menu
#[derive(Debug, Clone, Copy)]
enum Input {
    Digit(u8),
    Decimal,
    Op(Operator),
    Equals,
    Percent,
    Open,
    Close,
    Backspace,
    Function(Function),
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        (0u8..10).prop_map(Input::Digit),
        Just(Input::Decimal),
        prop_oneof![
            Just(Operator::Add),
            Just(Operator::Sub),
            Just(Operator::Mul),
            Just(Operator::Div),
            Just(Operator::Pow),
        ]
        .prop_map(Input::Op),
        Just(Input::Equals),
        Just(Input::Percent),
        Just(Input::Open),
        Just(Input::Close),
        Just(Input::Backspace),
        prop_oneof![
            Just(Function::Sqrt),
            Just(Function::Factorial),
            Just(Function::Reciprocal),
            Just(Function::Ln),
            Just(Function::Pi),
        ]
        .prop_map(Input::Function),
    ]
}

fn apply(calc: &mut CalculatorState, input: Input) {
    match input {
        Input::Digit(d) => calc.press_digit(d),
        Input::Decimal => calc.press_decimal(),
        Input::Op(op) => calc.press_operator(op),
        Input::Equals => calc.equals(&InfixEvaluator),
        Input::Percent => calc.percent(),
        Input::Open => calc.open_paren(),
        Input::Close => calc.close_paren(),
        Input::Backspace => calc.backspace(),
        Input::Function(f) => calc.apply_function(f),
    }
}

proptest! {
    #[test]
    fn debounce_same_set_twice_is_stable(set in prop::collection::btree_set(0u8..24, 0..8)) {
        let raw: Vec<u8> = set.into_iter().collect();
        let mut debouncer: Debouncer<u8, 24> = Debouncer::new();
        debouncer.update(&raw);
        let mut reversed = raw.clone();
        reversed.reverse();
        let stable = debouncer.update(&reversed);
        prop_assert_eq!(stable.len(), raw.len());
        for item in &raw {
            prop_assert!(stable.contains(item));
        }
    }

    #[test]
    fn debounce_differing_sets_are_empty(
        a in prop::collection::btree_set(0u8..24, 0..8),
        b in prop::collection::btree_set(0u8..24, 0..8),
    ) {
        prop_assume!(a != b);
        let a: Vec<u8> = a.into_iter().collect();
        let b: Vec<u8> = b.into_iter().collect();
        let mut debouncer: Debouncer<u8, 24> = Debouncer::new();
        debouncer.update(&a);
        prop_assert!(debouncer.update(&b).is_empty());
    }

    #[test]
    fn confirm_read_needs_two_pressed_samples(script in prop::collection::vec(any::<bool>(), 2..6)) {
        let expected = script[0] && script[1];
        let mut cell = ScriptedCell { reads: script.into_iter() };
        let keys = KeyScanner::default()
            .scan_matrix(&mut cell, &mut NoDelay, false)
            .unwrap();
        prop_assert_eq!(keys.len(), usize::from(expected));
    }

    #[test]
    fn integers_format_exactly(value in -1_000_000_000_000i64..1_000_000_000_000i64) {
        let text = format_number(value as f64).unwrap();
        prop_assert_eq!(text.as_str(), value.to_string());
    }

    #[test]
    fn format_is_stable_through_parse(value in -1.0e12f64..1.0e12f64) {
        let first = format_number(value).unwrap();
        let reparsed: f64 = first.parse().unwrap();
        let second = format_number(reparsed).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn format_is_stable_for_small_values(mantissa in 1.0f64..10.0, exponent in -9i32..0) {
        let value = mantissa * 10f64.powi(exponent);
        let first = format_number(value).unwrap();
        let second = format_number(first.parse().unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn format_is_stable_for_huge_values(mantissa in 1.0f64..10.0, exponent in 19i32..300) {
        let value = mantissa * 10f64.powi(exponent);
        let first = format_number(value).unwrap();
        prop_assert!(first.contains("e+"));
        let second = format_number(first.parse().unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn digit_entry_reproduced(first in 1u8..10, rest in prop::collection::vec(0u8..10, 0..19)) {
        let mut calc = CalculatorState::new();
        let mut expected = first.to_string();
        calc.press_digit(first);
        for d in rest {
            calc.press_digit(d);
            expected.push(char::from(b'0' + d));
        }
        prop_assert_eq!(calc.current_input().as_str(), expected.as_str());
    }

    #[test]
    fn digit_entry_capped_at_twenty(digits in prop::collection::vec(1u8..10, 21..40)) {
        let mut calc = CalculatorState::new();
        for d in &digits {
            calc.press_digit(*d);
        }
        prop_assert_eq!(calc.current_input().as_str().len(), 20);
    }

    #[test]
    fn current_input_always_well_formed(inputs in prop::collection::vec(input_strategy(), 0..60)) {
        let mut calc = CalculatorState::new();
        for input in inputs {
            apply(&mut calc, input);
            let entry = calc.current_input();
            if entry.is_error() {
                continue;
            }
            let text = entry.as_str();
            prop_assert!(!text.is_empty());
            // Percent results may carry an exponent; the mantissa is a plain numeral
            let mantissa = text.split('e').next().unwrap_or(text);
            prop_assert!(mantissa.matches('.').count() <= 1);
            prop_assert!(!mantissa.get(1..).unwrap_or("").contains('-'));
        }
    }

    #[test]
    fn shift_twice_is_identity(inputs in prop::collection::vec(input_strategy(), 0..30)) {
        let mut calc = CalculatorState::new();
        for input in inputs {
            apply(&mut calc, input);
        }
        let before = calc.clone();
        calc.toggle_shift();
        calc.toggle_shift();
        prop_assert_eq!(calc, before);
    }

    #[test]
    fn error_exits_to_fresh(inputs in prop::collection::vec(input_strategy(), 0..30), use_clear in any::<bool>()) {
        let mut calc = CalculatorState::new();
        for input in inputs {
            apply(&mut calc, input);
        }
        // Force the error sentinel with an empty group
        calc.open_paren();
        calc.close_paren();
        prop_assert!(calc.current_input().is_error());

        if use_clear {
            calc.clear();
        } else {
            calc.backspace();
        }
        prop_assert!(calc.is_fresh());
    }

    #[test]
    fn navigation_rate_limit(gap in 0u32..700) {
        let mut router = InputRouter::new(300);
        let mut navigator = Navigator::new();
        let mut calc = CalculatorState::new();
        navigator.open_menu();

        let mut moves = 0;
        for now in [1_000, 1_000 + gap] {
            for command in router.route(UiMode::Menu, &[], &[NavButton::Down], now) {
                if let pocketcalc_core::input::Command::Navigate(button) = command {
                    navigator.navigate(button, &mut calc);
                    moves += 1;
                }
            }
            // Release between presses
            router.route(UiMode::Menu, &[], &[], now + 1);
        }

        let expected = if gap > 300 { 2 } else { 1 };
        prop_assert_eq!(moves, expected);
        prop_assert_eq!(navigator.menu_position(), expected);
    }

    #[test]
    fn keymap_grid_fully_populated(row in 0usize..4, col in 0usize..6) {
        let basic = pocketcalc_core::input::keymap::lookup(false, row, col);
        let scientific = pocketcalc_core::input::keymap::lookup(true, row, col);
        prop_assert!(basic.is_some() && scientific.is_some());
        if row == 3 {
            prop_assert_eq!(basic, scientific);
        }
        if basic == Some(Key::Menu) {
            prop_assert_eq!((row, col), (3, 5));
        }
    }
}
