//! Input routing
//!
//! Turns stable key sets into commands for the current UI mode:
//!
//! - Calculator: matrix keys are edge-triggered (a key fires on the first
//!   tick it is stable), while the navigation `enter` button is
//!   level-triggered and evaluates on every tick it is held.
//! - Menu and About: only navigation buttons count, and at most one action
//!   is accepted per rate-limit interval.

use heapless::Vec;
use pocketcalc_hal::NavButton;

use super::keymap::Key;
use super::scanner::{MatrixKeyEvent, MAX_MATRIX_KEYS};
use crate::math::Evaluator;
use crate::state::{CalculatorState, Navigator, UiMode};

/// Matrix keys plus the level-triggered evaluate
pub const MAX_COMMANDS: usize = MAX_MATRIX_KEYS + 1;

/// One thing to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Newly pressed matrix key
    Key(Key),
    /// Navigation `enter` held in calculator mode
    Evaluate,
    /// Accepted menu/about navigation
    Navigate(NavButton),
}

/// Commands in dispatch order
pub type Commands = Vec<Command, MAX_COMMANDS>;

/// Accepts at most one action per interval
///
/// An action is accepted when strictly more than `interval_ms` has passed
/// since the last accepted one, or when none has been accepted yet. Time is
/// a wrapping millisecond counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RateLimiter {
    interval_ms: u32,
    last_accepted: Option<u32>,
}

impl RateLimiter {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Accept an action at `now_ms` if the interval has passed
    pub fn try_acquire(&mut self, now_ms: u32) -> bool {
        match self.last_accepted {
            Some(last) if now_ms.wrapping_sub(last) <= self.interval_ms => false,
            _ => {
                self.last_accepted = Some(now_ms);
                true
            }
        }
    }
}

/// Edge detection and mode-based routing
#[derive(Debug, Clone)]
pub struct InputRouter {
    previous: Vec<Key, MAX_MATRIX_KEYS>,
    limiter: RateLimiter,
}

impl InputRouter {
    pub const fn new(nav_interval_ms: u32) -> Self {
        Self {
            previous: Vec::new(),
            limiter: RateLimiter::new(nav_interval_ms),
        }
    }

    /// Route one tick's stable sets
    ///
    /// The previous-tick key set is refreshed in every mode, so a key held
    /// while leaving the menu does not fire on return.
    pub fn route(
        &mut self,
        mode: UiMode,
        keys: &[MatrixKeyEvent],
        nav: &[NavButton],
        now_ms: u32,
    ) -> Commands {
        let mut current: Vec<Key, MAX_MATRIX_KEYS> = Vec::new();
        for event in keys {
            if !current.contains(&event.key) {
                let _ = current.push(event.key);
            }
        }

        let mut commands = Commands::new();
        match mode {
            UiMode::Calculator => {
                for key in current.iter().filter(|key| !self.previous.contains(*key)) {
                    let _ = commands.push(Command::Key(*key));
                }
                if nav.contains(&NavButton::Enter) {
                    let _ = commands.push(Command::Evaluate);
                }
            }
            UiMode::Menu | UiMode::About => {
                for button in NavButton::ALL {
                    if nav.contains(&button)
                        && has_nav_action(button)
                        && self.limiter.try_acquire(now_ms)
                    {
                        let _ = commands.push(Command::Navigate(button));
                    }
                }
            }
        }

        self.previous = current;
        commands
    }
}

/// Left and right are wired but have no action
fn has_nav_action(button: NavButton) -> bool {
    matches!(button, NavButton::Up | NavButton::Down | NavButton::Enter)
}

/// Apply one command to the calculator and navigator
pub fn dispatch<E: Evaluator + ?Sized>(
    command: Command,
    calc: &mut CalculatorState,
    navigator: &mut Navigator,
    evaluator: &E,
) {
    match command {
        Command::Key(key) => press_key(key, calc, navigator, evaluator),
        Command::Evaluate => calc.equals(evaluator),
        Command::Navigate(button) => {
            navigator.navigate(button, calc);
        }
    }
}

fn press_key<E: Evaluator + ?Sized>(
    key: Key,
    calc: &mut CalculatorState,
    navigator: &mut Navigator,
    evaluator: &E,
) {
    match key {
        Key::Digit(digit) => calc.press_digit(digit),
        Key::Decimal => calc.press_decimal(),
        Key::Clear => calc.clear(),
        Key::Backspace => calc.backspace(),
        Key::Operator(op) => calc.press_operator(op),
        Key::Equals => calc.equals(evaluator),
        Key::Percent => calc.percent(),
        Key::Power => calc.power(),
        Key::OpenParen => calc.open_paren(),
        Key::CloseParen => calc.close_paren(),
        Key::Shift => calc.toggle_shift(),
        Key::Menu => navigator.open_menu(),
        Key::Function(function) => calc.apply_function(function),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keymap::lookup;
    use crate::math::InfixEvaluator;

    fn event(row: u8, col: u8) -> MatrixKeyEvent {
        MatrixKeyEvent {
            row,
            col,
            key: lookup(false, row as usize, col as usize).unwrap(),
        }
    }

    #[test]
    fn test_rate_limiter_strictly_greater() {
        let mut limiter = RateLimiter::new(300);
        assert!(limiter.try_acquire(1000));
        assert!(!limiter.try_acquire(1200));
        assert!(!limiter.try_acquire(1300));
        assert!(limiter.try_acquire(1301));
    }

    #[test]
    fn test_rate_limiter_first_action_at_time_zero() {
        let mut limiter = RateLimiter::new(300);
        assert!(limiter.try_acquire(0));
        assert!(!limiter.try_acquire(10));
    }

    #[test]
    fn test_rate_limiter_wraps() {
        let mut limiter = RateLimiter::new(300);
        assert!(limiter.try_acquire(u32::MAX - 100));
        assert!(!limiter.try_acquire(100));
        assert!(limiter.try_acquire(250));
    }

    #[test]
    fn test_matrix_keys_edge_triggered() {
        let mut router = InputRouter::new(300);
        let held = [event(0, 0)];

        let first = router.route(UiMode::Calculator, &held, &[], 0);
        assert_eq!(first.as_slice(), &[Command::Key(Key::Digit(7))]);

        let second = router.route(UiMode::Calculator, &held, &[], 50);
        assert!(second.is_empty());

        router.route(UiMode::Calculator, &[], &[], 100);
        let again = router.route(UiMode::Calculator, &held, &[], 150);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn test_new_keys_in_scan_order() {
        let mut router = InputRouter::new(300);
        router.route(UiMode::Calculator, &[event(1, 1)], &[], 0);
        let commands = router.route(
            UiMode::Calculator,
            &[event(0, 2), event(1, 1), event(3, 3)],
            &[],
            50,
        );
        assert_eq!(
            commands.as_slice(),
            &[
                Command::Key(Key::Digit(9)),
                Command::Key(Key::Operator(crate::input::Operator::Add)),
            ]
        );
    }

    #[test]
    fn test_enter_level_triggered_in_calculator() {
        let mut router = InputRouter::new(300);
        for tick in 0..3 {
            let commands = router.route(UiMode::Calculator, &[], &[NavButton::Enter], tick * 50);
            assert_eq!(commands.as_slice(), &[Command::Evaluate]);
        }
    }

    #[test]
    fn test_matrix_ignored_in_menu() {
        let mut router = InputRouter::new(300);
        let commands = router.route(UiMode::Menu, &[event(0, 0)], &[], 0);
        assert!(commands.is_empty());

        // The key was recorded while in the menu, so it does not fire later
        let commands = router.route(UiMode::Calculator, &[event(0, 0)], &[], 50);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_navigation_rate_limited() {
        let mut router = InputRouter::new(300);
        let down = [NavButton::Down];
        assert_eq!(
            router.route(UiMode::Menu, &[], &down, 1000).as_slice(),
            &[Command::Navigate(NavButton::Down)]
        );
        assert!(router.route(UiMode::Menu, &[], &down, 1200).is_empty());
        assert_eq!(router.route(UiMode::Menu, &[], &down, 1350).len(), 1);
    }

    #[test]
    fn test_one_navigation_per_tick() {
        let mut router = InputRouter::new(300);
        let commands = router.route(
            UiMode::About,
            &[],
            &[NavButton::Down, NavButton::Enter],
            1000,
        );
        assert_eq!(commands.as_slice(), &[Command::Navigate(NavButton::Down)]);
    }

    #[test]
    fn test_left_right_do_not_consume_limiter() {
        let mut router = InputRouter::new(300);
        assert!(router
            .route(UiMode::Menu, &[], &[NavButton::Left, NavButton::Right], 1000)
            .is_empty());
        assert_eq!(
            router.route(UiMode::Menu, &[], &[NavButton::Up], 1010).as_slice(),
            &[Command::Navigate(NavButton::Up)]
        );
    }

    #[test]
    fn test_dispatch_menu_key() {
        let mut calc = CalculatorState::new();
        let mut nav = Navigator::new();
        dispatch(Command::Key(Key::Menu), &mut calc, &mut nav, &InfixEvaluator);
        assert_eq!(nav.mode(), UiMode::Menu);
        assert_eq!(nav.menu_position(), 0);
    }

    #[test]
    fn test_dispatch_keys_drive_calculator() {
        let mut calc = CalculatorState::new();
        let mut nav = Navigator::new();
        for key in [
            Key::Digit(2),
            Key::Operator(crate::input::Operator::Add),
            Key::Digit(3),
        ] {
            dispatch(Command::Key(key), &mut calc, &mut nav, &InfixEvaluator);
        }
        dispatch(Command::Evaluate, &mut calc, &mut nav, &InfixEvaluator);
        assert_eq!(calc.result().as_str(), "5");
    }
}
