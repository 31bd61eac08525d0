//! Menu and about-page navigation

use pocketcalc_hal::NavButton;

use super::calculator::CalculatorState;

/// Which screen owns the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    #[default]
    Calculator,
    Menu,
    About,
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    BasicCalc,
    Scientific,
    Settings,
    About,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::BasicCalc,
        MenuItem::Scientific,
        MenuItem::Settings,
        MenuItem::About,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MenuItem::BasicCalc => "Basic Calc",
            MenuItem::Scientific => "Scientific",
            MenuItem::Settings => "Settings",
            MenuItem::About => "About",
        }
    }
}

/// About screen, up to four lines per page; empty lines are skipped
pub const ABOUT_PAGES: [[&str; 4]; 4] = [
    ["POCKETCALC v0.1", "Rust + embassy", "RP2040", ""],
    ["CONSTANTS:", "pi and e shown", "to 11 decimals", "to fit screen"],
    ["NEGATIVE VALUES:", "press - before", "the number, e.g.", "2*-3"],
    ["NAVIGATION:", "UP/DOWN=Scroll", "ENTER=Select/Exit", "MENU key=Menu"],
];

/// Menu cursor and about page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Navigator {
    mode: UiMode,
    menu_position: usize,
    about_page: usize,
}

impl Navigator {
    pub const fn new() -> Self {
        Self {
            mode: UiMode::Calculator,
            menu_position: 0,
            about_page: 0,
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn menu_position(&self) -> usize {
        self.menu_position
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_position % MenuItem::ALL.len()]
    }

    pub fn about_page(&self) -> usize {
        self.about_page
    }

    /// Menu key: show the menu with the cursor on the first item
    pub fn open_menu(&mut self) {
        self.mode = UiMode::Menu;
        self.menu_position = 0;
    }

    /// Apply one rate-limited navigation action
    ///
    /// Returns whether the button did anything in the current mode.
    pub fn navigate(&mut self, button: NavButton, calc: &mut CalculatorState) -> bool {
        match self.mode {
            UiMode::Menu => match button {
                NavButton::Up => {
                    self.menu_position = step_back(self.menu_position, MenuItem::ALL.len());
                    true
                }
                NavButton::Down => {
                    self.menu_position = (self.menu_position + 1) % MenuItem::ALL.len();
                    true
                }
                NavButton::Enter => {
                    self.select(calc);
                    true
                }
                NavButton::Left | NavButton::Right => false,
            },
            UiMode::About => match button {
                NavButton::Up => {
                    self.about_page = step_back(self.about_page, ABOUT_PAGES.len());
                    true
                }
                NavButton::Down => {
                    self.about_page = (self.about_page + 1) % ABOUT_PAGES.len();
                    true
                }
                NavButton::Enter => {
                    self.mode = UiMode::Calculator;
                    true
                }
                NavButton::Left | NavButton::Right => false,
            },
            UiMode::Calculator => false,
        }
    }

    fn select(&mut self, calc: &mut CalculatorState) {
        match self.selected_item() {
            MenuItem::BasicCalc => {
                calc.set_shift_mode(false);
                self.mode = UiMode::Calculator;
            }
            MenuItem::Scientific => {
                calc.set_shift_mode(true);
                self.mode = UiMode::Calculator;
            }
            MenuItem::Settings => self.mode = UiMode::Calculator,
            MenuItem::About => {
                self.about_page = 0;
                self.mode = UiMode::About;
            }
        }
    }
}

fn step_back(position: usize, len: usize) -> usize {
    (position + len - 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_menu() -> (Navigator, CalculatorState) {
        let mut nav = Navigator::new();
        nav.open_menu();
        (nav, CalculatorState::new())
    }

    #[test]
    fn test_menu_wraps() {
        let (mut nav, mut calc) = in_menu();
        assert!(nav.navigate(NavButton::Up, &mut calc));
        assert_eq!(nav.menu_position(), 3);
        assert!(nav.navigate(NavButton::Down, &mut calc));
        assert_eq!(nav.menu_position(), 0);
    }

    #[test]
    fn test_select_scientific_then_basic() {
        let (mut nav, mut calc) = in_menu();
        nav.navigate(NavButton::Down, &mut calc);
        nav.navigate(NavButton::Enter, &mut calc);
        assert_eq!(nav.mode(), UiMode::Calculator);
        assert!(calc.shift_mode());

        nav.open_menu();
        assert_eq!(nav.menu_position(), 0);
        nav.navigate(NavButton::Enter, &mut calc);
        assert!(!calc.shift_mode());
    }

    #[test]
    fn test_settings_returns_unchanged() {
        let (mut nav, mut calc) = in_menu();
        calc.press_digit(4);
        calc.set_shift_mode(true);
        let before = calc.clone();
        nav.navigate(NavButton::Down, &mut calc);
        nav.navigate(NavButton::Down, &mut calc);
        assert_eq!(nav.selected_item(), MenuItem::Settings);
        nav.navigate(NavButton::Enter, &mut calc);
        assert_eq!(nav.mode(), UiMode::Calculator);
        assert_eq!(calc, before);
    }

    #[test]
    fn test_about_pages() {
        let (mut nav, mut calc) = in_menu();
        nav.navigate(NavButton::Up, &mut calc);
        nav.navigate(NavButton::Enter, &mut calc);
        assert_eq!(nav.mode(), UiMode::About);
        assert_eq!(nav.about_page(), 0);

        nav.navigate(NavButton::Up, &mut calc);
        assert_eq!(nav.about_page(), ABOUT_PAGES.len() - 1);
        nav.navigate(NavButton::Down, &mut calc);
        nav.navigate(NavButton::Down, &mut calc);
        assert_eq!(nav.about_page(), 1);

        nav.navigate(NavButton::Enter, &mut calc);
        assert_eq!(nav.mode(), UiMode::Calculator);
    }

    #[test]
    fn test_left_right_do_nothing() {
        let (mut nav, mut calc) = in_menu();
        assert!(!nav.navigate(NavButton::Left, &mut calc));
        assert!(!nav.navigate(NavButton::Right, &mut calc));
        assert_eq!(nav.menu_position(), 0);
        assert_eq!(nav.mode(), UiMode::Menu);
    }

    #[test]
    fn test_calculator_mode_ignores_navigation() {
        let mut nav = Navigator::new();
        let mut calc = CalculatorState::new();
        assert!(!nav.navigate(NavButton::Down, &mut calc));
        assert_eq!(nav.mode(), UiMode::Calculator);
    }

    #[test]
    fn test_about_lines_fit_screen() {
        for page in ABOUT_PAGES {
            for line in page {
                assert!(line.chars().count() <= pocketcalc_display::SCREEN_COLS);
            }
        }
    }
}
