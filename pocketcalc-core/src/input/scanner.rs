//! Key scanner
//!
//! Walks the matrix one row at a time and samples the navigation buttons.
//! Every sample is a confirm-read: read, wait, read again, and count the key
//! only when both reads say pressed.

use embedded_hal::delay::DelayNs;
use heapless::Vec;
use pocketcalc_hal::{KeypadMatrix, NavButton, NavButtons};

use super::keymap::{self, Key, KEYPAD_COLS, KEYPAD_ROWS};
use crate::config::ScanTiming;
use crate::controller::TickError;

/// Most matrix keys one scan can report
pub const MAX_MATRIX_KEYS: usize = KEYPAD_ROWS * KEYPAD_COLS;

/// Number of navigation buttons
pub const NAV_BUTTON_COUNT: usize = NavButton::ALL.len();

/// A key seen pressed during one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixKeyEvent {
    pub row: u8,
    pub col: u8,
    pub key: Key,
}

/// Pressed matrix keys in row-major order
pub type MatrixKeys = Vec<MatrixKeyEvent, MAX_MATRIX_KEYS>;

/// A set of navigation buttons in [`NavButton::ALL`] order
pub type NavSet = Vec<NavButton, NAV_BUTTON_COUNT>;

/// Result of sampling the navigation buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavScan {
    /// Buttons that passed the confirm-read
    pub pressed: NavSet,
    /// Buttons whose read failed; treated as released this tick
    pub faults: NavSet,
}

/// Confirm-read scanner for the keypad and navigation buttons
#[derive(Debug, Clone, Copy)]
pub struct KeyScanner {
    timing: ScanTiming,
}

impl KeyScanner {
    pub const fn new(timing: ScanTiming) -> Self {
        Self { timing }
    }

    /// Sample the whole matrix
    ///
    /// `shift` picks the legend used to name each pressed position. A failed
    /// read aborts the scan after releasing the active row.
    pub fn scan_matrix<M, D>(
        &self,
        matrix: &mut M,
        delay: &mut D,
        shift: bool,
    ) -> Result<MatrixKeys, TickError>
    where
        M: KeypadMatrix,
        D: DelayNs,
    {
        let mut keys = MatrixKeys::new();
        let rows = matrix.rows().min(KEYPAD_ROWS);

        for row in 0..rows {
            matrix.activate_row(row);
            delay.delay_us(self.timing.row_settle_us);

            let outcome = self.scan_row(matrix, delay, row, shift, &mut keys);

            matrix.deactivate_row(row);
            delay.delay_us(self.timing.row_release_us);
            outcome?;
        }

        Ok(keys)
    }

    fn scan_row<M, D>(
        &self,
        matrix: &mut M,
        delay: &mut D,
        row: usize,
        shift: bool,
        keys: &mut MatrixKeys,
    ) -> Result<(), TickError>
    where
        M: KeypadMatrix,
        D: DelayNs,
    {
        let cols = matrix.cols().min(KEYPAD_COLS);
        for col in 0..cols {
            let pressed = self
                .confirm(delay, || matrix.is_pressed(col))
                .map_err(|_| TickError::MatrixRead {
                    row: row as u8,
                    col: col as u8,
                })?;
            if !pressed {
                continue;
            }
            if let Some(key) = keymap::lookup(shift, row, col) {
                // Capacity equals the grid size
                let _ = keys.push(MatrixKeyEvent {
                    row: row as u8,
                    col: col as u8,
                    key,
                });
            }
        }
        Ok(())
    }

    /// Sample every navigation button
    ///
    /// Read failures never propagate; the button is reported in
    /// [`NavScan::faults`] and counts as released.
    pub fn scan_nav<B, D>(&self, buttons: &mut B, delay: &mut D) -> NavScan
    where
        B: NavButtons,
        D: DelayNs,
    {
        let mut scan = NavScan::default();
        for button in NavButton::ALL {
            match self.confirm(delay, || buttons.is_pressed(button)) {
                Ok(true) => {
                    let _ = scan.pressed.push(button);
                }
                Ok(false) => {}
                Err(_) => {
                    let _ = scan.faults.push(button);
                }
            }
        }
        scan
    }

    fn confirm<D, E, F>(&self, delay: &mut D, mut read: F) -> Result<bool, E>
    where
        D: DelayNs,
        F: FnMut() -> Result<bool, E>,
    {
        if !read()? {
            return Ok(false);
        }
        delay.delay_us(self.timing.confirm_us);
        read()
    }
}

impl Default for KeyScanner {
    fn default() -> Self {
        Self::new(ScanTiming::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Function;

    /// Delay that only counts the time it was asked to wait
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += ns as u64;
        }
    }

    /// Scripted matrix: fixed pressed cells, optional bounce and fault
    struct FakeMatrix {
        pressed: [[bool; KEYPAD_COLS]; KEYPAD_ROWS],
        active: Option<usize>,
        /// Cell whose reads alternate pressed, released, pressed...
        bouncy: Option<(usize, usize)>,
        bounce_level: bool,
        failing: Option<(usize, usize)>,
        released_rows: u32,
    }

    impl FakeMatrix {
        fn new() -> Self {
            Self {
                pressed: [[false; KEYPAD_COLS]; KEYPAD_ROWS],
                active: None,
                bouncy: None,
                bounce_level: false,
                failing: None,
                released_rows: 0,
            }
        }
    }

    impl KeypadMatrix for FakeMatrix {
        type Error = ();

        fn rows(&self) -> usize {
            KEYPAD_ROWS
        }

        fn cols(&self) -> usize {
            KEYPAD_COLS
        }

        fn activate_row(&mut self, row: usize) {
            self.active = Some(row);
        }

        fn deactivate_row(&mut self, _row: usize) {
            self.active = None;
            self.released_rows += 1;
        }

        fn is_pressed(&mut self, col: usize) -> Result<bool, ()> {
            let row = self.active.ok_or(())?;
            if self.failing == Some((row, col)) {
                return Err(());
            }
            if self.bouncy == Some((row, col)) {
                self.bounce_level = !self.bounce_level;
                return Ok(self.bounce_level);
            }
            Ok(self.pressed[row][col])
        }
    }

    struct FakeButtons {
        pressed: [bool; 5],
        failing: Option<NavButton>,
    }

    impl NavButtons for FakeButtons {
        type Error = ();

        fn is_pressed(&mut self, button: NavButton) -> Result<bool, ()> {
            if self.failing == Some(button) {
                return Err(());
            }
            Ok(self.pressed[button.index()])
        }
    }

    #[test]
    fn test_scan_reports_row_major_keys() {
        let mut matrix = FakeMatrix::new();
        matrix.pressed[2][4] = true;
        matrix.pressed[0][1] = true;
        let scanner = KeyScanner::default();

        let keys = scanner
            .scan_matrix(&mut matrix, &mut CountingDelay::default(), false)
            .unwrap();

        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], MatrixKeyEvent { row: 0, col: 1, key: Key::Digit(8) });
        assert_eq!(keys[1], MatrixKeyEvent { row: 2, col: 4, key: Key::Equals });
        assert_eq!(matrix.released_rows, 4);
    }

    #[test]
    fn test_shift_selects_scientific_legend() {
        let mut matrix = FakeMatrix::new();
        matrix.pressed[1][2] = true;
        let keys = KeyScanner::default()
            .scan_matrix(&mut matrix, &mut CountingDelay::default(), true)
            .unwrap();
        assert_eq!(keys[0].key, Key::Function(Function::Sqrt));
    }

    #[test]
    fn test_bounce_rejected_by_confirm_read() {
        let mut matrix = FakeMatrix::new();
        matrix.bouncy = Some((1, 1));
        let keys = KeyScanner::default()
            .scan_matrix(&mut matrix, &mut CountingDelay::default(), false)
            .unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn test_scan_timing() {
        let mut matrix = FakeMatrix::new();
        matrix.pressed[0][0] = true;
        let mut delay = CountingDelay::default();
        KeyScanner::default()
            .scan_matrix(&mut matrix, &mut delay, false)
            .unwrap();
        // Four rows of settle + release, plus one confirm gap for the pressed key
        assert_eq!(delay.total_ns, (4 * (80 + 40) + 50) * 1_000);
    }

    #[test]
    fn test_read_fault_releases_row() {
        let mut matrix = FakeMatrix::new();
        matrix.failing = Some((1, 3));
        let result = KeyScanner::default().scan_matrix(
            &mut matrix,
            &mut CountingDelay::default(),
            false,
        );
        assert_eq!(result, Err(TickError::MatrixRead { row: 1, col: 3 }));
        assert_eq!(matrix.active, None);
        assert_eq!(matrix.released_rows, 2);
    }

    #[test]
    fn test_nav_scan() {
        let mut buttons = FakeButtons {
            pressed: [true, false, false, false, true],
            failing: None,
        };
        let scan = KeyScanner::default().scan_nav(&mut buttons, &mut CountingDelay::default());
        assert_eq!(scan.pressed.as_slice(), &[NavButton::Up, NavButton::Enter]);
        assert!(scan.faults.is_empty());
    }

    #[test]
    fn test_nav_fault_counts_as_released() {
        let mut buttons = FakeButtons {
            pressed: [false, true, false, false, false],
            failing: Some(NavButton::Down),
        };
        let scan = KeyScanner::default().scan_nav(&mut buttons, &mut CountingDelay::default());
        assert!(scan.pressed.is_empty());
        assert_eq!(scan.faults.as_slice(), &[NavButton::Down]);
    }
}
