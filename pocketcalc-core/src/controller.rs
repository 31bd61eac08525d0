//! Tick pipeline
//!
//! The controller owns every piece of state. Each scan tick borrows the
//! hardware, runs scanner → debouncers → router → dispatch, and reports
//! what happened so the caller can log it and decide whether to draw.

use embedded_hal::delay::DelayNs;
use pocketcalc_display::Screen;
use pocketcalc_hal::{KeypadMatrix, NavButton, NavButtons};

use crate::config::Config;
use crate::input::scanner::{MAX_MATRIX_KEYS, NAV_BUTTON_COUNT};
use crate::input::{
    dispatch, Commands, Debouncer, InputRouter, KeyScanner, MatrixKeyEvent, NavSet,
};
use crate::math::{Evaluator, InfixEvaluator};
use crate::render::{self, RenderCadence};
use crate::state::{CalculatorState, Navigator};

/// Tick failures
///
/// The tick is abandoned and no state changes; the next tick starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickError {
    /// A matrix cell read failed
    MatrixRead { row: u8, col: u8 },
}

/// What one tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Commands dispatched, in order
    pub commands: Commands,
    /// Navigation buttons whose read failed this tick
    pub nav_faults: NavSet,
    /// A frame should be drawn
    pub render_due: bool,
}

/// Calculator device controller
pub struct Controller<E = InfixEvaluator> {
    config: Config,
    calc: CalculatorState,
    navigator: Navigator,
    scanner: KeyScanner,
    matrix_debounce: Debouncer<MatrixKeyEvent, MAX_MATRIX_KEYS>,
    nav_debounce: Debouncer<NavButton, NAV_BUTTON_COUNT>,
    router: InputRouter,
    cadence: RenderCadence,
    evaluator: E,
}

impl Default for Controller<InfixEvaluator> {
    fn default() -> Self {
        Self::new(Config::DEFAULT, InfixEvaluator)
    }
}

impl<E: Evaluator> Controller<E> {
    pub fn new(config: Config, evaluator: E) -> Self {
        Self {
            config,
            calc: CalculatorState::new(),
            navigator: Navigator::new(),
            scanner: KeyScanner::new(config.scan),
            matrix_debounce: Debouncer::new(),
            nav_debounce: Debouncer::new(),
            router: InputRouter::new(config.nav_interval_ms),
            cadence: RenderCadence::new(config.render_divisor),
            evaluator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn calculator(&self) -> &CalculatorState {
        &self.calc
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Run one scan tick
    ///
    /// `now_ms` is a wrapping millisecond clock used by the navigation rate
    /// limiter. A matrix read failure aborts the tick before any state
    /// changes.
    pub fn process_tick<M, B, D>(
        &mut self,
        matrix: &mut M,
        buttons: &mut B,
        delay: &mut D,
        now_ms: u32,
    ) -> Result<TickReport, TickError>
    where
        M: KeypadMatrix,
        B: NavButtons,
        D: DelayNs,
    {
        let raw_keys = self
            .scanner
            .scan_matrix(matrix, delay, self.calc.shift_mode())?;
        let nav_scan = self.scanner.scan_nav(buttons, delay);

        let stable_keys = self.matrix_debounce.update(&raw_keys);
        let stable_nav = self.nav_debounce.update(&nav_scan.pressed);

        let commands = self
            .router
            .route(self.navigator.mode(), &stable_keys, &stable_nav, now_ms);
        for command in &commands {
            dispatch(*command, &mut self.calc, &mut self.navigator, &self.evaluator);
        }

        Ok(TickReport {
            commands,
            nav_faults: nav_scan.faults,
            render_due: self.cadence.tick(),
        })
    }

    /// Lay out the current frame
    pub fn compose(&self, screen: &mut Screen) {
        render::compose(&self.calc, &self.navigator, screen);
    }
}
