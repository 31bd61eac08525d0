//! Screen buffer types
//!
//! A `Screen` is a list of text cells placed on a character grid. It is
//! built fresh for every frame and replayed onto a [`DisplayBackend`].

use heapless::{String, Vec};

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows (6×10 glyphs on a 64 px tall panel)
pub const SCREEN_ROWS: usize = 6;

/// Number of character columns (6 px glyphs on a 128 px wide panel)
pub const SCREEN_COLS: usize = 21;

/// Maximum text cells per frame
pub const MAX_CELLS: usize = 12;

/// Horizontal placement of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// Start at the given column
    Left(u8),
    /// Centre on the row
    Center,
    /// End at the last column
    Right,
}

/// One run of text on one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u8,
    pub align: Align,
    pub text: String<SCREEN_COLS>,
    pub inverted: bool,
}

impl Cell {
    /// Resolve the starting column for this cell
    pub fn column(&self) -> u8 {
        let len = self.text.chars().count().min(SCREEN_COLS) as u8;
        match self.align {
            Align::Left(col) => col,
            Align::Center => (SCREEN_COLS as u8).saturating_sub(len) / 2,
            Align::Right => (SCREEN_COLS as u8).saturating_sub(len),
        }
    }
}

/// Frame content for text-mode displays
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    cells: Vec<Cell, MAX_CELLS>,
}

impl Screen {
    /// Create a new empty screen
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Remove every cell
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Place plain text
    pub fn put(&mut self, row: u8, align: Align, text: &str) {
        self.push(row, align, text, false);
    }

    /// Place text in an inverted box
    pub fn put_inverted(&mut self, row: u8, align: Align, text: &str) {
        self.push(row, align, text, true);
    }

    fn push(&mut self, row: u8, align: Align, text: &str, inverted: bool) {
        if row as usize >= SCREEN_ROWS {
            return;
        }
        let mut clipped: String<SCREEN_COLS> = String::new();
        for ch in text.chars() {
            if clipped.push(ch).is_err() {
                break;
            }
        }
        // Frames are small and fixed; a full buffer drops the extra cell
        let _ = self.cells.push(Cell {
            row,
            align,
            text: clipped,
            inverted,
        });
    }

    /// All cells in insertion order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// First cell placed on `row`
    pub fn cell_at(&self, row: u8) -> Option<&Cell> {
        self.cells.iter().find(|c| c.row == row)
    }

    /// Text of the first cell on `row`, or "" when the row is empty
    pub fn text_at(&self, row: u8) -> &str {
        self.cell_at(row).map(|c| c.text.as_str()).unwrap_or("")
    }

    /// Draw the frame and push it to the panel
    ///
    /// Drawing errors propagate. A failed flush is swallowed: the frame is
    /// simply lost and the next render tick tries again. Returns whether the
    /// flush went through.
    pub fn render<B: DisplayBackend>(&self, backend: &mut B) -> Result<bool, DisplayError> {
        backend.clear()?;
        for cell in &self.cells {
            let col = cell.column();
            if cell.inverted {
                backend.draw_inverted(cell.row, col, &cell.text)?;
            } else {
                backend.draw_text(cell.row, col, &cell.text)?;
            }
        }
        Ok(backend.flush().is_ok())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}:{}", cell.row, cell.text.as_str());
        }
        defmt::write!(f, "]");
    }
}
