//! Fixed atlas grid planning.
//!
//! The atlas is always a 28x8 grid. Its pixel size follows the output-size
//! factor: 10 gives 512x256 and 20 gives 1024x512. Cell sizes are kept as
//! exact quotients; `512 / 28` is not an integer.

use thiserror::Error;

use crate::alphabet::{ALPHABET_LEN, FIRST_PRINTABLE};

/// Grid columns.
pub const COLUMNS: u32 = 28;

/// Grid rows.
pub const ROWS: u32 = 8;

/// Atlas width at factor 10.
pub const BASE_WIDTH: u32 = 512;

/// Atlas height at factor 10.
pub const BASE_HEIGHT: u32 = 256;

/// Errors from atlas planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Factor outside {0, 10, 20}.
    #[error("unsupported output size {0} (expected 10 or 20)")]
    UnsupportedOutputSize(u32),
}

/// Canvas size and grid geometry of one atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtlasPlan {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Grid columns (always [`COLUMNS`]).
    pub columns: u32,
    /// Grid rows (always [`ROWS`]).
    pub rows: u32,
    /// Cell width in pixels.
    pub cell_width: f64,
    /// Cell height in pixels.
    pub cell_height: f64,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub column: u32,
    pub row: u32,
    /// Alphabet index, `row * 28 + column`.
    pub index: usize,
    /// Byte value, `32 + index`.
    pub byte: u8,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
}

impl AtlasPlan {
    /// Plans the atlas for an output-size factor. 0 means absent and selects 512x256.
    pub fn for_output_size(factor: u32) -> Result<Self, LayoutError> {
        let (width, height) = match factor {
            0 => (BASE_WIDTH, BASE_HEIGHT),
            10 | 20 => (BASE_WIDTH * factor / 10, BASE_HEIGHT * factor / 10),
            other => return Err(LayoutError::UnsupportedOutputSize(other)),
        };
        Ok(Self::with_canvas(width, height))
    }

    fn with_canvas(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            columns: COLUMNS,
            rows: ROWS,
            cell_width: f64::from(width) / f64::from(COLUMNS),
            cell_height: f64::from(height) / f64::from(ROWS),
        }
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        (self.columns * self.rows) as usize
    }

    /// Returns the cell for an alphabet index.
    pub fn cell(&self, index: usize) -> Option<Cell> {
        if index >= self.cell_count() || index >= ALPHABET_LEN {
            return None;
        }
        let column = (index % self.columns as usize) as u32;
        let row = (index / self.columns as usize) as u32;
        Some(Cell {
            column,
            row,
            index,
            byte: FIRST_PRINTABLE + index as u8,
            x: f64::from(column) * self.cell_width,
            y: f64::from(row) * self.cell_height,
        })
    }

    /// Iterates all cells row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.cell_count()).filter_map(move |i| self.cell(i))
    }
}
