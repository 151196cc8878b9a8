//! Grid - the 16x16 artwork buffer
//!
//! Cells are stored row-major (`row = index / 16`, `col = index % 16`).
//! An empty cell is `None` and reads back as white; writing white into a
//! cell empties it, so a painted white cell and a never-painted cell are the
//! same thing.

use crate::color::Color;
use crate::error::{CoreError, Result};

/// Grid width in cells
pub const GRID_WIDTH: usize = 16;
/// Grid height in cells
pub const GRID_HEIGHT: usize = 16;
/// Total number of cells
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_HEIGHT;

/// Fixed-size color grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Option<Color>; GRID_CELLS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Create an all-white grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_CELLS],
        }
    }

    /// Build a grid from exactly 256 colors in row-major order
    pub fn from_colors(colors: &[Color]) -> Result<Self> {
        if colors.len() != GRID_CELLS {
            return Err(CoreError::WrongCellCount {
                expected: GRID_CELLS,
                actual: colors.len(),
            });
        }

        let mut grid = Self::new();
        for (index, color) in colors.iter().enumerate() {
            grid.cells[index] = (!color.is_white()).then_some(*color);
        }
        Ok(grid)
    }

    /// Build a grid from exactly 256 color strings in row-major order
    pub fn from_color_strings<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let parsed = colors
            .iter()
            .map(|c| c.as_ref().parse::<Color>())
            .collect::<Result<Vec<_>>>()?;
        Self::from_colors(&parsed)
    }

    /// Linear index for a row/column pair
    pub fn index_of(row: usize, col: usize) -> Option<usize> {
        (row < GRID_HEIGHT && col < GRID_WIDTH).then(|| row * GRID_WIDTH + col)
    }

    /// Row/column pair for a linear index
    pub fn position(index: usize) -> (usize, usize) {
        (index / GRID_WIDTH, index % GRID_WIDTH)
    }

    /// Painted color of a cell, `None` when empty or out of range
    pub fn get(&self, index: usize) -> Option<Color> {
        self.cells.get(index).copied().flatten()
    }

    /// Displayed color of a cell (white when empty)
    pub fn color_at(&self, index: usize) -> Color {
        self.get(index).unwrap_or(Color::WHITE)
    }

    /// Displayed color at a row/column, white outside the grid
    pub fn pixel(&self, row: usize, col: usize) -> Color {
        Self::index_of(row, col)
            .map(|index| self.color_at(index))
            .unwrap_or(Color::WHITE)
    }

    /// Write a cell. Returns whether the displayed color changed.
    pub fn set(&mut self, index: usize, color: Option<Color>) -> Result<bool> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(CoreError::IndexOutOfRange(index))?;
        let normalized = color.filter(|c| !c.is_white());
        let changed = *cell != normalized;
        *cell = normalized;
        Ok(changed)
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells = [None; GRID_CELLS];
    }

    /// Whether no cell is painted
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Raw cell storage
    pub fn cells(&self) -> &[Option<Color>] {
        &self.cells
    }

    /// Painted cells in row-major order
    pub fn painted(&self) -> impl Iterator<Item = (usize, Color)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|c| (index, c)))
    }

    /// Displayed colors as strings, white written out as `#FFFFFF`
    pub fn to_color_strings(&self) -> Vec<String> {
        (0..GRID_CELLS).map(|i| self.color_at(i).to_hex()).collect()
    }
}
