//! Sparse pixel art documents
//!
//! Presets and JSON exports share one layout: a name plus the list of
//! non-white cells as `{row, col, color}`. Omitted cells are white.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{CoreError, Result};
use crate::grid::{Grid, GRID_HEIGHT, GRID_WIDTH};

/// Preset loaded when a random pick has nothing to choose from
pub const FALLBACK_PRESET: &str = "mario";

/// Whether `name` matches `^[A-Za-z0-9_-]+$`
pub fn is_valid_preset_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

/// One painted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparsePixel {
    /// Row from the top, `0..16`
    pub row: usize,
    /// Column from the left, `0..16`
    pub col: usize,
    /// Cell color
    pub color: Color,
}

/// Named sparse artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetEntry {
    /// Preset name, also its lookup key
    pub name: String,
    /// Painted cells; cells not listed are white
    pub pixels: Vec<SparsePixel>,
}

#[derive(Deserialize)]
struct RawDocument {
    name: Option<String>,
    pixels: Option<Vec<RawPixel>>,
}

#[derive(Deserialize)]
struct RawPixel {
    row: Option<i64>,
    col: Option<i64>,
    color: Option<serde_json::Value>,
}

impl RawPixel {
    fn into_sparse(self) -> Option<SparsePixel> {
        let row = usize::try_from(self.row?).ok()?;
        let col = usize::try_from(self.col?).ok()?;
        if row >= GRID_HEIGHT || col >= GRID_WIDTH {
            return None;
        }
        let color = self.color?.as_str()?.parse::<Color>().ok()?;
        Some(SparsePixel { row, col, color })
    }
}

impl PresetEntry {
    /// Collect the painted cells of a grid
    pub fn from_grid(name: impl Into<String>, grid: &Grid) -> Self {
        let pixels = grid
            .painted()
            .map(|(index, color)| {
                let (row, col) = Grid::position(index);
                SparsePixel { row, col, color }
            })
            .collect();
        Self {
            name: name.into(),
            pixels,
        }
    }

    /// Parse a sparse document.
    ///
    /// `name` and `pixels` are required. Individual pixels missing a field,
    /// outside the grid, or with an unreadable color are skipped.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        let (Some(name), Some(pixels)) = (raw.name, raw.pixels) else {
            return Err(CoreError::InvalidPreset(
                "missing `name` or `pixels`".to_string(),
            ));
        };

        Ok(Self {
            name,
            pixels: pixels
                .into_iter()
                .filter_map(RawPixel::into_sparse)
                .collect(),
        })
    }

    /// Expand to a full grid; later entries for the same cell win
    pub fn to_grid(&self) -> Grid {
        let mut grid = Grid::new();
        for pixel in &self.pixels {
            if let Some(index) = Grid::index_of(pixel.row, pixel.col) {
                let _ = grid.set(index, Some(pixel.color));
            }
        }
        grid
    }

    /// Displayed color at a row/column, white outside the grid
    pub fn pixel(&self, row: usize, col: usize) -> Color {
        self.to_grid().pixel(row, col)
    }
}

/// Exported document with explicit dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtDocument {
    /// Document name, `pixel-art-YYYY-MM-DD` for exports
    pub name: String,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Painted cells in row-major order
    pub pixels: Vec<SparsePixel>,
}

impl ArtDocument {
    /// Build the export document for a grid
    pub fn from_grid(name: impl Into<String>, grid: &Grid) -> Self {
        let entry = PresetEntry::from_grid(name, grid);
        Self {
            name: entry.name,
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            pixels: entry.pixels,
        }
    }

    /// Expand to a full grid
    pub fn to_grid(&self) -> Grid {
        PresetEntry {
            name: self.name.clone(),
            pixels: self.pixels.clone(),
        }
        .to_grid()
    }
}
