//! Local save/restore of the grid
//!
//! The snapshot is a JSON array of 256 color strings, written under a single
//! key of a string key-value store.

use std::collections::HashMap;

use crate::color::Color;
use crate::error::Result;
use crate::grid::{Grid, GRID_CELLS};

/// Store key holding the grid snapshot
pub const SAVE_KEY: &str = "pixel_art_save";

/// String-keyed persistence backend
pub trait PersistenceStore {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store, for tests and hosts without durable storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: PersistenceStore + ?Sized> PersistenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Serialize the full grid
pub fn encode_snapshot(grid: &Grid) -> Result<String> {
    Ok(serde_json::to_string(&grid.to_color_strings())?)
}

/// Decode a snapshot onto a white grid.
///
/// Returns `None` for malformed JSON or a length other than 256. Entries that
/// are not parseable color strings are left white.
pub fn decode_snapshot(raw: &str) -> Option<Grid> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw).ok()?;
    if values.len() != GRID_CELLS {
        return None;
    }

    let mut grid = Grid::new();
    for (index, value) in values.iter().enumerate() {
        let Some(color) = value.as_str().and_then(|s| s.parse::<Color>().ok()) else {
            continue;
        };
        if !color.is_white() {
            // index < GRID_CELLS by the length check
            let _ = grid.set(index, Some(color));
        }
    }
    Some(grid)
}
