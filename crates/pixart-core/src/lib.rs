//! Pixart Core - Domain Model for the 16x16 Pixel Editor
//!
//! This crate contains everything that operates on the shared grid state:
//! - Colors and the 256-cell grid
//! - The editor (tools, drag painting, reset, preset loading state)
//! - Debounced save acknowledgments
//! - The sparse preset format and preset name rules
//! - Persistence snapshots
//! - Typed UI text configuration and logging configuration

#![warn(missing_docs)]

pub mod color;
pub mod editor;
pub mod error;
pub mod grid;
pub mod logging;
pub mod persistence;
pub mod preset;
pub mod toast;
pub mod translations;

// --- Re-exports grouped by category ---

// Grid & Colors
pub use color::Color;
pub use grid::{Grid, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH};

// Editor
pub use editor::{
    Editor, EditorEvent, EditorState, PaintOutcome, PendingPresetLoad, PresetLoadOutcome,
    PresetOption, PresetTicket, Tool, ERASE_REVEAL_DELAY,
};
pub use toast::{ToastDebouncer, ToastEvent, TOAST_DEBOUNCE, TOAST_VISIBLE};

// Presets
pub use preset::{is_valid_preset_name, ArtDocument, PresetEntry, SparsePixel, FALLBACK_PRESET};

// Persistence
pub use persistence::{decode_snapshot, encode_snapshot, MemoryStore, PersistenceStore, SAVE_KEY};

// Configuration
pub use logging::LogConfig;
pub use translations::{LocaleCatalog, Translations};

// Errors
pub use error::{CoreError, Result};
