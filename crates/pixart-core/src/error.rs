//! Error types for the editor domain
use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum CoreError {
    /// Color string in no recognized CSS form
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Cell index outside the 256-cell grid
    #[error("Cell index out of range: {0}")]
    IndexOutOfRange(usize),

    /// Color sequence with the wrong number of cells
    #[error("Expected {expected} colors, got {actual}")]
    WrongCellCount {
        /// Required number of cells
        expected: usize,
        /// Number of cells received
        actual: usize,
    },

    /// Preset name outside `[A-Za-z0-9_-]+`
    #[error("Invalid preset name: {0}")]
    InvalidPresetName(String),

    /// Preset document missing required fields
    #[error("Invalid preset: {0}")]
    InvalidPreset(String),

    /// Configuration rejected at load time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Persistence store failure
    #[error("Persistence error: {0}")]
    Store(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
