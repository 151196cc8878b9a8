//! Error types for export and storage operations.

use pixart_core::CoreError;

/// Result type alias for export and storage operations.
pub type Result<T> = std::result::Result<T, IoError>;

/// Error type for export and storage operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster encoding failure
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Domain error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Image payload too large for a 32-bit ICO size field
    #[error("ICO payload too large: {0} bytes")]
    PayloadTooLarge(usize),

    /// Unknown export format name
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    /// No platform data directory for the default store location
    #[error("No data directory available on this platform")]
    NoDataDir,
}
