//! Error types for the preset service and client
use pixart_core::CoreError;
use thiserror::Error;

/// Preset service and client errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// HTTP server error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// HTTP client transport error
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Unexpected HTTP status from the preset server
    #[error("Unexpected status {status}: {message}")]
    Status {
        /// Status code
        status: u16,
        /// Error message from the response body, if any
        message: String,
    },

    /// Preset name outside `[A-Za-z0-9_-]+`
    #[error("Invalid art name: {0}")]
    InvalidPresetName(String),

    /// Valid name with no matching preset
    #[error("Art not found: {0}")]
    PresetNotFound(String),

    /// Domain error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for preset operations
pub type Result<T> = std::result::Result<T, ControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ControlError::PresetNotFound("zelda".to_string());
        assert_eq!(err.to_string(), "Art not found: zelda");

        let err = ControlError::Status {
            status: 503,
            message: "busy".to_string(),
        };
        assert_eq!(err.to_string(), "Unexpected status 503: busy");
    }
}
