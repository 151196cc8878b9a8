//! Export encoders
//!
//! Three stateless transforms of a grid: the sparse JSON document, a PNG
//! raster and an ICO file wrapping a PNG raster.

mod ico;
mod json;
mod png;

pub use ico::{encode_ico, wrap_png_in_ico, ICO_DATA_OFFSET};
pub use json::{decode_json, encode_json, encode_json_named, export_name};
pub use png::{encode_png, render_grid, ICO_CELL_SIZE, PNG_CELL_SIZE};

use pixart_core::Grid;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::error::{IoError, Result};

/// Export file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 512x512 PNG raster
    Png,
    /// ICO container holding a 256x256 PNG
    Ico,
    /// Sparse JSON document
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Ico => "ico",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type of the encoded bytes
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Ico => "image/x-icon",
            ExportFormat::Json => "application/json",
        }
    }

    /// Default download name
    pub fn file_name(&self) -> String {
        format!("pixel-art.{}", self.extension())
    }

    /// Encode a grid
    pub fn encode(&self, grid: &Grid) -> Result<Vec<u8>> {
        match self {
            ExportFormat::Png => encode_png(grid, PNG_CELL_SIZE),
            ExportFormat::Ico => encode_ico(grid),
            ExportFormat::Json => Ok(encode_json(grid)?.into_bytes()),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "ico" => Ok(ExportFormat::Ico),
            "json" => Ok(ExportFormat::Json),
            other => Err(IoError::UnknownFormat(other.to_string())),
        }
    }
}

/// Encode `grid` and write it to `path`
pub fn write_export(grid: &Grid, format: ExportFormat, path: &Path) -> Result<usize> {
    let bytes = format.encode(grid)?;
    std::fs::write(path, &bytes)?;
    info!("Exported {} ({} bytes) to {:?}", format, bytes.len(), path);
    Ok(bytes.len())
}
