//! Pixart IO - Exports and File Storage
//!
//! - [`export`] - JSON document, PNG raster and ICO container encoders
//! - [`store`] - file-backed persistence store
//! - [`error`] - error types

#![warn(missing_docs)]

pub mod error;
pub mod export;
pub mod store;

pub use error::{IoError, Result};
pub use export::{
    decode_json, encode_ico, encode_json, encode_json_named, encode_png, export_name,
    render_grid, wrap_png_in_ico, write_export, ExportFormat, ICO_CELL_SIZE, ICO_DATA_OFFSET,
    PNG_CELL_SIZE,
};
pub use store::FileStore;
