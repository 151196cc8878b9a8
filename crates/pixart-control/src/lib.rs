//! Pixart Control - Preset Service and Preset Client
//!
//! This crate provides both ends of preset access:
//! - **Art library**: presets loaded from a directory of JSON files or the
//!   seed set compiled into the crate
//! - **Web API**: `GET /art`, `GET /art/{name}` and the translation endpoint
//! - **Client**: HTTP preset client, retrying preset list fetch and the
//!   loader that applies presets to an [`pixart_core::Editor`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixart_control::{ArtLibrary, ServerConfig, WebServer};
//!
//! # async fn run() -> pixart_control::Result<()> {
//! let server = WebServer::new(ServerConfig::new(8080), ArtLibrary::embedded());
//! server.run().await
//! # }
//! ```

#![allow(missing_docs)]

/// Error types
pub mod error;
/// Named preset library
pub mod library;

/// Editor-side preset access
pub mod client;

/// Web API server
pub mod web;

// Re-exports
pub use client::{
    HttpPresetClient, PresetListTask, PresetLoader, PresetProvider, PRESET_LIST_RETRY_DELAY,
};
pub use error::{ControlError, Result};
pub use library::ArtLibrary;
pub use web::{build_router, AppState, ServerConfig, WebServer};
