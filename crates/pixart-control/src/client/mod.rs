//! Editor-side preset access
//!
//! - [`PresetProvider`] - the seam between the editor and wherever presets live
//! - [`HttpPresetClient`] - provider talking to the preset HTTP API
//! - [`PresetListTask`] - cancellable retry-until-success name fetch
//! - [`PresetLoader`] - drives preset loads into an editor

mod http;
mod loader;
mod retry;

pub use http::HttpPresetClient;
pub use loader::PresetLoader;
pub use retry::{PresetListTask, PRESET_LIST_RETRY_DELAY};

use pixart_core::Grid;
use std::future::Future;

use crate::error::Result;

/// Source of named presets
pub trait PresetProvider: Send + Sync {
    /// Names of the available presets, in discovery order
    fn list_names(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Full grid of one preset
    fn get_preset(&self, name: &str) -> impl Future<Output = Result<Grid>> + Send;
}
