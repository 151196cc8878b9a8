//! Art library - named presets loaded from JSON files
//!
//! Each `*.json` file holds `{ "name": ..., "pixels": [{row, col, color}] }`.
//! Files are read in file-name order; a file that cannot be read or parsed is
//! logged and skipped. Without a preset directory the library falls back to
//! the seed presets compiled into the crate.

use pixart_core::{is_valid_preset_name, Color, Grid, PresetEntry};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::client::PresetProvider;
use crate::error::{ControlError, Result};

#[derive(RustEmbed)]
#[folder = "../../presets/"]
struct SeedPresets;

/// In-memory preset library
#[derive(Debug, Clone, Default)]
pub struct ArtLibrary {
    /// Names in discovery order
    names: Vec<String>,
    grids: HashMap<String, Grid>,
}

impl ArtLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already parsed entries
    pub fn from_entries(entries: impl IntoIterator<Item = PresetEntry>) -> Self {
        let mut library = Self::new();
        for entry in entries {
            library.insert(entry);
        }
        library
    }

    /// Load every `*.json` file of `dir`. A missing directory yields an
    /// empty library.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut library = Self::new();
        if !dir.is_dir() {
            warn!("Preset directory {:?} does not exist", dir);
            return Ok(library);
        }

        let mut files: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        files.sort();

        for file in files {
            let parsed = std::fs::read_to_string(&file)
                .map_err(ControlError::from)
                .and_then(|raw| Ok(PresetEntry::from_json_str(&raw)?));
            match parsed {
                Ok(entry) => library.insert(entry),
                Err(e) => error!("Failed to load pixel art {:?}: {}", file, e),
            }
        }

        info!("Loaded {} presets from {:?}", library.len(), dir);
        Ok(library)
    }

    /// Library of the seed presets compiled into the crate
    pub fn embedded() -> Self {
        let mut files: Vec<String> = SeedPresets::iter()
            .map(|f| f.into_owned())
            .filter(|f| f.ends_with(".json"))
            .collect();
        files.sort();

        let mut library = Self::new();
        for file in files {
            let Some(asset) = SeedPresets::get(&file) else {
                continue;
            };
            let parsed = std::str::from_utf8(&asset.data)
                .map_err(|e| e.to_string())
                .and_then(|raw| PresetEntry::from_json_str(raw).map_err(|e| e.to_string()));
            match parsed {
                Ok(entry) => library.insert(entry),
                Err(e) => error!("Failed to load embedded pixel art {}: {}", file, e),
            }
        }
        debug!("Loaded {} embedded presets", library.len());
        library
    }

    fn insert(&mut self, entry: PresetEntry) {
        if !is_valid_preset_name(&entry.name) {
            // Unreachable through the API, so not worth serving
            warn!("Skipping preset with unusable name '{}'", entry.name);
            return;
        }
        if !self.grids.contains_key(&entry.name) {
            self.names.push(entry.name.clone());
        }
        let grid = entry.to_grid();
        self.grids.insert(entry.name, grid);
    }

    /// Preset names in discovery order
    pub fn art_list(&self) -> Vec<String> {
        self.names.clone()
    }

    /// 256 colors of a preset; all white when the name is unknown
    pub fn get_art(&self, name: &str) -> Vec<String> {
        self.grids
            .get(name)
            .map(Grid::to_color_strings)
            .unwrap_or_else(|| Grid::new().to_color_strings())
    }

    /// Grid of a preset
    pub fn get_grid(&self, name: &str) -> Option<&Grid> {
        self.grids.get(name)
    }

    /// Color of one cell of a preset; white when the preset or cell is unknown
    pub fn get_pixel(&self, name: &str, row: usize, col: usize) -> Color {
        self.grids
            .get(name)
            .map(|grid| grid.pixel(row, col))
            .unwrap_or(Color::WHITE)
    }

    /// Whether a preset exists
    pub fn has_art(&self, name: &str) -> bool {
        self.grids.contains_key(name)
    }

    /// Number of presets
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the library holds no presets
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl PresetProvider for ArtLibrary {
    async fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.art_list())
    }

    async fn get_preset(&self, name: &str) -> Result<Grid> {
        if !is_valid_preset_name(name) {
            return Err(ControlError::InvalidPresetName(name.to_string()));
        }
        self.get_grid(name)
            .cloned()
            .ok_or_else(|| ControlError::PresetNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_library_has_mario() {
        let library = ArtLibrary::embedded();
        assert!(!library.is_empty());
        assert!(library.art_list().contains(&"mario".to_string()));
        assert_eq!(library.get_art("mario").len(), 256);
    }

    #[test]
    fn test_unknown_art_falls_back_to_white() {
        let library = ArtLibrary::embedded();
        let art = library.get_art("__missing__");
        assert_eq!(art.len(), 256);
        assert!(art.iter().all(|c| c == "#FFFFFF"));
        assert!(!library.has_art("__missing__"));
    }

    #[test]
    fn test_load_dir_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b_dot.json"),
            r##"{"name": "dot", "pixels": [{"row": 0, "col": 0, "color": "#000000"}]}"##,
        )
        .unwrap();
        std::fs::write(dir.path().join("a_broken.json"), "{ nope").unwrap();
        std::fs::write(dir.path().join("c_noname.json"), r#"{"pixels": []}"#).unwrap();
        std::fs::write(
            dir.path().join("d_square.json"),
            r##"{"name": "square", "pixels": []}"##,
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let library = ArtLibrary::load_dir(dir.path()).unwrap();
        assert_eq!(library.art_list(), vec!["dot", "square"]);
        assert_eq!(library.get_grid("dot").unwrap().get(0), Some(Color::BLACK));
        assert_eq!(library.get_pixel("dot", 0, 0), Color::BLACK);
        assert_eq!(library.get_pixel("dot", 0, 1), Color::WHITE);
        assert_eq!(library.get_pixel("dot", 16, 0), Color::WHITE);
        assert_eq!(library.get_pixel("nope", 0, 0), Color::WHITE);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let library = ArtLibrary::load_dir(&dir.path().join("nope")).unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_duplicate_names_keep_first_position() {
        let a = PresetEntry {
            name: "a".to_string(),
            pixels: vec![],
        };
        let b = PresetEntry {
            name: "b".to_string(),
            pixels: vec![],
        };
        let library = ArtLibrary::from_entries([a.clone(), b, a]);
        assert_eq!(library.art_list(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_provider_boundary_errors() {
        let library = ArtLibrary::embedded();
        assert!(matches!(
            library.get_preset("__missing__").await,
            Err(ControlError::PresetNotFound(_))
        ));
        assert!(matches!(
            library.get_preset("../etc/passwd").await,
            Err(ControlError::InvalidPresetName(_))
        ));
        assert!(library.get_preset("mario").await.is_ok());
    }
}
