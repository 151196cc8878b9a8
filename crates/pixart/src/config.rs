//! Application configuration loaded from `pixart.toml`

use anyhow::{Context, Result};
use pixart_control::ServerConfig;
use pixart_core::{LocaleCatalog, LogConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pixart.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub log: LogConfig,
    pub locales: LocaleCatalog,
    /// File backing the editor snapshot; the user data dir when unset
    pub store_path: Option<PathBuf>,
    /// Preset server used by the CLI instead of the local library
    pub presets_url: Option<String>,
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(raw).context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`]. A missing file
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            return Ok((Self::default(), None));
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config =
            Self::from_toml_str(&raw).with_context(|| format!("In config file: {:?}", path))?;
        Ok((config, Some(path)))
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        self.locales
            .validate()
            .context("Invalid locale configuration")?;
        if let Some(url) = &self.presets_url {
            if url.trim().is_empty() {
                anyhow::bail!("presets_url must not be empty");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config = AppConfig::from_toml_str(
            r#"
store_path = "/tmp/pixart-store.json"

[server]
port = 9000
preset_dir = "presets"

[log]
level = "debug"

[locales.translations.es]
toolsReset = "Reiniciar"
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.preset_dir, Some(PathBuf::from("presets")));
        assert_eq!(config.log.level, "debug");
        assert_eq!(
            config.store_path,
            Some(PathBuf::from("/tmp/pixart-store.json"))
        );
        let es = config.locales.translations_for("es");
        assert_eq!(es.tools_reset, "Reiniciar");
        assert_eq!(es.tools_draw, "Draw");
    }

    #[test]
    fn test_example_config_parses() {
        let config =
            AppConfig::from_toml_str(include_str!("../../../pixart.example.toml")).unwrap();
        assert_eq!(config.locales.default_locale, "fr");
        let fr = config.locales.translations_for("fr");
        assert_eq!(fr.tools_draw, "Dessiner");
        assert_eq!(fr.preset_label("star"), "Étoile");
        assert_eq!(fr.export_png, "PNG");
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        let result = AppConfig::from_toml_str(
            r#"
[locales.translations.de]
toolsReset = "Zurücksetzen"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_presets_url_is_rejected() {
        assert!(AppConfig::from_toml_str(r#"presets_url = " ""#).is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(source.is_none());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixart.toml");
        std::fs::write(&path, "presets_url = \"http://127.0.0.1:8080\"\n").unwrap();

        let (config, source) = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.presets_url.as_deref(), Some("http://127.0.0.1:8080"));
        assert_eq!(source, Some(path));
    }
}
