//! User-facing text configuration
//!
//! Hosts supply labels per locale; every key falls back to an English
//! default, and the whole set is validated when loaded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{CoreError, Result};
use crate::preset::is_valid_preset_name;

/// Labels and messages shown by the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Translations {
    /// Alert shown when a preset fails to load
    pub error_loading: String,
    /// Placeholder entry of the preset selector
    pub load_preset: String,
    /// Color picker tooltip
    pub color_picker_title: String,
    /// Draw tool label
    pub tools_draw: String,
    /// Eraser tool label
    pub tools_eraser: String,
    /// Random preset label
    pub tools_random: String,
    /// Export menu label
    pub tools_export: String,
    /// Reset label
    pub tools_reset: String,
    /// PNG export entry
    pub export_png: String,
    /// ICO export entry
    pub export_ico: String,
    /// JSON export entry
    pub export_json: String,
    /// Display names for presets, keyed by preset name
    pub preset_name_labels: BTreeMap<String, String>,
}

impl Default for Translations {
    fn default() -> Self {
        Self {
            error_loading: "Error loading drawing.".to_string(),
            load_preset: "-- Load Preset --".to_string(),
            color_picker_title: "Choose Color".to_string(),
            tools_draw: "Draw".to_string(),
            tools_eraser: "Eraser".to_string(),
            tools_random: "Random".to_string(),
            tools_export: "Export".to_string(),
            tools_reset: "Reset".to_string(),
            export_png: "PNG".to_string(),
            export_ico: "ICO".to_string(),
            export_json: "JSON".to_string(),
            preset_name_labels: BTreeMap::new(),
        }
    }
}

impl Translations {
    /// Reject empty labels and label keys that are not preset names
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("errorLoading", &self.error_loading),
            ("loadPreset", &self.load_preset),
            ("colorPickerTitle", &self.color_picker_title),
            ("toolsDraw", &self.tools_draw),
            ("toolsEraser", &self.tools_eraser),
            ("toolsRandom", &self.tools_random),
            ("toolsExport", &self.tools_export),
            ("toolsReset", &self.tools_reset),
            ("exportPng", &self.export_png),
            ("exportIco", &self.export_ico),
            ("exportJson", &self.export_json),
        ];

        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidConfig(format!("`{}` must not be empty", key)));
            }
        }

        for (name, label) in &self.preset_name_labels {
            if !is_valid_preset_name(name) {
                return Err(CoreError::InvalidConfig(format!(
                    "presetNameLabels key `{}` is not a valid preset name",
                    name
                )));
            }
            if label.trim().is_empty() {
                return Err(CoreError::InvalidConfig(format!(
                    "presetNameLabels `{}` must not be empty",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self> {
        let translations: Self = serde_json::from_str(json)?;
        translations.validate()?;
        Ok(translations)
    }

    /// Display name for a preset: the configured label, else the name with
    /// its first letter upper-cased
    pub fn preset_label(&self, name: &str) -> String {
        if let Some(label) = self.preset_name_labels.get(name) {
            return label.clone();
        }
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Translations for every supported locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleCatalog {
    /// Locale used when nothing better matches
    pub default_locale: String,
    /// Locales a client may ask for
    pub allowed: Vec<String>,
    /// Per-locale text
    pub translations: BTreeMap<String, Translations>,
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self {
            default_locale: "fr".to_string(),
            allowed: vec!["fr".to_string(), "en".to_string(), "es".to_string()],
            translations: BTreeMap::new(),
        }
    }
}

impl LocaleCatalog {
    /// Whether `locale` may be selected
    pub fn is_allowed(&self, locale: &str) -> bool {
        self.allowed.iter().any(|l| l == locale)
    }

    /// Pick a locale: an allowed `query` value first, then an allowed
    /// `preferred` value, then the default
    pub fn negotiate(&self, query: Option<&str>, preferred: Option<&str>) -> String {
        [query, preferred]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|l| self.is_allowed(l))
            .map(str::to_string)
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Text for a locale, English defaults when none is configured
    pub fn translations_for(&self, locale: &str) -> Translations {
        self.translations.get(locale).cloned().unwrap_or_default()
    }

    /// Validate the catalog and every translation set in it
    pub fn validate(&self) -> Result<()> {
        if !self.is_allowed(&self.default_locale) {
            return Err(CoreError::InvalidConfig(format!(
                "default locale `{}` is not in the allowed list",
                self.default_locale
            )));
        }
        for (locale, translations) in &self.translations {
            if !self.is_allowed(locale) {
                return Err(CoreError::InvalidConfig(format!(
                    "translations given for unknown locale `{}`",
                    locale
                )));
            }
            translations.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_english() {
        let t = Translations::from_json_str(r#"{"toolsDraw": "Dessiner"}"#).unwrap();
        assert_eq!(t.tools_draw, "Dessiner");
        assert_eq!(t.tools_eraser, "Eraser");
        assert_eq!(t.error_loading, "Error loading drawing.");
        assert_eq!(t.load_preset, "-- Load Preset --");
    }

    #[test]
    fn test_validation_rejects_empty_labels() {
        let err = Translations::from_json_str(r#"{"exportIco": "  "}"#).unwrap_err();
        assert!(err.to_string().contains("exportIco"));
    }

    #[test]
    fn test_validation_rejects_bad_label_keys() {
        let json = r#"{"presetNameLabels": {"../x": "Nope"}}"#;
        assert!(Translations::from_json_str(json).is_err());
    }

    #[test]
    fn test_preset_label() {
        let mut t = Translations::default();
        t.preset_name_labels
            .insert("mario".to_string(), "Super Mario".to_string());
        assert_eq!(t.preset_label("mario"), "Super Mario");
        assert_eq!(t.preset_label("heart"), "Heart");
        assert_eq!(t.preset_label(""), "");
    }

    #[test]
    fn test_locale_negotiation() {
        let catalog = LocaleCatalog::default();
        assert_eq!(catalog.negotiate(Some("en"), Some("es")), "en");
        assert_eq!(catalog.negotiate(Some("de"), Some("es")), "es");
        assert_eq!(catalog.negotiate(None, Some("xx")), "fr");
        assert_eq!(catalog.negotiate(None, None), "fr");
    }

    #[test]
    fn test_catalog_validation() {
        let mut catalog = LocaleCatalog::default();
        assert!(catalog.validate().is_ok());

        catalog
            .translations
            .insert("de".to_string(), Translations::default());
        assert!(catalog.validate().is_err());

        let catalog = LocaleCatalog {
            default_locale: "it".to_string(),
            ..Default::default()
        };
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_translations_for_unknown_locale_uses_defaults() {
        let catalog = LocaleCatalog::default();
        assert_eq!(catalog.translations_for("en"), Translations::default());
    }
}
