//! Color - CSS color values stored in grid cells
//!
//! Cells accept the color strings a browser hands back (`#RGB`, `#RRGGBB`,
//! `rgb(...)`, `rgba(...)`, `transparent`). Everything is normalized to an
//! opaque sRGB triple and written back out as upper-case `#RRGGBB`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Opaque 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    /// The background color. Empty cells read back as white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Black
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether this color counts as background
    pub fn is_white(&self) -> bool {
        *self == Self::WHITE
    }

    /// Red, green and blue components
    pub fn components(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// RGBA with full opacity, as written into rasters
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Upper-case `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse a color for storage in a cell; background colors become `None`.
    pub fn parse_cell(value: &str) -> Result<Option<Color>> {
        let color: Color = value.parse()?;
        Ok((!color.is_white()).then_some(color))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().to_ascii_lowercase();
        if value.is_empty() {
            return Err(CoreError::InvalidColor(s.to_string()));
        }

        if value == "transparent" {
            return Ok(Color::WHITE);
        }

        if let Some(inner) = functional_body(&value) {
            return parse_functional(inner).ok_or_else(|| CoreError::InvalidColor(s.to_string()));
        }

        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| CoreError::InvalidColor(s.to_string()))?;
        let digits = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(CoreError::InvalidColor(s.to_string())),
        };

        match hex::decode(digits).as_deref() {
            Ok([r, g, b]) => Ok(Color::rgb(*r, *g, *b)),
            _ => Err(CoreError::InvalidColor(s.to_string())),
        }
    }
}

/// Body of `rgb(...)` / `rgba(...)`
fn functional_body(value: &str) -> Option<&str> {
    let rest = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))?;
    rest.strip_suffix(')')
}

fn parse_functional(inner: &str) -> Option<Color> {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |part: &str| -> Option<u8> {
        let v: f32 = part.parse().ok()?;
        if !v.is_finite() {
            return None;
        }
        Some(v.round().clamp(0.0, 255.0) as u8)
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;

    if let Some(alpha) = parts.get(3) {
        let a: f32 = alpha.parse().ok()?;
        // Fully transparent cells show the page background
        if a <= 0.0 {
            return Some(Color::WHITE);
        }
    }

    Some(Color::rgb(r, g, b))
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
