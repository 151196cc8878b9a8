//! JSON document export

use chrono::{NaiveDate, Utc};
use pixart_core::{ArtDocument, Grid, PresetEntry};

use crate::error::Result;

/// Document name for a given day: `pixel-art-YYYY-MM-DD`
pub fn export_name(date: NaiveDate) -> String {
    format!("pixel-art-{}", date.format("%Y-%m-%d"))
}

/// Encode with today's (UTC) dated name
pub fn encode_json(grid: &Grid) -> Result<String> {
    encode_json_named(grid, &export_name(Utc::now().date_naive()))
}

/// Encode as a pretty-printed sparse document
pub fn encode_json_named(grid: &Grid, name: &str) -> Result<String> {
    let document = ArtDocument::from_grid(name, grid);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Decode a sparse document back into a full grid
pub fn decode_json(json: &str) -> Result<Grid> {
    Ok(PresetEntry::from_json_str(json)?.to_grid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixart_core::Color;

    #[test]
    fn test_export_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(export_name(date), "pixel-art-2026-03-07");
    }

    #[test]
    fn test_encoded_document_shape() {
        let mut grid = Grid::new();
        grid.set(17, Some(Color::rgb(0, 0, 255))).unwrap();

        let json = encode_json_named(&grid, "pixel-art-2026-01-01").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "pixel-art-2026-01-01");
        assert_eq!(value["width"], 16);
        assert_eq!(value["height"], 16);
        assert_eq!(
            value["pixels"],
            serde_json::json!([{"row": 1, "col": 1, "color": "#0000FF"}])
        );
    }

    #[test]
    fn test_dated_name_prefix() {
        let json = encode_json(&Grid::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["name"].as_str().unwrap().starts_with("pixel-art-"));
    }
}
