//! ICO container export
//!
//! Layout (all fields little-endian):
//!
//! | offset | size | field                                   |
//! |--------|------|-----------------------------------------|
//! | 0      | 2    | reserved, 0                             |
//! | 2      | 2    | type, 1 = icon                          |
//! | 4      | 2    | image count, 1                          |
//! | 6      | 1    | width (0 = 256)                         |
//! | 7      | 1    | height (0 = 256)                        |
//! | 8      | 1    | palette size, 0                         |
//! | 9      | 1    | reserved, 0                             |
//! | 10     | 2    | color planes, 1                         |
//! | 12     | 2    | bits per pixel, 32                      |
//! | 14     | 4    | image data size                         |
//! | 18     | 4    | image data offset, 22                   |
//! | 22     | n    | PNG bytes                               |

use pixart_core::{Grid, GRID_HEIGHT, GRID_WIDTH};

use super::png::{encode_png, ICO_CELL_SIZE};
use crate::error::{IoError, Result};

const HEADER_LEN: usize = 6;
const DIR_ENTRY_LEN: usize = 16;

/// Offset of the embedded image data
pub const ICO_DATA_OFFSET: u32 = (HEADER_LEN + DIR_ENTRY_LEN) as u32;

fn dimension_byte(px: u32) -> u8 {
    if px == 256 {
        0
    } else {
        px.min(255) as u8
    }
}

/// Wrap PNG bytes of a `width` x `height` image in a single-image ICO file
pub fn wrap_png_in_ico(png: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let size = u32::try_from(png.len()).map_err(|_| IoError::PayloadTooLarge(png.len()))?;

    let mut ico = Vec::with_capacity(ICO_DATA_OFFSET as usize + png.len());

    ico.extend_from_slice(&0u16.to_le_bytes());
    ico.extend_from_slice(&1u16.to_le_bytes());
    ico.extend_from_slice(&1u16.to_le_bytes());

    ico.push(dimension_byte(width));
    ico.push(dimension_byte(height));
    ico.push(0);
    ico.push(0);
    ico.extend_from_slice(&1u16.to_le_bytes());
    ico.extend_from_slice(&32u16.to_le_bytes());
    ico.extend_from_slice(&size.to_le_bytes());
    ico.extend_from_slice(&ICO_DATA_OFFSET.to_le_bytes());

    ico.extend_from_slice(png);
    Ok(ico)
}

/// Render the grid at the icon cell size and wrap it
pub fn encode_ico(grid: &Grid) -> Result<Vec<u8>> {
    let png = encode_png(grid, ICO_CELL_SIZE)?;
    wrap_png_in_ico(
        &png,
        GRID_WIDTH as u32 * ICO_CELL_SIZE,
        GRID_HEIGHT as u32 * ICO_CELL_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_bytes() {
        let ico = wrap_png_in_ico(&[0xAA, 0xBB, 0xCC], 256, 256).unwrap();
        assert_eq!(
            ico,
            vec![
                0, 0, 1, 0, 1, 0, // header
                0, 0, 0, 0, 1, 0, 32, 0, // dims, palette, reserved, planes, bpp
                3, 0, 0, 0, // size
                22, 0, 0, 0, // offset
                0xAA, 0xBB, 0xCC,
            ]
        );
    }

    #[test]
    fn test_dimension_clamping() {
        assert_eq!(dimension_byte(256), 0);
        assert_eq!(dimension_byte(16), 16);
        assert_eq!(dimension_byte(255), 255);
        assert_eq!(dimension_byte(512), 255);

        let ico = wrap_png_in_ico(&[], 512, 32).unwrap();
        assert_eq!(ico[6], 255);
        assert_eq!(ico[7], 32);
        assert_eq!(ico.len(), 22);
    }
}
