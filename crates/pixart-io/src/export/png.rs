//! PNG raster export

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, Rgba, RgbaImage};
use pixart_core::{Grid, GRID_HEIGHT, GRID_WIDTH};

use crate::error::Result;

/// Cell size of the PNG export (512x512 image)
pub const PNG_CELL_SIZE: u32 = 32;

/// Cell size of the raster embedded in ICO files (256x256 image)
pub const ICO_CELL_SIZE: u32 = 16;

/// Draw every cell as a solid `cell_size` square, row-major
pub fn render_grid(grid: &Grid, cell_size: u32) -> RgbaImage {
    let cell_size = cell_size.max(1);
    let width = GRID_WIDTH as u32 * cell_size;
    let height = GRID_HEIGHT as u32 * cell_size;

    RgbaImage::from_fn(width, height, |x, y| {
        let row = (y / cell_size) as usize;
        let col = (x / cell_size) as usize;
        Rgba(grid.pixel(row, col).to_rgba())
    })
}

/// Render and encode as PNG
pub fn encode_png(grid: &Grid, cell_size: u32) -> Result<Vec<u8>> {
    let image = render_grid(grid, cell_size);
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}
