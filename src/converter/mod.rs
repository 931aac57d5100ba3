//! Decoded assets to standard image formats

pub mod raster;
pub mod sheet_png;

use std::path::Path;

use crate::compression::gnd::GndDecoder;
use crate::error::Result;
use crate::formats::palette::VgaPalette;

pub use raster::{SCREEN_WIDTH, render_indexed, render_palette_swatches, save_image};
pub use sheet_png::{BatchConvertResult, convert_sheet_dir, convert_sheet_file, render_sheet};

/// Decode a GND file and write it as a BMP or PNG image.
///
/// Convenience wrapper for the common decode-then-render pipeline with no
/// budgets or tracing.
///
/// # Errors
/// Returns an error if reading, decoding, or encoding fails.
pub fn convert_gnd_to_image<P: AsRef<Path>, Q: AsRef<Path>>(
    gnd_path: P,
    image_path: Q,
    palette: &VgaPalette,
    width: u32,
    scale: u32,
) -> Result<()> {
    let data = std::fs::read(gnd_path.as_ref())?;
    let indices = GndDecoder::new().decode(&data)?;
    let img = raster::render_indexed(&indices, width, palette, scale)?;
    raster::save_image(&img, image_path)
}
