//! Indexed pixels to raster images
//!
//! Maps decoded palette indices through a [`VgaPalette`] into an RGBA image
//! and serializes it as BMP (the original tooling's output) or PNG.

use std::io::Cursor;
use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::formats::palette::{PALETTE_ENTRIES, VgaPalette};

/// Fixed row width of full-screen GND images.
pub const SCREEN_WIDTH: u32 = 320;

/// Render palette indices as an RGBA image.
///
/// One output row is produced per `width` indices; a short final row is
/// padded with fully transparent pixels. Each source pixel is replicated
/// `scale * scale` times.
///
/// # Errors
/// Returns an error if `width` or `scale` is zero.
pub fn render_indexed(
    indices: &[u8],
    width: u32,
    palette: &VgaPalette,
    scale: u32,
) -> Result<RgbaImage> {
    if width == 0 {
        return Err(Error::ZeroRasterWidth);
    }
    if scale == 0 {
        return Err(Error::ZeroRasterScale);
    }

    let height = (indices.len() as u32).div_ceil(width);
    // Zero-initialized means transparent; only real pixels get painted.
    let mut img = RgbaImage::new(width * scale, height * scale);

    for (i, &index) in indices.iter().enumerate() {
        let x = (i as u32 % width) * scale;
        let y = (i as u32 / width) * scale;
        let color = palette.color(index);
        let pixel = Rgba([color.r, color.g, color.b, 255]);
        for sy in 0..scale {
            for sx in 0..scale {
                img.put_pixel(x + sx, y + sy, pixel);
            }
        }
    }

    Ok(img)
}

/// Render the palette itself as a swatch grid, `columns` entries per row.
///
/// # Errors
/// Returns an error if `swatch_size` or `columns` is zero.
pub fn render_palette_swatches(
    palette: &VgaPalette,
    swatch_size: u32,
    columns: u32,
) -> Result<RgbaImage> {
    if columns == 0 {
        return Err(Error::ZeroRasterWidth);
    }
    if swatch_size == 0 {
        return Err(Error::ZeroRasterScale);
    }

    let rows = (PALETTE_ENTRIES as u32).div_ceil(columns);
    let mut img = RgbaImage::new(columns * swatch_size, rows * swatch_size);

    for (index, color) in palette.entries().iter().enumerate() {
        let x0 = (index as u32 % columns) * swatch_size;
        let y0 = (index as u32 / columns) * swatch_size;
        let pixel = Rgba([color.r, color.g, color.b, 255]);
        for dy in 0..swatch_size {
            for dx in 0..swatch_size {
                img.put_pixel(x0 + dx, y0 + dy, pixel);
            }
        }
    }

    Ok(img)
}

/// Encode an image as PNG bytes.
pub fn to_png_bytes(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut data);
    img.write_with_encoder(encoder)
        .map_err(|e| Error::ImageEncodeFailed {
            format: "PNG",
            message: e.to_string(),
        })?;
    Ok(data)
}

/// Encode an image as 32-bit BMP bytes.
pub fn to_bmp_bytes(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    let encoder = image::codecs::bmp::BmpEncoder::new(&mut cursor);
    img.write_with_encoder(encoder)
        .map_err(|e| Error::ImageEncodeFailed {
            format: "BMP",
            message: e.to_string(),
        })?;
    Ok(cursor.into_inner())
}

/// Write an image to disk, picking BMP or PNG from the file extension.
pub fn save_image<P: AsRef<Path>>(img: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    let bytes = match ext.as_deref() {
        Some("bmp") => to_bmp_bytes(img)?,
        Some("png") => to_png_bytes(img)?,
        _ => {
            return Err(Error::UnsupportedImageFormat {
                path: path.to_path_buf(),
            });
        }
    };
    std::fs::write(path, bytes)?;
    Ok(())
}
