//! Sprite sheet to image conversion
//!
//! Renders every image of a `.vga` sheet into one merged grid picture, and
//! batch-converts whole asset directories in parallel.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::converter::raster::{render_indexed, save_image};
use crate::error::{Error, Result};
use crate::formats::palette::VgaPalette;
use crate::formats::sheet::SpriteSheet;

/// Grid width the original tooling used when merging sheet images.
pub const DEFAULT_IMAGES_PER_ROW: usize = 5;

/// Render a sheet's images as one grid image, `images_per_row` per row.
///
/// Grid cells are sized to the largest image in the sheet; smaller images
/// leave their cell remainder transparent.
pub fn render_sheet(
    sheet: &SpriteSheet,
    palette: &VgaPalette,
    images_per_row: usize,
    scale: u32,
) -> Result<RgbaImage> {
    if images_per_row == 0 {
        return Err(Error::ZeroRasterWidth);
    }
    if scale == 0 {
        return Err(Error::ZeroRasterScale);
    }

    let per_row = images_per_row.min(sheet.images.len());
    let cell_w = sheet
        .images
        .iter()
        .map(|img| u32::from(img.width))
        .max()
        .ok_or(Error::EmptySheet)?;
    let cell_h = sheet
        .images
        .iter()
        .map(|img| u32::from(img.height))
        .max()
        .unwrap_or(0);
    let rows = sheet.images.len().div_ceil(per_row) as u32;

    let mut merged = RgbaImage::new(
        cell_w * per_row as u32 * scale,
        cell_h * rows * scale,
    );

    for (i, sprite) in sheet.images.iter().enumerate() {
        let cell_x = (i % per_row) as u32 * cell_w * scale;
        let cell_y = (i / per_row) as u32 * cell_h * scale;
        let rendered = render_indexed(&sprite.indices, u32::from(sprite.width), palette, scale)?;
        image::imageops::overlay(&mut merged, &rendered, i64::from(cell_x), i64::from(cell_y));
    }

    Ok(merged)
}

/// Convert one sheet file to an image file (format from the extension).
pub fn convert_sheet_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    destination: Q,
    palette: &VgaPalette,
    images_per_row: usize,
    scale: u32,
) -> Result<()> {
    let sheet = SpriteSheet::read(source)?;
    let merged = render_sheet(&sheet, palette, images_per_row, scale)?;
    save_image(&merged, destination)
}

/// Outcome of a batch sheet conversion.
#[derive(Debug, Default)]
pub struct BatchConvertResult {
    /// Destination files written.
    pub converted: Vec<PathBuf>,
    /// Source files that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

/// Convert every `.vga` sheet under `source_dir` to a PNG in `out_dir`.
///
/// Files that do not parse as sprite sheets (the palette file itself, for
/// one) are reported in [`BatchConvertResult::failed`] without aborting the
/// rest of the batch. Conversion runs in parallel.
pub fn convert_sheet_dir<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    out_dir: Q,
    palette: &VgaPalette,
    images_per_row: usize,
    scale: u32,
) -> Result<BatchConvertResult> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;

    let mut sources = Vec::new();
    for entry in WalkDir::new(source_dir.as_ref()) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("vga"))
        {
            sources.push(entry.path().to_path_buf());
        }
    }
    sources.sort();

    let outcomes: Vec<_> = sources
        .par_iter()
        .map(|source| -> Result<PathBuf> {
            let stem = source
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::InvalidPath(source.display().to_string()))?;
            let destination = out_dir.join(format!("{stem}.png"));
            convert_sheet_file(source, &destination, palette, images_per_row, scale)?;
            Ok(destination)
        })
        .collect();

    let mut result = BatchConvertResult::default();
    for (source, outcome) in sources.into_iter().zip(outcomes) {
        match outcome {
            Ok(destination) => result.converted.push(destination),
            Err(err) => result.failed.push((source, err.to_string())),
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::palette::{PALETTE_ENTRIES, PALETTE_OFFSET};

    fn test_palette() -> VgaPalette {
        let mut data = vec![0u8; PALETTE_OFFSET];
        for i in 0..PALETTE_ENTRIES {
            let v = (i % 64) as u8;
            data.extend_from_slice(&[v, v, v]);
        }
        VgaPalette::parse(&data).unwrap()
    }

    fn sheet_bytes(images: &[(u16, u16, u8)]) -> Vec<u8> {
        let mut data = Vec::new();
        for &(w, h, fill) in images {
            data.extend_from_slice(&[0, 0, 0, 0]);
            data.extend_from_slice(&h.to_le_bytes());
            data.extend_from_slice(&w.to_le_bytes());
            data.extend(std::iter::repeat_n(fill, w as usize * h as usize));
        }
        data
    }

    #[test]
    fn test_render_sheet_grid() {
        let sheet = SpriteSheet::parse(&sheet_bytes(&[(2, 2, 1), (2, 2, 2), (2, 2, 3)])).unwrap();
        let palette = test_palette();
        let img = render_sheet(&sheet, &palette, 2, 1).unwrap();
        // Two columns, two rows of 2x2 cells.
        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0, [4, 4, 4, 255]);
        assert_eq!(img.get_pixel(2, 0).0, [8, 8, 8, 255]);
        assert_eq!(img.get_pixel(0, 2).0, [12, 12, 12, 255]);
        // Unused cell stays transparent.
        assert_eq!(img.get_pixel(3, 3).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_row_clamped_to_image_count() {
        let sheet = SpriteSheet::parse(&sheet_bytes(&[(2, 1, 1)])).unwrap();
        let palette = test_palette();
        let img = render_sheet(&sheet, &palette, 5, 1).unwrap();
        assert_eq!(img.dimensions(), (2, 1));
    }

    #[test]
    fn test_batch_converts_directory() {
        let palette = test_palette();
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("icons.vga"), sheet_bytes(&[(2, 2, 1)])).unwrap();
        std::fs::write(src.path().join("bogus.vga"), [0u8; 4]).unwrap();
        std::fs::write(src.path().join("readme.txt"), b"not a sheet").unwrap();

        let result = convert_sheet_dir(src.path(), dst.path(), &palette, 5, 1).unwrap();
        assert_eq!(result.converted.len(), 1);
        assert!(result.converted[0].ends_with("icons.png"));
        assert!(dst.path().join("icons.png").exists());
        assert_eq!(result.failed.len(), 1);
        assert!(result.failed[0].0.ends_with("bogus.vga"));
    }
}
