//! CLI commands for palette operations

use std::path::Path;

use crate::converter::{render_palette_swatches, save_image};
use crate::formats::palette::VgaPalette;

/// Print all 256 palette entries as index and RGB triplet.
pub fn print(source: &Path) -> anyhow::Result<()> {
    let palette = VgaPalette::load(source)?;

    println!("Palette: {}", source.display());
    println!();
    for (index, color) in palette.entries().iter().enumerate() {
        println!("0x{index:02X} : ({}, {}, {})", color.r, color.g, color.b);
    }
    Ok(())
}

/// Render the palette as a swatch grid image.
pub fn sheet(source: &Path, out: &Path, swatch_size: u32, columns: u32) -> anyhow::Result<()> {
    let palette = VgaPalette::load(source)?;
    let img = render_palette_swatches(&palette, swatch_size, columns)?;
    save_image(&img, out)?;
    println!("Palette sheet -> {}", out.display());
    Ok(())
}
