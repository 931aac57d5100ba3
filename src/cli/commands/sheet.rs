//! CLI commands for sprite sheet conversion

use std::path::Path;
use std::time::Instant;

use console::style;

use crate::cli::progress::{TRUCK, print_done, print_step, spinner};
use crate::converter::{convert_sheet_dir, convert_sheet_file};
use crate::formats::palette::VgaPalette;

/// Convert one sheet to a merged grid image.
pub fn convert(
    source: &Path,
    palette_path: &Path,
    out: &Path,
    per_row: usize,
    scale: u32,
) -> anyhow::Result<()> {
    let palette = VgaPalette::load(palette_path)?;
    convert_sheet_file(source, out, &palette, per_row, scale)?;
    println!("Sheet -> {}", out.display());
    Ok(())
}

/// Convert every .vga sheet under a directory.
pub fn batch(
    source: &Path,
    palette_path: &Path,
    out: &Path,
    per_row: usize,
    scale: u32,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let palette = VgaPalette::load(palette_path)?;

    if !quiet {
        print_step(1, 2, TRUCK, "Converting sheets...");
    }
    let bar = if quiet {
        None
    } else {
        Some(spinner(1, 2, &format!("scanning {}", source.display())))
    };
    let result = convert_sheet_dir(source, out, &palette, per_row, scale)?;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    if !quiet {
        print_step(2, 2, TRUCK, "Summary");
        println!("  converted: {}", result.converted.len());
        for (path, message) in &result.failed {
            println!(
                "  {} {}: {}",
                style("skipped").yellow(),
                path.display(),
                message
            );
        }
        print_done(started.elapsed());
    }
    Ok(())
}
