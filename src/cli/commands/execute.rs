//! Command execution implementations

use super::{Commands, PaletteCommands, SheetCommands};
use super::{decode, palette, sheet, verify};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Decode {
                source,
                palette,
                out,
                trace,
                max_out,
                max_in,
                width,
                scale,
                step,
                quiet,
            } => decode::execute(
                source,
                palette,
                out,
                trace.as_deref(),
                *max_out,
                *max_in,
                *width,
                *scale,
                *step,
                *quiet,
            ),
            Commands::Palette { command } => command.execute(),
            Commands::Sheet { command } => command.execute(),
            Commands::Verify { assets, list } => verify::execute(assets, list),
        }
    }
}

impl PaletteCommands {
    /// Execute the selected palette command.
    ///
    /// # Errors
    /// Returns an error if the underlying palette operation fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            PaletteCommands::Print { source } => palette::print(source),
            PaletteCommands::Sheet {
                source,
                out,
                swatch_size,
                columns,
            } => palette::sheet(source, out, *swatch_size, *columns),
        }
    }
}

impl SheetCommands {
    /// Execute the selected sheet command.
    ///
    /// # Errors
    /// Returns an error if the underlying sheet operation fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            SheetCommands::Convert {
                source,
                palette,
                out,
                per_row,
                scale,
            } => sheet::convert(source, palette, out, *per_row, *scale),
            SheetCommands::Batch {
                source,
                palette,
                out,
                per_row,
                scale,
                quiet,
            } => sheet::batch(source, palette, out, *per_row, *scale, *quiet),
        }
    }
}
