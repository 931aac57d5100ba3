//! CLI command definitions

pub mod decode;
mod execute;
pub mod palette;
pub mod sheet;
pub mod verify;

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a GND image to BMP or PNG
    Decode {
        /// Source GND file
        #[arg(short, long)]
        source: PathBuf,

        /// VGA palette file (paldata.vga)
        #[arg(short, long)]
        palette: PathBuf,

        /// Output image (format from extension: .bmp or .png)
        #[arg(short, long, default_value = "out.bmp")]
        out: PathBuf,

        /// Write an opcode trace to this file
        #[arg(long)]
        trace: Option<PathBuf>,

        /// Stop after this many output pixels
        #[arg(long, value_name = "PIX")]
        max_out: Option<usize>,

        /// Stop after this many source bytes
        #[arg(long, value_name = "BYTES")]
        max_in: Option<usize>,

        /// Row width in pixels
        #[arg(long, default_value_t = 320)]
        width: u32,

        /// Integer zoom factor >= 1
        #[arg(long, default_value_t = 1)]
        scale: u32,

        /// Dump an incremental image after every opcode
        #[arg(long)]
        step: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Inspect or render the shared VGA palette
    Palette {
        #[command(subcommand)]
        command: PaletteCommands,
    },

    /// Convert VGA sprite sheets to images
    Sheet {
        #[command(subcommand)]
        command: SheetCommands,
    },

    /// Verify assets against an MD5 hash list
    Verify {
        /// Directory holding the assets
        #[arg(short, long)]
        assets: PathBuf,

        /// Hash list file (`<md5> <relative path>` per line)
        #[arg(short, long)]
        list: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum PaletteCommands {
    /// Print all 256 entries as index and RGB
    Print {
        /// VGA palette file
        #[arg(short, long)]
        source: PathBuf,
    },

    /// Render the palette as a swatch grid image
    Sheet {
        /// VGA palette file
        #[arg(short, long)]
        source: PathBuf,

        /// Output image (.bmp or .png)
        #[arg(short, long, default_value = "palette.png")]
        out: PathBuf,

        /// Size of each color swatch in pixels
        #[arg(long, default_value_t = 40)]
        swatch_size: u32,

        /// Number of swatches per row
        #[arg(long, default_value_t = 16)]
        columns: u32,
    },
}

#[derive(Subcommand)]
pub enum SheetCommands {
    /// Convert one sprite sheet to a merged grid image
    Convert {
        /// Source .vga sheet
        #[arg(short, long)]
        source: PathBuf,

        /// VGA palette file
        #[arg(short, long)]
        palette: PathBuf,

        /// Output image (.bmp or .png)
        #[arg(short, long)]
        out: PathBuf,

        /// Sheet images per output row
        #[arg(long, default_value_t = 5)]
        per_row: usize,

        /// Integer zoom factor >= 1
        #[arg(long, default_value_t = 1)]
        scale: u32,
    },

    /// Convert every .vga sheet in a directory
    Batch {
        /// Directory to scan for .vga sheets
        #[arg(short, long)]
        source: PathBuf,

        /// VGA palette file
        #[arg(short, long)]
        palette: PathBuf,

        /// Output directory for PNG files
        #[arg(short, long)]
        out: PathBuf,

        /// Sheet images per output row
        #[arg(long, default_value_t = 5)]
        per_row: usize,

        /// Integer zoom factor >= 1
        #[arg(long, default_value_t = 1)]
        scale: u32,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}
