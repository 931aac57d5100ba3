//! # pm2kit
//!
//! A pure-Rust library for working with Premier Manager 2 asset files.
//!
//! ## Supported Formats
//!
//! - **GND streams** - Run-length/back-reference compressed full-screen images
//! - **VGA palettes** - The shared 256-entry 6-bit color table
//! - **VGA sprite sheets** - Uncompressed font and icon containers
//! - **Hash lists** - MD5 asset integrity manifests
//!
//! ## Quick Start
//!
//! ### Decoding a GND image
//!
//! ```no_run
//! use pm2kit::compression::gnd;
//! use pm2kit::converter;
//! use pm2kit::formats::palette::VgaPalette;
//!
//! let palette = VgaPalette::load("paldata.vga")?;
//! let indices = gnd::decompress(&std::fs::read("pitch.gnd")?)?;
//! let img = converter::render_indexed(&indices, converter::SCREEN_WIDTH, &palette, 1)?;
//! converter::save_image(&img, "pitch.bmp")?;
//! # Ok::<(), pm2kit::Error>(())
//! ```
//!
//! ### Tracing a decode
//!
//! ```no_run
//! use pm2kit::compression::gnd::{GndDecoder, Trace};
//!
//! let data = std::fs::read("pitch.gnd")?;
//! let mut trace = Trace::new();
//! let indices = GndDecoder::new().decode_with_hook(&data, &mut trace)?;
//! trace.save("pitch.trace.txt")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use pm2kit::prelude::*;
//!
//! // Now you have access to:
//! // - GndDecoder, Trace, decompress
//! // - VgaPalette, SpriteSheet
//! // - Error, Result, and more
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `pm2kit` command-line binary

pub mod compression;
pub mod converter;
pub mod error;
pub mod formats;
pub mod verify;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::compression::gnd::{GndDecoder, Step, StepHook, Trace, decompress};
    pub use crate::formats::palette::{Rgb, VgaPalette};
    pub use crate::formats::sheet::{SheetImage, SpriteSheet};

    pub use crate::converter::{
        self, SCREEN_WIDTH, convert_gnd_to_image, convert_sheet_dir, convert_sheet_file,
        render_indexed, render_palette_swatches, render_sheet, save_image,
    };

    pub use crate::verify::{VerifyReport, VerifyStatus, verify_assets};
}
