//! PM2 file format parsers

pub mod palette;
pub mod sheet;

pub use palette::{Rgb, VgaPalette};
pub use sheet::{SheetImage, SpriteSheet};
