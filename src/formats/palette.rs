//! VGA palette tables
//!
//! `paldata.vga` holds the shared 256-entry color table for all PM2 assets.
//! The table starts at file offset `0x100` as 256 RGB triplets of 6-bit VGA
//! DAC intensities (0-63); on-screen colors are the intensities scaled by 4.

use std::path::Path;

use crate::error::{Error, Result};

/// File offset the color table starts at.
pub const PALETTE_OFFSET: usize = 0x100;

/// Number of palette entries.
pub const PALETTE_ENTRIES: usize = 256;

/// Multiplier taking a 6-bit VGA DAC intensity to 8-bit.
pub const INTENSITY_SCALE: u8 = 4;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A fully loaded 256-entry palette, already scaled to 8-bit.
#[derive(Debug, Clone)]
pub struct VgaPalette {
    entries: Box<[Rgb; PALETTE_ENTRIES]>,
}

impl VgaPalette {
    /// Load a palette file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::PaletteIncomplete`] if it holds fewer than 768 bytes past
    /// the table offset.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a palette from file bytes, reading the table at
    /// [`PALETTE_OFFSET`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::parse_at(data, PALETTE_OFFSET)
    }

    /// Parse a palette with an explicit table offset.
    pub fn parse_at(data: &[u8], offset: usize) -> Result<Self> {
        let needed = PALETTE_ENTRIES * 3;
        let available = data.len().saturating_sub(offset);
        if available < needed {
            return Err(Error::PaletteIncomplete {
                needed,
                available,
                offset,
            });
        }

        let raw = &data[offset..offset + needed];
        let mut entries = Box::new(
            [Rgb {
                r: 0,
                g: 0,
                b: 0,
            }; PALETTE_ENTRIES],
        );
        for (entry, triplet) in entries.iter_mut().zip(raw.chunks_exact(3)) {
            *entry = Rgb {
                r: triplet[0].saturating_mul(INTENSITY_SCALE),
                g: triplet[1].saturating_mul(INTENSITY_SCALE),
                b: triplet[2].saturating_mul(INTENSITY_SCALE),
            };
        }
        Ok(Self { entries })
    }

    /// Color for a palette index.
    pub fn color(&self, index: u8) -> Rgb {
        self.entries[index as usize]
    }

    /// All 256 entries in index order.
    pub fn entries(&self) -> &[Rgb; PALETTE_ENTRIES] {
        &self.entries
    }
}
