//! `.vga` sprite sheet containers
//!
//! Besides the palette file, `.vga` assets are image containers: a run of
//! images, each introduced by an 8-byte header. Bytes 0-3 are unused, bytes
//! 4-5 are the image height and bytes 6-7 the width (both little-endian),
//! followed by `width * height` palette indices, one byte per pixel.

use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::{Error, Result};

/// Size of the per-image header in bytes.
pub const IMAGE_HEADER_SIZE: usize = 8;

/// A single uncompressed image from a sprite sheet.
#[derive(Debug, Clone)]
pub struct SheetImage {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// `width * height` palette indices, row-major.
    pub indices: Vec<u8>,
}

/// All images of one `.vga` sheet, in file order.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub images: Vec<SheetImage>,
}

impl SpriteSheet {
    /// Read a sprite sheet file from disk.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse sprite sheet data from bytes.
    ///
    /// Images are read sequentially until fewer than a header's worth of
    /// bytes remain; sheets in the wild carry a few bytes of slack at the
    /// end, so a short tail is not an error. Truncated pixel data is.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        let mut images = Vec::new();

        while data.len() - cursor.position() as usize >= IMAGE_HEADER_SIZE {
            let index = images.len();

            // Bytes 0-3 carry no known meaning.
            cursor.read_u32::<LittleEndian>()?;
            let height = cursor.read_u16::<LittleEndian>()?;
            let width = cursor.read_u16::<LittleEndian>()?;

            if width == 0 || height == 0 {
                return Err(Error::InvalidSheetDimensions {
                    index,
                    width,
                    height,
                });
            }

            let needed = width as usize * height as usize;
            let available = data.len() - cursor.position() as usize;
            if available < needed {
                return Err(Error::SheetTruncated {
                    index,
                    needed,
                    available,
                });
            }

            let mut indices = vec![0u8; needed];
            cursor.read_exact(&mut indices)?;
            images.push(SheetImage {
                width,
                height,
                indices,
            });
        }

        if images.is_empty() {
            return Err(Error::EmptySheet);
        }

        tracing::debug!("parsed sprite sheet: {} images", images.len());
        Ok(Self { images })
    }
}
