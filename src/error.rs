//! Error types for `pm2kit`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `pm2kit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== GND Decompression Errors ====================
    /// A command byte falls in an unassigned opcode range.
    #[error("unknown opcode 0x{opcode:02X} at stream offset 0x{offset:06X}")]
    UnknownOpcode {
        /// The offending command byte.
        opcode: u8,
        /// Stream offset of the command byte.
        offset: usize,
    },

    /// A back-reference asked for more history than has been produced.
    #[error(
        "back-reference at offset 0x{offset:06X} needs {distance} bytes of history, have {available}"
    )]
    OutOfHistory {
        /// Stream offset of the command byte.
        offset: usize,
        /// Requested back-reference distance.
        distance: usize,
        /// Bytes of history actually available.
        available: usize,
    },

    /// An opcode declares more bytes than the stream still holds.
    #[error("truncated stream at offset 0x{offset:06X}: need {needed} more bytes, have {available}")]
    TruncatedStream {
        /// Stream offset of the command byte.
        offset: usize,
        /// Bytes the opcode still requires.
        needed: usize,
        /// Bytes remaining in the stream.
        available: usize,
    },

    // ==================== VGA Palette Errors ====================
    /// The palette file does not hold a full 256-entry table.
    #[error("palette incomplete: need {needed} bytes from offset 0x{offset:X}, have {available}")]
    PaletteIncomplete {
        /// Bytes required for a full table (256 * 3).
        needed: usize,
        /// Bytes actually available past the table offset.
        available: usize,
        /// File offset the table starts at.
        offset: usize,
    },

    // ==================== Sprite Sheet Errors ====================
    /// A sprite sheet image header declares a zero-sized image.
    #[error("sprite sheet image {index} has invalid dimensions {width}x{height}")]
    InvalidSheetDimensions {
        /// Index of the image within the sheet.
        index: usize,
        /// Declared width in pixels.
        width: u16,
        /// Declared height in pixels.
        height: u16,
    },

    /// A sprite sheet ends before the declared pixel data.
    #[error("sprite sheet truncated in image {index}: need {needed} pixel bytes, have {available}")]
    SheetTruncated {
        /// Index of the image within the sheet.
        index: usize,
        /// Pixel bytes the header declares.
        needed: usize,
        /// Bytes remaining in the file.
        available: usize,
    },

    /// The sprite sheet contains no images.
    #[error("sprite sheet is empty")]
    EmptySheet,

    // ==================== Raster Errors ====================
    /// Raster width must be non-zero.
    #[error("raster width must be non-zero")]
    ZeroRasterWidth,

    /// Raster scale must be at least 1.
    #[error("raster scale must be >= 1")]
    ZeroRasterScale,

    /// Failed to encode an output image.
    #[error("failed to encode {format}: {message}")]
    ImageEncodeFailed {
        /// Target format name ("PNG" or "BMP").
        format: &'static str,
        /// The encoding error message.
        message: String,
    },

    /// The output image extension is not a supported raster format.
    #[error("unsupported output image format: {}", path.display())]
    UnsupportedImageFormat {
        /// The offending output path.
        path: PathBuf,
    },

    // ==================== Hash List Errors ====================
    /// A hash list line is not `<hex-digest> <path>`.
    #[error("malformed hash list entry on line {line}: {content}")]
    MalformedHashEntry {
        /// 1-based line number in the list file.
        line: usize,
        /// The offending line content.
        content: String,
    },

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `pm2kit` operations.
pub type Result<T> = std::result::Result<T, Error>;
