//! Compression utilities
//!
//! The only codec PM2 assets use is the GND run-length/back-reference
//! scheme; see [`gnd`] for the opcode grammar and decoder.

use crate::error::Result;

pub mod gnd;

pub use gnd::{GndDecoder, Trace};

/// Decompress GND data
///
/// # Errors
/// Returns an error if the stream is malformed.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    gnd::decompress(data)
}

/// Decompress GND data while recording a command trace
///
/// # Errors
/// Returns an error if the stream is malformed.
pub fn decompress_traced(data: &[u8]) -> Result<(Vec<u8>, Trace)> {
    let mut trace = Trace::new();
    let out = GndDecoder::new().decode_with_hook(data, &mut trace)?;
    Ok((out, trace))
}
