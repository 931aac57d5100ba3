//! GND compressed image stream decompression
//!
//! `.gnd` assets hold run-length/back-reference compressed streams of
//! palette indices. The decoder is a byte-oriented state machine: each
//! command byte selects one of six opcode families (see [`Opcode`]) which
//! either copy literal bytes from the stream, expand a repeated value, or
//! re-read previously decoded bytes from a 4096-byte sliding window.
//!
//! Decoding stops on the `0x00` terminator, on an optional output/input
//! budget (a success producing partial output), or on a fatal error
//! (unknown opcode, truncated stream, or a back-reference past the start
//! of the produced output).
//!
//! ```no_run
//! use pm2kit::compression::gnd;
//!
//! let data = std::fs::read("pitch.gnd")?;
//! let indices = gnd::decompress(&data)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod history;
mod opcode;
mod trace;

pub use history::{History, WINDOW_SIZE};
pub use opcode::{
    COPY2_BIAS, COPY3_BIAS, LONG_REPEAT_BIAS, Opcode, ParsedOpcode, SHORT_REPEAT_BIAS, TERMINATOR,
};
pub use trace::{Step, StepHook, Trace, TraceEntry};

use crate::error::{Error, Result};

/// Decompress a full GND stream with no budgets or instrumentation.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    GndDecoder::new().decode(data)
}

/// Configurable GND stream decoder.
///
/// Each call to [`decode`](Self::decode) owns its own history window and
/// output buffer; a `GndDecoder` is just the budget configuration and can be
/// reused freely, including from multiple threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GndDecoder {
    max_output: Option<usize>,
    max_input: Option<usize>,
}

impl GndDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop (successfully) once at least `bytes` output bytes exist.
    ///
    /// Checked between opcodes; the opcode in flight finishes, so the output
    /// may overshoot by one payload.
    #[must_use]
    pub fn with_output_budget(mut self, bytes: usize) -> Self {
        self.max_output = Some(bytes);
        self
    }

    /// Stop (successfully) once the read position reaches `bytes`.
    #[must_use]
    pub fn with_input_budget(mut self, bytes: usize) -> Self {
        self.max_input = Some(bytes);
        self
    }

    /// Decode `src`, returning the accumulated palette indices.
    pub fn decode(&self, src: &[u8]) -> Result<Vec<u8>> {
        self.run(src, None)
    }

    /// Decode `src`, reporting each applied opcode to `hook`.
    ///
    /// The hook is observational only: it sees the step metadata and the
    /// output produced so far, and cannot alter the decode. Use a
    /// [`Trace`] as the hook to record a command trace.
    pub fn decode_with_hook(&self, src: &[u8], hook: &mut dyn StepHook) -> Result<Vec<u8>> {
        self.run(src, Some(hook))
    }

    fn run(&self, src: &[u8], mut hook: Option<&mut dyn StepHook>) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let mut hist = History::new();
        let mut pos = 0;
        let mut steps = 0;

        while pos < src.len() {
            if src[pos] == TERMINATOR {
                steps += 1;
                if let Some(h) = hook.as_deref_mut() {
                    h.on_step(&Step {
                        index: steps,
                        offset: pos,
                        raw: &src[pos..=pos],
                        label: "TERM",
                        payload: &[],
                        output: &out,
                    });
                }
                break;
            }
            if self.max_input.is_some_and(|budget| pos >= budget) {
                break;
            }
            if self.max_output.is_some_and(|budget| out.len() >= budget) {
                break;
            }

            let parsed = Opcode::parse(src, pos)?;
            let produced_from = out.len();
            apply(parsed.op, src, pos, &mut hist, &mut out)?;

            steps += 1;
            if let Some(h) = hook.as_deref_mut() {
                let label = parsed.op.label();
                h.on_step(&Step {
                    index: steps,
                    offset: pos,
                    raw: &src[pos..pos + parsed.consumed],
                    label: &label,
                    payload: &out[produced_from..],
                    output: &out,
                });
            }
            pos += parsed.consumed;
        }

        tracing::debug!(
            "GND decompression: {} -> {} bytes ({} opcodes)",
            src.len(),
            out.len(),
            steps
        );
        Ok(out)
    }
}

/// Apply one opcode: append its payload to `out` and mirror it into `hist`.
fn apply(op: Opcode, src: &[u8], pos: usize, hist: &mut History, out: &mut Vec<u8>) -> Result<()> {
    match op {
        Opcode::Terminator => {}
        Opcode::Literal { len } => {
            for &byte in &src[pos + 1..pos + 1 + len] {
                hist.push(byte);
                out.push(byte);
            }
        }
        Opcode::ShortRepeat { len, value } | Opcode::LongRepeat { len, value } => {
            out.reserve(len);
            for _ in 0..len {
                hist.push(value);
                out.push(value);
            }
        }
        Opcode::Copy2 { distance } => copy_back(hist, out, distance, 2, pos)?,
        Opcode::Copy3 { distance } => copy_back(hist, out, distance, 3, pos)?,
        Opcode::LongCopy { len, distance } => copy_back(hist, out, distance, len, pos)?,
    }
    Ok(())
}

/// Copy `len` bytes from history at a constant back-reference distance.
///
/// Each byte is pushed into the window before the next read, so a copy can
/// observe bytes it produced itself earlier in the same opcode.
fn copy_back(
    hist: &mut History,
    out: &mut Vec<u8>,
    distance: usize,
    len: usize,
    offset: usize,
) -> Result<()> {
    for _ in 0..len {
        let byte = hist.read_back(distance).ok_or(Error::OutOfHistory {
            offset,
            distance,
            available: hist.len(),
        })?;
        hist.push(byte);
        out.push(byte);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_literal_then_terminator() {
        let out = decompress(&[0x03, 0x10, 0x20, 0x30, 0x00]).unwrap();
        assert_eq!(out, vec![0x10, 0x20, 0x30]);
    }

    #[test]
    fn test_short_repeat() {
        let out = decompress(&[0x41, 0x05, 0x00]).unwrap();
        assert_eq!(out, vec![0x05, 0x05, 0x05, 0x05]);
    }

    #[test]
    fn test_long_repeat() {
        let out = decompress(&[0x60, 0x00, 0x07, 0x00]).unwrap();
        assert_eq!(out, vec![0x07; 36]);
    }

    #[test]
    fn test_copy2_reads_recent_history() {
        // Literal 0x0A 0x0B, then copy-2 at distance 2.
        let out = decompress(&[0x02, 0x0A, 0x0B, 0x80, 0x00]).unwrap();
        assert_eq!(out, vec![0x0A, 0x0B, 0x0A, 0x0B]);
    }

    #[test]
    fn test_copy3() {
        let out = decompress(&[0x03, 0x01, 0x02, 0x03, 0xA0, 0x00]).unwrap();
        assert_eq!(out, vec![0x01, 0x02, 0x03, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn test_long_copy_adjacent() {
        // Four literals, then 0xC0/offset 0: length 4 at distance 4.
        let out = decompress(&[0x04, 0x11, 0x22, 0x33, 0x44, 0xC0, 0x00, 0x00]).unwrap();
        assert_eq!(out, vec![0x11, 0x22, 0x33, 0x44, 0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn test_terminator_only() {
        let out = decompress(&[0x00]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let out = decompress(&[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_copy_without_history_fails() {
        let err = decompress(&[0x80]).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfHistory {
                offset: 0,
                distance: 2,
                available: 0,
            }
        ));
    }

    #[test]
    fn test_copy_distance_exceeding_partial_history_fails() {
        // One byte of history, copy-3 wants distance 3.
        let err = decompress(&[0x01, 0xAA, 0xA0]).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfHistory {
                offset: 2,
                distance: 3,
                available: 1,
            }
        ));
    }

    #[test]
    fn test_truncated_literal_fails() {
        let err = decompress(&[0x05, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, Error::TruncatedStream { offset: 0, .. }));
    }

    #[test]
    fn test_unknown_opcode_fails_with_offset() {
        let err = decompress(&[0x01, 0xAA, 0x25]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownOpcode {
                opcode: 0x25,
                offset: 2,
            }
        ));
    }

    #[test]
    fn test_output_budget_stops_successfully() {
        let src = [0x41, 0x05, 0x41, 0x06, 0x00];
        let out = GndDecoder::new()
            .with_output_budget(3)
            .decode(&src)
            .unwrap();
        // Budget is checked between opcodes; the first repeat overshoots it.
        assert_eq!(out, vec![0x05, 0x05, 0x05, 0x05]);
    }

    #[test]
    fn test_input_budget_stops_successfully() {
        let src = [0x41, 0x05, 0x41, 0x06, 0x00];
        let out = GndDecoder::new().with_input_budget(2).decode(&src).unwrap();
        assert_eq!(out, vec![0x05, 0x05, 0x05, 0x05]);
    }

    #[test]
    fn test_budget_skips_garbage_tail() {
        // The unknown opcode sits past the input budget and is never reached.
        let src = [0x41, 0x05, 0x25];
        let out = GndDecoder::new().with_input_budget(2).decode(&src).unwrap();
        assert_eq!(out, vec![0x05, 0x05, 0x05, 0x05]);
    }

    #[test]
    fn test_trace_records_labels_and_offsets() {
        let src = [0x03, 0x10, 0x20, 0x30, 0x80, 0x00];
        let mut trace = Trace::new();
        let out = GndDecoder::new()
            .decode_with_hook(&src, &mut trace)
            .unwrap();
        assert_eq!(out, vec![0x10, 0x20, 0x30, 0x20, 0x30]);

        let entries = trace.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "LIT 3");
        assert_eq!(entries[0].offset, 0);
        assert_eq!(entries[0].raw, vec![0x03, 0x10, 0x20, 0x30]);
        assert_eq!(entries[1].label, "SHRT_CPY2 off=2");
        assert_eq!(entries[1].offset, 4);
        assert_eq!(entries[1].payload, vec![0x20, 0x30]);
        assert_eq!(entries[2].label, "TERM");
        assert_eq!(entries[2].offset, 5);
        assert!(entries[2].payload.is_empty());
    }

    #[test]
    fn test_hook_sees_growing_output() {
        let src = [0x01, 0xAA, 0x01, 0xBB, 0x00];
        let mut sizes = Vec::new();
        let mut hook = |step: &Step<'_>| sizes.push((step.index, step.output.len()));
        GndDecoder::new().decode_with_hook(&src, &mut hook).unwrap();
        assert_eq!(sizes, vec![(1, 1), (2, 2), (3, 2)]);
    }

    #[test]
    fn test_decode_is_deterministic() {
        let src = [
            0x04, 0x01, 0x02, 0x03, 0x04, 0x42, 0x09, 0xC0, 0x03, 0x80, 0xA1, 0x00,
        ];
        let mut trace_a = Trace::new();
        let mut trace_b = Trace::new();
        let decoder = GndDecoder::new();
        let a = decoder.decode_with_hook(&src, &mut trace_a).unwrap();
        let b = decoder.decode_with_hook(&src, &mut trace_b).unwrap();
        assert_eq!(a, b);
        let mut rendered_a = Vec::new();
        let mut rendered_b = Vec::new();
        trace_a.write_to(&mut rendered_a).unwrap();
        trace_b.write_to(&mut rendered_b).unwrap();
        assert_eq!(rendered_a, rendered_b);
    }

    #[test]
    fn test_stream_without_terminator_decodes_fully() {
        let out = decompress(&[0x02, 0x55, 0x66]).unwrap();
        assert_eq!(out, vec![0x55, 0x66]);
    }
}
