//! Decode instrumentation: step hooks and command traces
//!
//! The decoder can report every applied opcode to an observer. The observer
//! is purely a side channel; it never influences decode results, and any I/O
//! it performs must swallow its own failures (log and continue) rather than
//! abort the decode.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// One applied opcode, as seen by a [`StepHook`].
///
/// Borrowed views into the decoder state; copy out whatever needs to outlive
/// the callback.
#[derive(Debug)]
pub struct Step<'a> {
    /// 1-based count of opcodes applied so far, terminator included.
    pub index: usize,
    /// Stream offset of the command byte.
    pub offset: usize,
    /// The raw bytes this opcode consumed (command byte included).
    pub raw: &'a [u8],
    /// Opcode label, e.g. `LIT 3` or `COPY8 off=41`.
    pub label: &'a str,
    /// The bytes this opcode appended to the output.
    pub payload: &'a [u8],
    /// The full output accumulated so far, payload included.
    pub output: &'a [u8],
}

/// Observer invoked after each successfully applied opcode.
pub trait StepHook {
    fn on_step(&mut self, step: &Step<'_>);
}

impl<F: FnMut(&Step<'_>)> StepHook for F {
    fn on_step(&mut self, step: &Step<'_>) {
        self(step);
    }
}

/// A recorded trace line.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    /// Stream offset of the command byte.
    pub offset: usize,
    /// Raw bytes consumed.
    pub raw: Vec<u8>,
    /// Opcode label.
    pub label: String,
    /// Payload bytes produced.
    pub payload: Vec<u8>,
}

/// In-memory command trace, usable directly as a [`StepHook`].
#[derive(Debug, Default)]
pub struct Trace {
    entries: Vec<TraceEntry>,
}

/// Payload bytes printed per trace line before the continuation marker.
const PAYLOAD_PREVIEW: usize = 16;

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize the trace in the reference text layout: one line per opcode
    /// with hex offset, raw bytes, label, and up to 16 payload bytes.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{}", format_entry(entry))?;
        }
        Ok(())
    }

    /// Write the trace to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))
    }
}

impl StepHook for Trace {
    fn on_step(&mut self, step: &Step<'_>) {
        self.entries.push(TraceEntry {
            offset: step.offset,
            raw: step.raw.to_vec(),
            label: step.label.to_string(),
            payload: step.payload.to_vec(),
        });
    }
}

fn format_entry(entry: &TraceEntry) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "{:06X}  {:<11}  {:<18} {}",
        entry.offset,
        hex_join(&entry.raw),
        entry.label,
        hex_join(&entry.payload[..entry.payload.len().min(PAYLOAD_PREVIEW)])
    );
    if entry.payload.len() > PAYLOAD_PREVIEW {
        line.push_str(" ...");
    }
    line
}

fn hex_join(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:02X}");
    }
    out
}
