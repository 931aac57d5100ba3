//! CLI command for GND image decoding

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::compression::gnd::{GndDecoder, Step, StepHook, Trace};
use crate::converter::{render_indexed, save_image};
use crate::formats::palette::VgaPalette;

use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, print_done, print_step};

/// Decode a GND stream and write the raster, plus optional trace and
/// per-opcode step frames.
pub fn execute(
    source: &Path,
    palette_path: &Path,
    out: &Path,
    trace_path: Option<&Path>,
    max_out: Option<usize>,
    max_in: Option<usize>,
    width: u32,
    scale: u32,
    step: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 3, LOOKING_GLASS, "Reading GND stream and palette...");
    }
    let data = std::fs::read(source)?;
    let palette = VgaPalette::load(palette_path)?;

    let mut decoder = GndDecoder::new();
    if let Some(pixels) = max_out {
        decoder = decoder.with_output_budget(pixels);
    }
    if let Some(bytes) = max_in {
        decoder = decoder.with_input_budget(bytes);
    }

    if !quiet {
        print_step(2, 3, GEAR, "Decoding opcodes...");
    }

    // Step frames land next to --out, in a directory named after it.
    let frames_dir: Option<PathBuf> = if step {
        let dir = out.with_extension("");
        std::fs::create_dir_all(&dir)?;
        Some(dir)
    } else {
        None
    };
    let frame_ext = out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("bmp")
        .to_string();

    let mut trace = Trace::new();
    let indices = if trace_path.is_some() || step {
        let mut frame = 0usize;
        let mut hook = |s: &Step<'_>| {
            trace.on_step(s);
            if let Some(dir) = &frames_dir {
                if s.label != "TERM" {
                    frame += 1;
                    // Frame output is best-effort; a full disk must not kill
                    // the decode itself.
                    if let Err(err) =
                        write_frame(dir, frame, &frame_ext, s.output, width, &palette, scale)
                    {
                        tracing::warn!("failed to write step frame {frame}: {err}");
                    }
                }
            }
        };
        decoder.decode_with_hook(&data, &mut hook)?
    } else {
        decoder.decode(&data)?
    };

    if !quiet {
        print_step(3, 3, DISK, "Writing image...");
    }
    let img = render_indexed(&indices, width, &palette, scale)?;
    save_image(&img, out)?;
    if let Some(path) = trace_path {
        trace.save(path)?;
    }

    if !quiet {
        println!("Image -> {}", out.display());
        if let Some(path) = trace_path {
            println!("Trace -> {}", path.display());
        }
        if let Some(dir) = &frames_dir {
            println!("Steps -> {}", dir.display());
        }
        print_done(started.elapsed());
    }
    Ok(())
}

fn write_frame(
    dir: &Path,
    frame: usize,
    ext: &str,
    output_so_far: &[u8],
    width: u32,
    palette: &VgaPalette,
    scale: u32,
) -> crate::Result<()> {
    let img = render_indexed(output_so_far, width, palette, scale)?;
    save_image(&img, dir.join(format!("step_{frame:04}.{ext}")))
}
