//! CLI progress display utilities
//!
//! Step indicators with emoji prefixes and indicatif styles shared by the
//! subcommands.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Gear - for processing/conversion operations
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Picture - for raster/image operations
pub static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "");
/// Truck - for batch operations
pub static TRUCK: Emoji<'_, '_> = Emoji("🚚 ", "");

// =============================================================================
// Step-Based Progress
// =============================================================================

/// Print a step indicator: `[1/3] 🔍 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

// =============================================================================
// Progress Styles
// =============================================================================

/// Spinner style for indeterminate progress
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold.dim} {spinner} {wide_msg}")
        .expect("valid template")
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

/// Spinner with steady ticking, prefixed `[current/total]`
#[must_use]
pub fn spinner(current: usize, total: usize, msg: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(spinner_style());
    bar.set_prefix(format!("[{current}/{total}]"));
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
