//! CLI command for asset hash verification

use std::path::Path;

use console::style;

use crate::verify::{VerifyStatus, verify_assets};

/// Verify assets against a hash list, printing one line per entry.
pub fn execute(assets: &Path, list: &Path) -> anyhow::Result<()> {
    let report = verify_assets(assets, list)?;

    for outcome in &report.outcomes {
        let shown = outcome.path.display().to_string();
        match &outcome.status {
            VerifyStatus::Pass => {
                println!("{shown:<40}: {}", style("PASS").green());
            }
            VerifyStatus::Fail { actual } => {
                println!(
                    "{shown:<40}: {} (calculated: {actual})",
                    style("FAIL").red()
                );
            }
            VerifyStatus::Missing => {
                println!("{shown:<40}: {}", style("FILE NOT FOUND").yellow());
            }
        }
    }

    println!();
    println!(
        "{} pass, {} fail, {} missing",
        report.passed(),
        report.failed(),
        report.missing()
    );

    if !report.is_clean() {
        anyhow::bail!(
            "verification failed: {} of {} assets did not check out",
            report.failed() + report.missing(),
            report.outcomes.len()
        );
    }
    Ok(())
}
