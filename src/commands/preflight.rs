//! Preflight command - runs preflight checks.

use anyhow::Result;

use crate::config::Config;
use crate::layout::InstallLayout;
use crate::preflight;

/// Execute the preflight command.
pub fn cmd_preflight(config: &Config, strict: bool) -> Result<()> {
    let layout = InstallLayout::rooted(&config.destdir);

    if strict {
        preflight::run_preflight_or_fail(config, &layout)?;
    } else {
        let report = preflight::run_preflight(config, &layout);
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail the run.");
        }
    }
    Ok(())
}
