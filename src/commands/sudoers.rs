//! Sudoers command - reconcile the privilege rules only.

use anyhow::{bail, Result};

use crate::config::Config;
use crate::layout::InstallLayout;
use crate::privilege::Capability;
use crate::sudoers::{self, Visudo};

/// Execute the sudoers command.
pub fn cmd_sudoers(config: &Config) -> Result<()> {
    let layout = InstallLayout::rooted(&config.destdir);
    run_reconcile(config, &layout)
}

/// Reconcile the configured rules against the layout's policy store,
/// print the per-rule report, and fail if anything was rejected.
pub fn run_reconcile(config: &Config, layout: &InstallLayout) -> Result<()> {
    println!("Reconciling sudoers rules...");

    let rules = sudoers::desired_rules(config);
    let store = layout.sudoers_file();

    // A staged store belongs to the invoking user; only a live install
    // needs process elevation.
    let caps = if layout.is_system() {
        Capability::detect()
    } else {
        Capability::assume_elevated()
    };

    let report = sudoers::reconcile(&rules, &store, &Visudo, &caps)?;
    report.print();

    if !report.success() {
        bail!(
            "{} sudoers rule(s) rejected by the policy validator",
            report.rejected_count()
        );
    }
    Ok(())
}
