//! Install command - full deployment, sudoers reconciliation, dependencies.

use anyhow::Result;

use crate::config::Config;
use crate::deploy;
use crate::layout::InstallLayout;
use crate::pkg;

use super::sudoers::run_reconcile;

/// Execute the install command.
pub fn cmd_install(config: &Config, no_deps: bool) -> Result<()> {
    let layout = InstallLayout::rooted(&config.destdir);

    println!("Installing AP Manager...\n");

    deploy::deploy(config, &layout)?;
    run_reconcile(config, &layout)?;

    if no_deps {
        println!("Skipping dependency installation (--no-deps)");
    } else {
        pkg::install_dependencies()?;
    }

    println!();
    println!("Installation completed successfully!");
    println!();
    println!("Usage examples:");
    println!("  ap_manager start          # Start hotspot");
    println!("  ap_manager configure      # Interactive configuration");
    println!("  ap_manager status         # Check status");
    println!("  ap_manager stop           # Stop hotspot");
    println!();
    println!("To enable automatic startup:");
    println!("  systemctl enable ap_manager.service");

    Ok(())
}
