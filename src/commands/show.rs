//! Show command - displays information.

use anyhow::Result;
use std::fs;

use crate::config::Config;
use crate::deploy;
use crate::layout::InstallLayout;
use crate::pkg::{self, PackageManager};
use crate::process;
use crate::sudoers;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show the desired sudoers rules
    Rules,
    /// Show install status
    Status,
}

/// Execute the show command.
pub fn cmd_show(target: ShowTarget, config: &Config) -> Result<()> {
    let layout = InstallLayout::rooted(&config.destdir);

    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Rules => {
            println!("Desired sudoers rules:");
            for rule in sudoers::desired_rules(config) {
                println!("  {}", rule);
            }
        }
        ShowTarget::Status => {
            show_status(config, &layout);
        }
    }
    Ok(())
}

fn show_status(config: &Config, layout: &InstallLayout) {
    println!("Install status:");
    println!(
        "  Install dir:  {} ({})",
        layout.install_dir().display(),
        deploy::describe_path(&layout.install_dir())
    );
    println!(
        "  State dir:    {} ({})",
        layout.state_dir().display(),
        deploy::describe_path(&layout.state_dir())
    );
    println!(
        "  Launcher:     {} ({})",
        layout.launcher_link().display(),
        deploy::describe_path(&layout.launcher_link())
    );
    println!(
        "  Unit file:    {} ({})",
        layout.unit_file().display(),
        deploy::describe_path(&layout.unit_file())
    );

    match PackageManager::detect() {
        Some(manager) => println!("  Pkg manager:  {}", manager),
        None => println!("  Pkg manager:  none detected"),
    }
    println!(
        "  {}:    {}",
        pkg::APP_COMMAND,
        if process::exists(pkg::APP_COMMAND) {
            "present"
        } else {
            "missing"
        }
    );

    // Read-only rule check: reports what `apsetup sudoers` would change.
    println!();
    match fs::read_to_string(layout.sudoers_file()) {
        Ok(store) => {
            println!("Sudoers rules:");
            for rule in sudoers::desired_rules(config) {
                let present = store.lines().any(|line| rule.matches_line(line));
                let status = if present { "present" } else { "missing" };
                println!("  [{}] {}", status, rule);
            }
        }
        Err(_) => {
            println!(
                "Sudoers rules: store {} not readable (run as root for rule status)",
                layout.sudoers_file().display()
            );
        }
    }
}
