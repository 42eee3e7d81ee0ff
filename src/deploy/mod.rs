//! Deployment of the AP Manager payload into the system tree.
//!
//! Creates the install and state directories, copies the payload scripts
//! (and the manager tree when the checkout carries one), places the
//! launcher symlink, and registers the systemd unit. Deployment runs
//! before sudoers reconciliation so every path a grant names exists by
//! the time the policy store is edited.

mod files;
pub mod systemd;

pub use files::{copy_file_mode, copy_tree, replace_symlink, write_file_mode, write_file_with_dirs};

use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::config::Config;
use crate::layout::InstallLayout;

/// Run the full deployment into the given layout.
pub fn deploy(config: &Config, layout: &InstallLayout) -> Result<()> {
    println!("Deploying AP Manager files...");

    create_directories(layout)?;
    let copied = copy_payload(config, layout)?;
    println!("  Copied {} payload file(s)", copied);

    install_launcher(config, layout)?;
    systemd::install_unit(&layout.unit_file())?;

    // A staged tree has no service manager to notify.
    if layout.is_system() {
        systemd::daemon_reload()?;
    }

    Ok(())
}

/// Create the install and state directory skeleton.
pub fn create_directories(layout: &InstallLayout) -> Result<()> {
    fs::create_dir_all(layout.scripts_dir())
        .with_context(|| format!("Failed to create {}", layout.scripts_dir().display()))?;
    fs::create_dir_all(layout.proc_dir())
        .with_context(|| format!("Failed to create {}", layout.proc_dir().display()))?;

    // The unprivileged UI writes runtime state here.
    fs::set_permissions(layout.state_dir(), fs::Permissions::from_mode(0o777))?;
    Ok(())
}

/// Copy payload scripts (and the manager tree when present).
///
/// Returns the number of files placed.
pub fn copy_payload(config: &Config, layout: &InstallLayout) -> Result<usize> {
    let mut copied = 0;

    let scripts_src = config.payload_dir.join("scripts");
    if scripts_src.is_dir() {
        for entry in fs::read_dir(&scripts_src)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|ext| ext == "sh").unwrap_or(false) {
                let dst = layout.scripts_dir().join(entry.file_name());
                files::copy_file_mode(&path, &dst, 0o755)?;
                copied += 1;
            }
        }
    }

    let manager_src = config.payload_dir.join("manager");
    if manager_src.is_dir() {
        copied += files::copy_tree(&manager_src, &layout.manager_dir())?;
    }

    Ok(copied)
}

/// Place the launcher symlink, replacing a stale one from a prior install.
pub fn install_launcher(config: &Config, layout: &InstallLayout) -> Result<()> {
    let link = layout.launcher_link();
    files::replace_symlink(&config.launcher_target, &link)?;
    println!(
        "  Linked {} -> {}",
        link.display(),
        config.launcher_target.display()
    );
    Ok(())
}

/// Is there a deployed installation under this layout?
pub fn is_deployed(layout: &InstallLayout) -> bool {
    layout.install_dir().is_dir() && layout.unit_file().is_file()
}

/// Quiet existence probe used by `show status`.
pub fn describe_path(path: &Path) -> &'static str {
    if fs::symlink_metadata(path).is_ok() {
        "present"
    } else {
        "missing"
    }
}
