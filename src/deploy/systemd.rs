//! Systemd unit installation for the AP Manager daemon.
//!
//! The unit content is static; apsetup only places it and asks the service
//! manager to re-read its configuration. Enabling/starting the unit is left
//! to the operator.

use anyhow::Result;
use std::path::Path;

use crate::process::Cmd;

use super::files;

/// Unit descriptor for the privileged AP Manager daemon.
const UNIT_CONTENT: &str = "\
[Unit]
Description=AP Manager privileged daemon
After=network.target

[Service]
Type=simple
ExecStart=/opt/ap_manager/scripts/ap_manager_daemon.sh
Restart=on-failure
RuntimeDirectory=ap_manager

[Install]
WantedBy=multi-user.target
";

/// Write the unit file at its canonical location.
pub fn install_unit(unit_path: &Path) -> Result<()> {
    files::write_file_mode(unit_path, UNIT_CONTENT, 0o644)?;
    println!("  Installed unit {}", unit_path.display());
    Ok(())
}

/// Ask systemd to pick up the new unit.
pub fn daemon_reload() -> Result<()> {
    Cmd::new("systemctl")
        .arg("daemon-reload")
        .as_root()
        .error_msg("systemctl daemon-reload failed")
        .run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_names_the_daemon_entry_point() {
        assert!(UNIT_CONTENT.contains("ExecStart=/opt/ap_manager/scripts/ap_manager_daemon.sh"));
        assert!(UNIT_CONTENT.contains("[Install]"));
    }
}
