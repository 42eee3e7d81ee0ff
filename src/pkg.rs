//! Host package installation for the AP Manager runtime dependencies.
//!
//! The supported package managers form a closed set; detection probes PATH
//! in a fixed order and the first hit wins. The managers' own invocation
//! semantics stay their business: apsetup only spawns them and surfaces
//! failure.

use std::ffi::OsStr;
use std::path::Path;

use crate::process::{self, Cmd};

/// Command provided by the application package; its presence on PATH is
/// the idempotence check for the application install.
pub const APP_COMMAND: &str = "create_ap";

/// Closed set of supported host package managers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
    Zypper,
}

/// Probe order for detection. First present wins.
pub const DETECTION_ORDER: [PackageManager; 4] = [
    PackageManager::Apt,
    PackageManager::Dnf,
    PackageManager::Pacman,
    PackageManager::Zypper,
];

impl PackageManager {
    /// Executable probed for and invoked.
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Apt => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Pacman => "pacman",
            PackageManager::Zypper => "zypper",
        }
    }

    /// Arguments for a non-interactive install, before the package names.
    pub fn install_args(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt => &["install", "-y"],
            PackageManager::Dnf => &["install", "-y"],
            PackageManager::Pacman => &["-S", "--noconfirm", "--needed"],
            PackageManager::Zypper => &["install", "-y"],
        }
    }

    /// The fixed network dependency list, in this distro's spelling.
    pub fn network_packages(&self) -> &'static [&'static str] {
        match self {
            PackageManager::Apt => &["hostapd", "dnsmasq", "iw", "iproute2"],
            PackageManager::Dnf => &["hostapd", "dnsmasq", "iw", "iproute"],
            PackageManager::Pacman => &["hostapd", "dnsmasq", "iw", "iproute2"],
            PackageManager::Zypper => &["hostapd", "dnsmasq", "iw", "iproute2"],
        }
    }

    /// Package providing the `create_ap` application.
    pub fn app_package(&self) -> &'static str {
        match self {
            PackageManager::Apt => "linux-wifi-hotspot",
            PackageManager::Dnf => "create_ap",
            PackageManager::Pacman => "create_ap",
            PackageManager::Zypper => "create_ap",
        }
    }

    /// Detect the host's package manager from PATH.
    pub fn detect() -> Option<Self> {
        DETECTION_ORDER
            .iter()
            .copied()
            .find(|m| process::exists(m.program()))
    }

    /// Detection against an explicit PATH value (tests inject a sandbox).
    pub fn detect_in(path: &OsStr) -> Option<Self> {
        DETECTION_ORDER
            .iter()
            .copied()
            .find(|m| which::which_in(m.program(), Some(path), Path::new("/")).is_ok())
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DepsError {
    #[error("no supported package manager found (tried apt-get, dnf, pacman, zypper)")]
    UnsupportedPlatform,

    #[error("package installation failed: {0}")]
    InstallFailed(String),
}

/// Install the fixed network dependency list plus, when absent, the
/// application package.
pub fn install_dependencies() -> Result<(), DepsError> {
    let manager = PackageManager::detect().ok_or(DepsError::UnsupportedPlatform)?;
    println!("Installing dependencies via {}...", manager);

    install(manager, manager.network_packages())?;

    if process::exists(APP_COMMAND) {
        println!("  {} already present, skipping", APP_COMMAND);
    } else {
        install(manager, &[manager.app_package()])?;
    }

    Ok(())
}

fn install(manager: PackageManager, packages: &[&str]) -> Result<(), DepsError> {
    Cmd::new(manager.program())
        .args(manager.install_args())
        .args(packages)
        .as_root()
        .error_msg(format!("{} install failed", manager))
        .run_interactive()
        .map_err(|e| DepsError::InstallFailed(e.to_string()))?;
    Ok(())
}
