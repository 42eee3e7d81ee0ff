//! Configuration management for apsetup.
//!
//! Reads configuration from .env file and environment variables.
//! Environment variables take precedence over .env file.
//!
//! The canonical install locations are fixed (see `layout`); configuration
//! covers the deployment identity: which user receives the sudo grants,
//! which commands those grants name, where the launcher symlink points,
//! and an optional staging root for non-live installs.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Commands the manager drives as root; each gets a passwordless grant.
pub const DEFAULT_SUDO_COMMANDS: &[&str] = &[
    "/usr/sbin/hostapd",
    "/usr/sbin/dnsmasq",
    "/usr/sbin/iw",
    "/usr/sbin/ip",
    "/usr/bin/systemctl",
];

/// Default target of the launcher symlink.
pub const DEFAULT_LAUNCHER: &str = "/opt/ap_manager/scripts/ap_manager.sh";

/// Apsetup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// User that receives the passwordless sudo grants.
    pub user: String,
    /// Command paths named by the sudo grants.
    pub sudo_commands: Vec<PathBuf>,
    /// Path the launcher symlink points at.
    pub launcher_target: PathBuf,
    /// Staging root for the install layout (default: `/`).
    pub destdir: PathBuf,
    /// Directory holding the payload to deploy (`scripts/`, `manager/`).
    pub payload_dir: PathBuf,
}

impl Config {
    /// Load configuration from .env file and environment.
    ///
    /// `base_dir` is the source checkout the installer runs from; the
    /// payload directory defaults to it and a `.env` next to it is honored.
    pub fn load(base_dir: &Path) -> Self {
        let mut env_vars = HashMap::new();

        // Try to load .env file
        let env_path = base_dir.join(".env");
        if env_path.exists() {
            if let Ok(content) = fs::read_to_string(&env_path) {
                for line in content.lines() {
                    let line = line.trim();
                    // Skip comments and empty lines
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    // Parse KEY=value
                    if let Some((key, value)) = line.split_once('=') {
                        let key = key.trim();
                        let value = value.trim();
                        // Remove quotes if present
                        let value = value.trim_matches('"').trim_matches('\'');
                        env_vars.insert(key.to_string(), value.to_string());
                    }
                }
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        // The grants go to the invoking user, not root: under sudo that is
        // SUDO_USER, never the effective identity.
        let user = env_vars
            .get("AP_USER")
            .or_else(|| env_vars.get("SUDO_USER"))
            .cloned()
            .unwrap_or_else(|| "root".to_string());

        let sudo_commands = env_vars
            .get("AP_SUDO_COMMANDS")
            .map(|s| {
                s.split(':')
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_SUDO_COMMANDS.iter().map(PathBuf::from).collect());

        let launcher_target = env_vars
            .get("AP_LAUNCHER")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LAUNCHER));

        let destdir = env_vars
            .get("AP_DESTDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/"));

        let payload_dir = env_vars
            .get("AP_PAYLOAD_DIR")
            .map(|s| {
                let path = PathBuf::from(s);
                if path.is_absolute() {
                    path
                } else {
                    base_dir.join(path)
                }
            })
            .unwrap_or_else(|| base_dir.to_path_buf());

        Self {
            user,
            sudo_commands,
            launcher_target,
            destdir,
            payload_dir,
        }
    }

    /// Print configuration for `show config`.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  AP_USER: {}", self.user);
        println!(
            "  AP_SUDO_COMMANDS: {}",
            self.sudo_commands
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(":")
        );
        println!("  AP_LAUNCHER: {}", self.launcher_target.display());
        println!("  AP_DESTDIR: {}", self.destdir.display());
        println!("  AP_PAYLOAD_DIR: {}", self.payload_dir.display());
    }
}
