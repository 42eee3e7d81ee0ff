//! Preflight checks for an AP Manager installation.
//!
//! Validates the host before anything is deployed: privilege, the safe
//! sudoers editor, the service manager, a supported package manager, and
//! the payload/policy files the install will touch. Run with
//! `apsetup preflight` (add `--strict` to fail the process on problems).

use anyhow::{bail, Result};

use crate::config::Config;
use crate::layout::InstallLayout;
use crate::pkg::PackageManager;
use crate::privilege;
use crate::process;

/// Result of a single preflight check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed.
    Pass,
    /// Check failed - the install will fail.
    Fail,
    /// Check passed but with a warning.
    Warn,
}

impl CheckResult {
    fn pass(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: None,
        }
    }

    fn pass_with(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Pass,
            details: Some(details.to_string()),
        }
    }

    fn fail(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Fail,
            details: Some(details.to_string()),
        }
    }

    fn warn(name: &str, details: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warn,
            details: Some(details.to_string()),
        }
    }
}

/// Results of all preflight checks.
pub struct PreflightReport {
    pub checks: Vec<CheckResult>,
}

impl PreflightReport {
    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        !self.checks.iter().any(|c| c.status == CheckStatus::Fail)
    }

    /// Count of failed checks.
    pub fn fail_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .count()
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        println!("=== Preflight Check Results ===\n");

        for check in &self.checks {
            let (icon, status_str) = match check.status {
                CheckStatus::Pass => ("✓", "PASS"),
                CheckStatus::Fail => ("✗", "FAIL"),
                CheckStatus::Warn => ("⚠", "WARN"),
            };

            print!("  {} [{}] {}", icon, status_str, check.name);
            if let Some(details) = &check.details {
                println!(": {}", details);
            } else {
                println!();
            }
        }

        println!();
        let passed = self
            .checks
            .iter()
            .filter(|c| c.status == CheckStatus::Pass)
            .count();
        println!("Summary: {}/{} passed", passed, self.checks.len());
        if self.fail_count() > 0 {
            println!("         {} FAILED - the install will not succeed", self.fail_count());
        }
    }
}

/// Run all preflight checks.
pub fn run_preflight(config: &Config, layout: &InstallLayout) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    // Privilege: a live install edits /etc/sudoers and /etc/systemd.
    if layout.is_system() {
        if privilege::effective_root() {
            checks.push(CheckResult::pass("root privileges"));
        } else {
            checks.push(CheckResult::fail(
                "root privileges",
                "Not running as root. Re-run with sudo.",
            ));
        }
    } else {
        checks.push(CheckResult::pass_with(
            "root privileges",
            "staged install, not required",
        ));
    }

    // Host tools
    let required_tools = [
        ("visudo", "sudo", "Required to validate sudoers edits"),
        ("systemctl", "systemd", "Required to register the daemon unit"),
    ];
    for (tool, package, purpose) in required_tools {
        match process::which(tool) {
            Some(path) => checks.push(CheckResult::pass_with(tool, &path.display().to_string())),
            None => checks.push(CheckResult::fail(
                tool,
                &format!("Not found. Install '{}' package. {}", package, purpose),
            )),
        }
    }

    // Package manager (only needed for dependency installation)
    match PackageManager::detect() {
        Some(manager) => checks.push(CheckResult::pass_with("package manager", manager.program())),
        None => checks.push(CheckResult::warn(
            "package manager",
            "None of apt-get/dnf/pacman/zypper found. `apsetup deps` will fail.",
        )),
    }

    // Payload
    let scripts = config.payload_dir.join("scripts");
    if scripts.is_dir() {
        checks.push(CheckResult::pass_with(
            "payload scripts",
            &scripts.display().to_string(),
        ));
    } else {
        checks.push(CheckResult::fail(
            "payload scripts",
            &format!("{} not found. Run from the source checkout.", scripts.display()),
        ));
    }

    // Policy store (pre-exists; apsetup never creates it)
    let store = layout.sudoers_file();
    if store.is_file() {
        checks.push(CheckResult::pass_with(
            "policy store",
            &store.display().to_string(),
        ));
    } else {
        checks.push(CheckResult::fail(
            "policy store",
            &format!("{} does not exist", store.display()),
        ));
    }

    println!();
    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config, layout: &InstallLayout) -> Result<()> {
    let report = run_preflight(config, layout);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before installing.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}
