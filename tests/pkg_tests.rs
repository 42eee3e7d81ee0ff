//! Tests for package-manager detection and install-command mapping.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::TempDir;

use apsetup::pkg::{DepsError, PackageManager, DETECTION_ORDER};

/// Drop a fake executable into `dir`.
fn fake_exe(dir: &Path, name: &str) {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn detects_manager_on_injected_path() {
    let dir = TempDir::new().unwrap();
    fake_exe(dir.path(), "pacman");

    let found = PackageManager::detect_in(dir.path().as_os_str());
    assert_eq!(found, Some(PackageManager::Pacman));
}

#[test]
fn empty_path_detects_nothing() {
    let dir = TempDir::new().unwrap();

    assert_eq!(PackageManager::detect_in(dir.path().as_os_str()), None);
}

#[test]
fn detection_order_prefers_first_hit() {
    let dir = TempDir::new().unwrap();
    fake_exe(dir.path(), "apt-get");
    fake_exe(dir.path(), "dnf");

    let found = PackageManager::detect_in(dir.path().as_os_str());
    assert_eq!(found, Some(PackageManager::Apt));
}

#[test]
fn non_executable_files_are_not_detected() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("dnf"), "not a program").unwrap();

    assert_eq!(PackageManager::detect_in(dir.path().as_os_str()), None);
}

#[test]
fn install_args_are_non_interactive() {
    assert_eq!(PackageManager::Apt.install_args(), ["install", "-y"]);
    assert_eq!(PackageManager::Dnf.install_args(), ["install", "-y"]);
    assert_eq!(
        PackageManager::Pacman.install_args(),
        ["-S", "--noconfirm", "--needed"]
    );
    assert_eq!(PackageManager::Zypper.install_args(), ["install", "-y"]);
}

#[test]
fn every_manager_installs_the_network_stack() {
    for manager in DETECTION_ORDER {
        let packages = manager.network_packages();
        assert!(packages.contains(&"hostapd"), "{} misses hostapd", manager);
        assert!(packages.contains(&"dnsmasq"), "{} misses dnsmasq", manager);
        assert!(packages.contains(&"iw"), "{} misses iw", manager);
    }
}

#[test]
fn app_package_is_named_for_each_manager() {
    for manager in DETECTION_ORDER {
        assert!(!manager.app_package().is_empty());
    }
}

#[test]
fn unsupported_platform_names_the_probed_managers() {
    let msg = DepsError::UnsupportedPlatform.to_string();
    assert!(msg.contains("apt-get"));
    assert!(msg.contains("zypper"));
}
