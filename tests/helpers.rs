//! Shared test utilities for apsetup tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use apsetup::config::Config;
use apsetup::layout::InstallLayout;

/// Test environment with a staged install root and a payload checkout.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Staged install root (stands in for `/`)
    pub root: PathBuf,
    /// Source payload directory (stands in for the checkout)
    pub payload: PathBuf,
    /// Layout over the staged root
    pub layout: InstallLayout,
}

impl TestEnv {
    /// Create a staged root with an empty policy store and a payload with
    /// two deployable scripts.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let root = base.join("root");
        let payload = base.join("payload");

        fs::create_dir_all(root.join("etc")).expect("Failed to create etc dir");
        fs::write(root.join("etc/sudoers"), "").expect("Failed to seed sudoers");

        let scripts = payload.join("scripts");
        fs::create_dir_all(&scripts).expect("Failed to create payload scripts");
        fs::write(scripts.join("ap_manager.sh"), "#!/bin/sh\nexit 0\n").unwrap();
        fs::write(scripts.join("ap_manager_daemon.sh"), "#!/bin/sh\nexit 0\n").unwrap();

        let layout = InstallLayout::rooted(&root);

        Self {
            _temp_dir: temp_dir,
            root,
            payload,
            layout,
        }
    }

    /// Config targeting this environment's staged root and payload.
    pub fn config(&self) -> Config {
        Config {
            user: "apuser".to_string(),
            sudo_commands: vec![
                PathBuf::from("/usr/sbin/hostapd"),
                PathBuf::from("/usr/sbin/dnsmasq"),
            ],
            launcher_target: self.layout.scripts_dir().join("ap_manager.sh"),
            destdir: self.root.clone(),
            payload_dir: self.payload.clone(),
        }
    }

    /// Path to the staged policy store.
    pub fn store(&self) -> PathBuf {
        self.layout.sudoers_file()
    }

    /// Overwrite the staged policy store.
    pub fn write_store(&self, content: &str) {
        fs::write(self.store(), content).expect("Failed to write store");
    }

    /// Read the staged policy store.
    pub fn store_content(&self) -> String {
        fs::read_to_string(self.store()).expect("Failed to read store")
    }

    /// Non-empty lines of the staged policy store.
    pub fn store_lines(&self) -> Vec<String> {
        self.store_content()
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }
}

pub fn assert_file_exists(path: &Path) {
    assert!(path.is_file(), "Expected file at {}", path.display());
}

pub fn assert_dir_exists(path: &Path) {
    assert!(path.is_dir(), "Expected directory at {}", path.display());
}

pub fn assert_symlink_to(link: &Path, target: &Path) {
    let meta = fs::symlink_metadata(link)
        .unwrap_or_else(|_| panic!("Expected symlink at {}", link.display()));
    assert!(meta.file_type().is_symlink(), "{} is not a symlink", link.display());
    assert_eq!(
        fs::read_link(link).unwrap(),
        target,
        "Symlink {} points elsewhere",
        link.display()
    );
}

/// Permission bits of a path (mode & 0o7777).
pub fn mode_of(path: &Path) -> u32 {
    fs::metadata(path)
        .unwrap_or_else(|_| panic!("Expected path at {}", path.display()))
        .permissions()
        .mode()
        & 0o7777
}
