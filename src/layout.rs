//! Fixed filesystem locations for an AP Manager installation.
//!
//! All paths are expressed relative to a root prefix so an installation
//! can be staged into a scratch directory (DESTDIR-style) and inspected
//! without touching the live system. The live system layout uses `/`.

use std::path::{Path, PathBuf};

/// Executable artifacts live here.
const INSTALL_DIR: &str = "opt/ap_manager";
/// Runtime state written by the manager.
const STATE_DIR: &str = "etc/ap_manager";
/// Canonical privilege policy store consulted by sudo.
const SUDOERS_FILE: &str = "etc/sudoers";
/// Convenience launcher symlink.
const LAUNCHER_LINK: &str = "usr/local/bin/ap_manager";
/// Systemd unit for the privileged daemon.
const UNIT_FILE: &str = "etc/systemd/system/ap_manager.service";

/// Install locations under a configurable root prefix.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    root: PathBuf,
}

impl InstallLayout {
    /// Layout for the live system (`/`).
    pub fn system() -> Self {
        Self {
            root: PathBuf::from("/"),
        }
    }

    /// Layout staged under an arbitrary root prefix.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// True when this layout targets the live system.
    pub fn is_system(&self) -> bool {
        self.root == Path::new("/")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn install_dir(&self) -> PathBuf {
        self.root.join(INSTALL_DIR)
    }

    /// Deployed shell scripts (`{install}/scripts`).
    pub fn scripts_dir(&self) -> PathBuf {
        self.install_dir().join("scripts")
    }

    /// Deployed manager payload tree (`{install}/manager`).
    pub fn manager_dir(&self) -> PathBuf {
        self.install_dir().join("manager")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join(STATE_DIR)
    }

    /// Runtime process state (`{state}/proc`).
    pub fn proc_dir(&self) -> PathBuf {
        self.state_dir().join("proc")
    }

    pub fn sudoers_file(&self) -> PathBuf {
        self.root.join(SUDOERS_FILE)
    }

    pub fn launcher_link(&self) -> PathBuf {
        self.root.join(LAUNCHER_LINK)
    }

    pub fn unit_file(&self) -> PathBuf {
        self.root.join(UNIT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_layout_uses_canonical_paths() {
        let layout = InstallLayout::system();
        assert!(layout.is_system());
        assert_eq!(layout.install_dir(), Path::new("/opt/ap_manager"));
        assert_eq!(layout.sudoers_file(), Path::new("/etc/sudoers"));
        assert_eq!(
            layout.unit_file(),
            Path::new("/etc/systemd/system/ap_manager.service")
        );
    }

    #[test]
    fn rooted_layout_stays_under_prefix() {
        let layout = InstallLayout::rooted("/tmp/stage");
        assert!(!layout.is_system());
        assert_eq!(
            layout.scripts_dir(),
            Path::new("/tmp/stage/opt/ap_manager/scripts")
        );
        assert_eq!(layout.proc_dir(), Path::new("/tmp/stage/etc/ap_manager/proc"));
    }
}
