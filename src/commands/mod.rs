//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `install` - Full install (deploy + sudoers + dependencies)
//! - `sudoers` - Reconcile the privilege rules only
//! - `deps` - Install OS-level network dependencies
//! - `preflight` - Run preflight checks
//! - `show` - Display information

mod deps;
mod install;
mod preflight;
pub mod show;
mod sudoers;

pub use deps::cmd_deps;
pub use install::cmd_install;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
pub use sudoers::cmd_sudoers;
