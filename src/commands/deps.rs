//! Deps command - install the OS-level network dependencies.

use anyhow::Result;

use crate::pkg;

/// Execute the deps command.
pub fn cmd_deps() -> Result<()> {
    pkg::install_dependencies()?;
    println!("Dependencies installed.");
    Ok(())
}
