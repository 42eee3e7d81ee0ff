//! Safe-edit mechanism for the privilege policy store.
//!
//! The store is never opened for raw in-place writes. An append stages the
//! full candidate file (current content plus the new line) next to the
//! store, has visudo syntax-check the whole candidate, and only then swaps
//! it into place with an atomic rename. A candidate that fails the check is
//! discarded and the store stays byte-identical.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::process::Cmd;

/// Sudoers files are root-readable only.
const STORE_MODE: u32 = 0o440;

/// Outcome of one validated append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The candidate passed validation and replaced the store.
    Committed,
    /// The validator refused the candidate; the store is unchanged.
    RejectedSyntax,
}

/// The edit mechanism itself failed; the store's edit path is broken.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("could not stage candidate policy file: {0}")]
    Stage(#[source] std::io::Error),
    #[error("could not run the policy validator: {0}")]
    Validator(String),
    #[error("could not commit validated policy file: {0}")]
    Commit(#[source] std::io::Error),
}

/// Validate-then-commit append to a policy store.
///
/// Implementations must guarantee that a non-`Committed` result leaves the
/// store byte-identical to `current`.
pub trait SafeEdit {
    /// Append `line` to the store whose present content is `current`.
    fn append_line(
        &self,
        store: &Path,
        current: &str,
        line: &str,
    ) -> Result<EditOutcome, EditError>;
}

/// Production editor backed by `visudo -c -f`.
pub struct Visudo;

impl SafeEdit for Visudo {
    fn append_line(
        &self,
        store: &Path,
        current: &str,
        line: &str,
    ) -> Result<EditOutcome, EditError> {
        // Stage in the store's own directory so the final rename cannot
        // cross a filesystem boundary.
        let dir = store.parent().unwrap_or_else(|| Path::new("/"));
        let mut candidate = NamedTempFile::new_in(dir).map_err(EditError::Stage)?;

        candidate
            .write_all(current.as_bytes())
            .map_err(EditError::Stage)?;
        if !current.is_empty() && !current.ends_with('\n') {
            candidate.write_all(b"\n").map_err(EditError::Stage)?;
        }
        writeln!(candidate, "{}", line).map_err(EditError::Stage)?;
        candidate.flush().map_err(EditError::Stage)?;

        let check = Cmd::new("visudo")
            .arg("-c")
            .arg("-q")
            .arg("-f")
            .arg_path(candidate.path())
            .allow_fail()
            .run()
            .map_err(|e| EditError::Validator(e.to_string()))?;

        if !check.success() {
            return Ok(EditOutcome::RejectedSyntax);
        }

        let mode = fs::metadata(store)
            .map(|m| m.permissions())
            .unwrap_or_else(|_| fs::Permissions::from_mode(STORE_MODE));
        fs::set_permissions(candidate.path(), mode).map_err(EditError::Commit)?;

        candidate
            .persist(store)
            .map_err(|e| EditError::Commit(e.error))?;
        Ok(EditOutcome::Committed)
    }
}
