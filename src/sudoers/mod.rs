//! Idempotent reconciliation of sudoers privilege rules.
//!
//! Brings the policy store in line with a desired set of grant lines:
//! missing rules are appended through the safe-edit mechanism, present
//! rules are left alone, and unrelated store content is never touched.
//! Running the reconciliation twice with the same input is a no-op the
//! second time.

mod editor;
mod rules;

pub use editor::{EditError, EditOutcome, SafeEdit, Visudo};
pub use rules::{desired_rules, PrivilegeRule};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::privilege::Capability;

/// Per-rule result of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The exact line already existed in the store.
    AlreadyPresent,
    /// The line was appended and committed.
    Added,
    /// The validator refused the candidate; the store is unchanged.
    Rejected,
}

/// One rule plus what happened to it.
#[derive(Debug)]
pub struct RuleStatus {
    pub rule: PrivilegeRule,
    pub outcome: RuleOutcome,
}

/// Results of a full reconciliation run, one entry per desired rule.
#[derive(Debug)]
pub struct ReconcileReport {
    pub entries: Vec<RuleStatus>,
}

impl ReconcileReport {
    /// True when no rule was rejected.
    pub fn success(&self) -> bool {
        !self
            .entries
            .iter()
            .any(|e| e.outcome == RuleOutcome::Rejected)
    }

    pub fn added_count(&self) -> usize {
        self.count(RuleOutcome::Added)
    }

    pub fn present_count(&self) -> usize {
        self.count(RuleOutcome::AlreadyPresent)
    }

    pub fn rejected_count(&self) -> usize {
        self.count(RuleOutcome::Rejected)
    }

    fn count(&self, outcome: RuleOutcome) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == outcome)
            .count()
    }

    /// Print one summary line per rule plus totals.
    pub fn print(&self) {
        for entry in &self.entries {
            let (icon, status) = match entry.outcome {
                RuleOutcome::AlreadyPresent => ("○", "PRESENT"),
                RuleOutcome::Added => ("✓", "ADDED"),
                RuleOutcome::Rejected => ("✗", "REJECTED"),
            };
            println!("  {} [{}] {}", icon, status, entry.rule);
        }

        println!();
        println!(
            "Summary: {} added, {} already present, {} rejected",
            self.added_count(),
            self.present_count(),
            self.rejected_count()
        );
    }
}

/// Reconciliation failures that abort the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("insufficient privilege to edit the policy store at {store}")]
    NotPrivileged { store: PathBuf },

    #[error("policy store unreachable at {store}: {source}")]
    StoreUnreachable {
        store: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("safe-edit mechanism failed: {source}")]
    SafeEditFailure {
        #[from]
        source: EditError,
    },
}

/// Ensure every desired rule is present in the store, in order.
///
/// Each rule gets a fresh read of the store, an exact-line membership
/// check, and (when missing) a validated append through `editor`. A
/// rejected rule is recorded and the remaining rules are still attempted;
/// a broken edit mechanism aborts the run. The store is only ever
/// appended to.
pub fn reconcile(
    desired: &[PrivilegeRule],
    store: &Path,
    editor: &dyn SafeEdit,
    caps: &Capability,
) -> Result<ReconcileReport, ReconcileError> {
    if !caps.can_edit_policy() {
        return Err(ReconcileError::NotPrivileged {
            store: store.to_path_buf(),
        });
    }

    // The store is created by the OS at install time, never by us.
    read_store(store)?;

    let mut entries = Vec::with_capacity(desired.len());
    for rule in desired {
        // Fresh read per rule: an earlier append (or a duplicate within the
        // desired set) must be visible to this membership check.
        let current = read_store(store)?;

        if current.lines().any(|line| rule.matches_line(line)) {
            entries.push(RuleStatus {
                rule: rule.clone(),
                outcome: RuleOutcome::AlreadyPresent,
            });
            continue;
        }

        let outcome = match editor.append_line(store, &current, rule.as_line())? {
            EditOutcome::Committed => RuleOutcome::Added,
            EditOutcome::RejectedSyntax => RuleOutcome::Rejected,
        };
        entries.push(RuleStatus {
            rule: rule.clone(),
            outcome,
        });
    }

    Ok(ReconcileReport { entries })
}

fn read_store(store: &Path) -> Result<String, ReconcileError> {
    fs::read_to_string(store).map_err(|source| ReconcileError::StoreUnreachable {
        store: store.to_path_buf(),
        source,
    })
}
