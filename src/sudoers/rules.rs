//! Privilege rule construction.
//!
//! A rule is held as the exact sudoers line that must appear in the policy
//! store. Equality against store content is exact-text line match; the
//! reconciler never parses sudoers syntax itself (visudo owns that).

use std::path::Path;

use crate::config::Config;

/// A single passwordless sudo grant, as the literal policy line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeRule(String);

impl PrivilegeRule {
    /// Wrap an arbitrary policy line. Trailing whitespace is stripped so
    /// the line compares cleanly against store content.
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into().trim_end().to_string())
    }

    /// Grant `user` passwordless root execution of `command`.
    pub fn nopasswd(user: &str, command: &Path) -> Self {
        Self::new(format!(
            "{} ALL=(root) NOPASSWD: {}",
            user,
            command.display()
        ))
    }

    /// The exact line as it must appear in the store.
    pub fn as_line(&self) -> &str {
        &self.0
    }

    /// Does an existing store line satisfy this rule?
    pub fn matches_line(&self, line: &str) -> bool {
        line.trim_end() == self.0
    }
}

impl std::fmt::Display for PrivilegeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The ordered rule set an installation wants present, one grant per
/// configured command path.
pub fn desired_rules(config: &Config) -> Vec<PrivilegeRule> {
    config
        .sudo_commands
        .iter()
        .map(|command| PrivilegeRule::nopasswd(&config.user, command))
        .collect()
}
