//! Effective-privilege detection.
//!
//! The reconciler never inspects process identity itself; callers detect a
//! capability up front and pass it in, so the core can be exercised against
//! staged stores without root and returns a typed error instead of exiting.

/// Proof of the caller's ability to edit privileged system state.
#[derive(Debug, Clone, Copy)]
pub struct Capability {
    elevated: bool,
}

impl Capability {
    /// Detect from the current process identity.
    pub fn detect() -> Self {
        Self {
            elevated: effective_root(),
        }
    }

    /// Capability for stores the caller already controls (staged layouts).
    pub fn assume_elevated() -> Self {
        Self { elevated: true }
    }

    /// Explicitly unprivileged capability.
    pub fn assume_unprivileged() -> Self {
        Self { elevated: false }
    }

    /// May the holder edit the privilege policy store?
    pub fn can_edit_policy(&self) -> bool {
        self.elevated
    }
}

/// True when the process runs with an effective uid of root.
pub fn effective_root() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assumed_capabilities_answer_directly() {
        assert!(Capability::assume_elevated().can_edit_policy());
        assert!(!Capability::assume_unprivileged().can_edit_policy());
    }

    #[test]
    fn detect_matches_effective_uid() {
        assert_eq!(Capability::detect().can_edit_policy(), effective_root());
    }
}
