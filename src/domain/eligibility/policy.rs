//! Verdicts used when a check cannot be answered

/// How a check resolves when its query fails
///
/// Both policies block the action; they differ in which question they
/// answer. A fail-safe check reports the hazard (a conflict), a
/// fail-closed check withholds the permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Report the outcome that blocks a potentially conflicting action
    FailSafe,
    /// Report the outcome that denies a potentially unauthorized action
    FailClosed,
}

impl FailurePolicy {
    /// Verdict for a "does this conflict?" question
    pub fn conflict_verdict(&self) -> bool {
        match self {
            Self::FailSafe | Self::FailClosed => true,
        }
    }

    /// Verdict for an "is this allowed?" question
    pub fn permission_verdict(&self) -> bool {
        match self {
            Self::FailSafe | Self::FailClosed => false,
        }
    }
}

/// A failed conflict lookup reports a conflict
pub const BOOKING_CONFLICT_POLICY: FailurePolicy = FailurePolicy::FailSafe;

/// A failed ownership lookup denies team creation
pub const TEAM_CREATION_POLICY: FailurePolicy = FailurePolicy::FailClosed;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_policy_reports_conflict() {
        assert!(BOOKING_CONFLICT_POLICY.conflict_verdict());
    }

    #[test]
    fn test_team_policy_denies() {
        assert!(!TEAM_CREATION_POLICY.permission_verdict());
    }

    #[test]
    fn test_no_policy_lets_an_action_through() {
        for policy in [FailurePolicy::FailSafe, FailurePolicy::FailClosed] {
            assert!(policy.conflict_verdict());
            assert!(!policy.permission_verdict());
        }
    }
}
