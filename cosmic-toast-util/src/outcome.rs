use std::fmt;

/// How the popup was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DismissOutcome {
    /// Accepted with the secondary button.
    UserDismissed,
    /// Rejected with the primary button or a confirm key.
    UserCancelled,
    /// Closed by the auto-dismiss timer.
    TimedOut,
}

impl DismissOutcome {
    /// Process exit status reported for this outcome.
    pub const fn exit_code(self) -> u8 {
        match self {
            DismissOutcome::UserDismissed => 0,
            DismissOutcome::UserCancelled | DismissOutcome::TimedOut => 2,
        }
    }
}

impl fmt::Display for DismissOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DismissOutcome::UserDismissed => write!(f, "dismissed"),
            DismissOutcome::UserCancelled => write!(f, "cancelled"),
            DismissOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DismissOutcome::UserDismissed.exit_code(), 0);
        assert_eq!(DismissOutcome::UserCancelled.exit_code(), 2);
        assert_eq!(DismissOutcome::TimedOut.exit_code(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(DismissOutcome::TimedOut.to_string(), "timed out");
    }
}
