use std::fmt;
use thiserror::Error as ThisError;

/// Direction of a membership mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    Join,
    Leave,
}

impl fmt::Display for MembershipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipAction::Join => f.write_str("joining"),
            MembershipAction::Leave => f.write_str("leaving"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AttendanceError {
    #[error("You need to be signed in and have an artist profile to join a gig.")]
    Unauthenticated,

    /// The "Joined" acknowledgment is still showing; the control accepts no input.
    #[error("The join button is disabled right now.")]
    ControlDisabled,

    #[error("An error occurred while {action} the gig: {reason}")]
    MutationFailed {
        action: MembershipAction,
        reason: String,
    },

    #[error("Join control is unavailable: {0}")]
    ControlUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutation_failure_message_carries_reason() {
        let err = AttendanceError::MutationFailed {
            action: MembershipAction::Join,
            reason: "duplicate membership".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "An error occurred while joining the gig: duplicate membership"
        );
    }
}
