use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Invitation lifecycle state. `Pending` is the only non-terminal state;
/// resend re-arms `Expired` and `Declined` records back to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Cancelled,
    Expired,
}

impl InvitationStatus {
    /// True for every state except `Pending`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }

    /// States a resend may re-arm. Cancellation signals inviter intent to
    /// withdraw and requires a fresh create; acceptance is final.
    pub fn is_resendable(self) -> bool {
        matches!(
            self,
            InvitationStatus::Pending | InvitationStatus::Expired | InvitationStatus::Declined
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_lowercase() {
        assert_eq!(InvitationStatus::Pending.to_string(), "pending");
        assert_eq!(
            "cancelled".parse::<InvitationStatus>().unwrap(),
            InvitationStatus::Cancelled
        );
    }

    #[test]
    fn pending_is_the_only_non_terminal_state() {
        assert!(!InvitationStatus::Pending.is_terminal());
        assert!(InvitationStatus::Accepted.is_terminal());
        assert!(InvitationStatus::Declined.is_terminal());
        assert!(InvitationStatus::Cancelled.is_terminal());
        assert!(InvitationStatus::Expired.is_terminal());
    }

    #[test]
    fn cancelled_and_accepted_are_not_resendable() {
        assert!(InvitationStatus::Pending.is_resendable());
        assert!(InvitationStatus::Expired.is_resendable());
        assert!(InvitationStatus::Declined.is_resendable());
        assert!(!InvitationStatus::Cancelled.is_resendable());
        assert!(!InvitationStatus::Accepted.is_resendable());
    }
}
