use serde::{Deserialize, Serialize};

use super::{Email, InvitationId, InvitationStatus, OrganizationId, OrganizationRole, UserId};

/// One invitation record. After creation, `status` and `response_message` are
/// the only mutable fields; resend additionally refreshes `created_at` and
/// `expires_at` without minting a new id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub organization_id: OrganizationId,
    pub inviter_id: UserId,
    pub invitee_id: UserId,
    /// Contact address for the notification layer, if known.
    pub invitee_email: Option<Email>,
    pub role: OrganizationRole,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub response_message: Option<String>,
    /// Unix timestamp (seconds). Reset by resend.
    pub created_at: i64,
    /// Unix timestamp (seconds). Reset by resend.
    pub expires_at: i64,
}

impl Invitation {
    /// The status as of `now`: a stored `Pending` past its expiry window
    /// reads as `Expired`. Expiry is time-based; there is no sweeper.
    pub fn effective_status(&self, now: i64) -> InvitationStatus {
        if self.status == InvitationStatus::Pending && now >= self.expires_at {
            InvitationStatus::Expired
        } else {
            self.status
        }
    }

    /// True while the invitation can still be responded to.
    pub fn is_open(&self, now: i64) -> bool {
        self.effective_status(now) == InvitationStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation(status: InvitationStatus, expires_at: i64) -> Invitation {
        Invitation {
            id: InvitationId::new(),
            organization_id: OrganizationId::new(),
            inviter_id: UserId::new(),
            invitee_id: UserId::new(),
            invitee_email: None,
            role: OrganizationRole::Member,
            status,
            message: None,
            response_message: None,
            created_at: 1_000,
            expires_at,
        }
    }

    #[test]
    fn pending_within_window_is_open() {
        let inv = invitation(InvitationStatus::Pending, 2_000);
        assert_eq!(inv.effective_status(1_500), InvitationStatus::Pending);
        assert!(inv.is_open(1_500));
    }

    #[test]
    fn pending_past_window_reads_expired() {
        let inv = invitation(InvitationStatus::Pending, 2_000);
        assert_eq!(inv.effective_status(2_000), InvitationStatus::Expired);
        assert!(!inv.is_open(2_000));
    }

    #[test]
    fn terminal_states_ignore_the_clock() {
        let inv = invitation(InvitationStatus::Declined, 2_000);
        assert_eq!(inv.effective_status(9_000), InvitationStatus::Declined);
    }
}
