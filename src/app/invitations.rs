//! Invitation lifecycle: create, accept, decline, cancel, resend.
//!
//! Transitions are one-directional out of `pending`, except resend, which
//! re-arms an expired, declined, or still-pending record without minting a
//! new identity. Acceptance and the membership write commit as one unit at
//! the authority.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use validator::Validate;

use crate::app::access::AccessResolver;
use crate::app::authority::{Authority, AuthorityError, InvitationFilter, NewInvitation};
use crate::app::config::Config;
use crate::app::domain::{
    Email, Invitation, InvitationId, InvitationStatus, OrganizationId, OrganizationRole, UserId,
};
use crate::app::error::CoreError;

/// Request data for creating an invitation.
#[derive(Debug, Clone, Validate)]
pub struct CreateInvitation {
    pub organization_id: OrganizationId,
    pub inviter_id: UserId,
    pub invitee_id: UserId,

    /// Contact address for the notification layer, if known.
    #[validate(length(min = 3, max = 254), email)]
    pub invitee_email: Option<String>,

    /// Proposed role, as entered. Must name a catalog role.
    #[validate(length(min = 1))]
    pub role: String,

    #[validate(length(max = 500))]
    pub message: Option<String>,
}

/// Owns invitation state transitions and the membership mutation triggered
/// by acceptance.
#[derive(Clone)]
pub struct InvitationLifecycle {
    authority: Arc<dyn Authority>,
    access: AccessResolver,
    config: Config,
}

impl InvitationLifecycle {
    pub fn new(authority: Arc<dyn Authority>, config: Config) -> Self {
        Self {
            access: AccessResolver::new(authority.clone()),
            authority,
            config,
        }
    }

    fn now() -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }

    fn expiry_after(&self, now: i64) -> i64 {
        now + Duration::days(self.config.invite_expiry_days).whole_seconds()
    }

    async fn load(&self, id: &InvitationId) -> Result<Invitation, CoreError> {
        self.authority
            .invitation(id)
            .await?
            .ok_or_else(|| CoreError::Validation(format!("unknown invitation {id}")))
    }

    /// Create an invitation.
    ///
    /// Inviting an existing active member is rejected, not silently
    /// accepted. A second create for a pair that already has an open
    /// invitation is converted to a resend of the existing record — there is
    /// never more than one open invitation per (organization, invitee) pair.
    pub async fn create(&self, request: CreateInvitation) -> Result<Invitation, CoreError> {
        request
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let role: OrganizationRole = request
            .role
            .parse()
            .map_err(|_| CoreError::Validation(format!("unknown role '{}'", request.role)))?;

        let decision = self
            .access
            .resolve_strict(&request.organization_id, &request.invitee_id)
            .await?;
        if decision.can_access {
            return Err(CoreError::Validation(
                "invitee is already an active member of this organization".to_string(),
            ));
        }

        if let Some(existing) = self
            .authority
            .open_invitation(&request.organization_id, &request.invitee_id)
            .await?
        {
            tracing::debug!(invitation_id = %existing.id, "open invitation exists, converting create to resend");
            return self.resend(&existing.id).await;
        }

        let invitee_email = request
            .invitee_email
            .map(Email::new)
            .transpose()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let now = Self::now();
        let record = NewInvitation {
            id: InvitationId::new(),
            organization_id: request.organization_id.clone(),
            inviter_id: request.inviter_id,
            invitee_id: request.invitee_id.clone(),
            invitee_email,
            role,
            message: request.message,
            created_at: now,
            expires_at: self.expiry_after(now),
        };

        match self.authority.create_invitation(&record).await {
            Ok(invitation) => Ok(invitation),
            // Lost a race on the open-invitation uniqueness constraint:
            // the other create won, so this one becomes a resend of it.
            Err(AuthorityError::Conflict(_)) => {
                let existing = self
                    .authority
                    .open_invitation(&request.organization_id, &request.invitee_id)
                    .await?
                    .ok_or_else(|| {
                        CoreError::Validation(
                            "an open invitation already exists for this invitee".to_string(),
                        )
                    })?;
                self.resend(&existing.id).await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Accept a pending invitation. Invitee-initiated. The status transition
    /// and the membership creation/reactivation commit as one unit.
    pub async fn accept(
        &self,
        id: &InvitationId,
        requester: &UserId,
        message: Option<String>,
    ) -> Result<Invitation, CoreError> {
        let invitation = self.load(id).await?;
        if &invitation.invitee_id != requester {
            return Err(CoreError::Authorization(
                "only the invitee may accept an invitation".to_string(),
            ));
        }

        let state = invitation.effective_status(Self::now());
        if state != InvitationStatus::Pending {
            return Err(CoreError::InvalidTransition {
                from: state,
                action: "accept",
            });
        }

        match self.authority.accept_invitation(id, message).await {
            Ok((invitation, _membership)) => Ok(invitation),
            // Raced against another transition; report the state that won.
            Err(AuthorityError::Conflict(_)) => {
                let fresh = self.load(id).await?;
                Err(CoreError::InvalidTransition {
                    from: fresh.effective_status(Self::now()),
                    action: "accept",
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Decline a pending invitation. Invitee-initiated; no membership effect.
    pub async fn decline(
        &self,
        id: &InvitationId,
        requester: &UserId,
        message: Option<String>,
    ) -> Result<Invitation, CoreError> {
        let invitation = self.load(id).await?;
        if &invitation.invitee_id != requester {
            return Err(CoreError::Authorization(
                "only the invitee may decline an invitation".to_string(),
            ));
        }

        let state = invitation.effective_status(Self::now());
        if state != InvitationStatus::Pending {
            return Err(CoreError::InvalidTransition {
                from: state,
                action: "decline",
            });
        }

        Ok(self
            .authority
            .update_invitation_status(id, InvitationStatus::Declined, message)
            .await?)
    }

    /// Cancel a pending invitation. Inviter-initiated; no membership effect.
    pub async fn cancel(&self, id: &InvitationId, requester: &UserId) -> Result<Invitation, CoreError> {
        let invitation = self.load(id).await?;
        if &invitation.inviter_id != requester {
            return Err(CoreError::Authorization(
                "only the inviter may cancel an invitation".to_string(),
            ));
        }

        let state = invitation.effective_status(Self::now());
        if state != InvitationStatus::Pending {
            return Err(CoreError::InvalidTransition {
                from: state,
                action: "cancel",
            });
        }

        Ok(self
            .authority
            .update_invitation_status(id, InvitationStatus::Cancelled, None)
            .await?)
    }

    /// Re-arm a pending, expired, or declined invitation: fresh creation
    /// timestamp, fresh expiry window, prior response cleared. Cancelled
    /// invitations require a fresh create; accepted ones are final.
    pub async fn resend(&self, id: &InvitationId) -> Result<Invitation, CoreError> {
        let invitation = self.load(id).await?;

        let now = Self::now();
        let state = invitation.effective_status(now);
        if !state.is_resendable() {
            return Err(CoreError::InvalidTransition {
                from: state,
                action: "resend",
            });
        }

        Ok(self
            .authority
            .rearm_invitation(id, now, self.expiry_after(now))
            .await?)
    }

    /// List an organization's invitations, optionally filtered by status.
    /// Callers re-query after each mutation; the core emits no events.
    pub async fn list(
        &self,
        organization_id: &OrganizationId,
        status: Option<InvitationStatus>,
    ) -> Result<Vec<Invitation>, CoreError> {
        Ok(self
            .authority
            .list_invitations(&InvitationFilter {
                organization_id: organization_id.clone(),
                status,
            })
            .await?)
    }
}
