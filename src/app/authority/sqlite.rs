use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::app::db;
use crate::app::db::invitations::{InvitationRow, NewInvitationRow};
use crate::app::db::memberships::MembershipRow;
use crate::app::domain::{
    Email, Invitation, InvitationId, InvitationStatus, Membership, OrganizationId,
    OrganizationRole, UserId,
};

use super::{Authority, AuthorityError, InvitationFilter, NewInvitation};

/// SQLite-backed authority. The partial unique index on open invitations is
/// what serializes racing creates for the same (organization, invitee) pair.
#[derive(Clone)]
pub struct SqliteAuthority {
    pool: SqlitePool,
}

impl SqliteAuthority {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn membership_from_row(row: MembershipRow) -> Result<Membership, AuthorityError> {
    Ok(Membership {
        organization_id: OrganizationId::from_string(&row.organization_id)
            .map_err(|_| AuthorityError::Corrupt(format!("organization id '{}'", row.organization_id)))?,
        user_id: UserId::from_string(&row.user_id)
            .map_err(|_| AuthorityError::Corrupt(format!("user id '{}'", row.user_id)))?,
        // Unknown stored roles read as the least-privileged role.
        role: OrganizationRole::parse_or_lowest(&row.role),
        joined_at: row.joined_at,
        is_active: row.is_active != 0,
    })
}

fn invitation_from_row(row: InvitationRow) -> Result<Invitation, AuthorityError> {
    let status: InvitationStatus = row
        .status
        .parse()
        .map_err(|_| AuthorityError::Corrupt(format!("invitation status '{}'", row.status)))?;
    Ok(Invitation {
        id: InvitationId::from_string(&row.id)
            .map_err(|_| AuthorityError::Corrupt(format!("invitation id '{}'", row.id)))?,
        organization_id: OrganizationId::from_string(&row.organization_id)
            .map_err(|_| AuthorityError::Corrupt(format!("organization id '{}'", row.organization_id)))?,
        inviter_id: UserId::from_string(&row.inviter_id)
            .map_err(|_| AuthorityError::Corrupt(format!("inviter id '{}'", row.inviter_id)))?,
        invitee_id: UserId::from_string(&row.invitee_id)
            .map_err(|_| AuthorityError::Corrupt(format!("invitee id '{}'", row.invitee_id)))?,
        // Unlike ids and status, a bad contact address does not poison the
        // record; drop it, but say so.
        invitee_email: row.invitee_email.and_then(|e| match Email::new(e) {
            Ok(email) => Some(email),
            Err(err) => {
                tracing::warn!(%err, invitation_id = %row.id, "discarding unparseable stored invitee email");
                None
            }
        }),
        role: OrganizationRole::parse_or_lowest(&row.role),
        status,
        message: row.message,
        response_message: row.response_message,
        created_at: row.created_at,
        expires_at: row.expires_at,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait::async_trait]
impl Authority for SqliteAuthority {
    async fn membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, AuthorityError> {
        let row = db::memberships::find(&self.pool, organization_id, user_id).await?;
        row.map(membership_from_row).transpose()
    }

    async fn upsert_membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        role: OrganizationRole,
    ) -> Result<Membership, AuthorityError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        db::memberships::upsert(&self.pool, organization_id, user_id, role, now).await?;
        let row = db::memberships::find(&self.pool, organization_id, user_id)
            .await?
            .ok_or(AuthorityError::NotFound)?;
        membership_from_row(row)
    }

    async fn deactivate_membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<(), AuthorityError> {
        let updated = db::memberships::deactivate(&self.pool, organization_id, user_id).await?;
        if updated == 0 {
            return Err(AuthorityError::NotFound);
        }
        Ok(())
    }

    async fn create_invitation(&self, record: &NewInvitation) -> Result<Invitation, AuthorityError> {
        let row = NewInvitationRow {
            id: record.id.as_str(),
            organization_id: record.organization_id.as_str(),
            inviter_id: record.inviter_id.as_str(),
            invitee_id: record.invitee_id.as_str(),
            invitee_email: record.invitee_email.as_ref().map(|e| e.as_str().to_string()),
            role: record.role.to_string(),
            message: record.message.clone(),
            created_at: record.created_at,
            expires_at: record.expires_at,
        };
        db::invitations::insert(&self.pool, &row).await.map_err(|e| {
            if is_unique_violation(&e) {
                AuthorityError::Conflict(
                    "an open invitation already exists for this invitee".to_string(),
                )
            } else {
                AuthorityError::Database(e)
            }
        })?;

        Ok(Invitation {
            id: record.id.clone(),
            organization_id: record.organization_id.clone(),
            inviter_id: record.inviter_id.clone(),
            invitee_id: record.invitee_id.clone(),
            invitee_email: record.invitee_email.clone(),
            role: record.role,
            status: InvitationStatus::Pending,
            message: record.message.clone(),
            response_message: None,
            created_at: record.created_at,
            expires_at: record.expires_at,
        })
    }

    async fn invitation(&self, id: &InvitationId) -> Result<Option<Invitation>, AuthorityError> {
        let row = db::invitations::find_by_id(&self.pool, id).await?;
        row.map(invitation_from_row).transpose()
    }

    async fn update_invitation_status(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
        response_message: Option<String>,
    ) -> Result<Invitation, AuthorityError> {
        let updated = db::invitations::update_status(
            &self.pool,
            id,
            &status.to_string(),
            response_message.as_deref(),
        )
        .await?;
        if updated == 0 {
            return Err(AuthorityError::NotFound);
        }
        let row = db::invitations::find_by_id(&self.pool, id)
            .await?
            .ok_or(AuthorityError::NotFound)?;
        invitation_from_row(row)
    }

    async fn rearm_invitation(
        &self,
        id: &InvitationId,
        created_at: i64,
        expires_at: i64,
    ) -> Result<Invitation, AuthorityError> {
        let updated = db::invitations::rearm(&self.pool, id, created_at, expires_at).await?;
        if updated == 0 {
            return Err(AuthorityError::NotFound);
        }
        let row = db::invitations::find_by_id(&self.pool, id)
            .await?
            .ok_or(AuthorityError::NotFound)?;
        invitation_from_row(row)
    }

    async fn accept_invitation(
        &self,
        id: &InvitationId,
        response_message: Option<String>,
    ) -> Result<(Invitation, Membership), AuthorityError> {
        let mut tx = self.pool.begin().await?;

        let row = db::invitations::find_by_id(&mut *tx, id)
            .await?
            .ok_or(AuthorityError::NotFound)?;
        let invitation = invitation_from_row(row)?;

        // Guarded write: a racing accept/decline/cancel loses here, and the
        // membership upsert below never happens.
        let updated =
            db::invitations::mark_accepted_if_pending(&mut *tx, id, response_message.as_deref())
                .await?;
        if updated == 0 {
            return Err(AuthorityError::Conflict(
                "invitation is no longer pending".to_string(),
            ));
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        db::memberships::upsert(
            &mut *tx,
            &invitation.organization_id,
            &invitation.invitee_id,
            invitation.role,
            now,
        )
        .await?;
        let membership_row =
            db::memberships::find(&mut *tx, &invitation.organization_id, &invitation.invitee_id)
                .await?
                .ok_or(AuthorityError::NotFound)?;

        tx.commit().await?;

        let membership = membership_from_row(membership_row)?;
        let invitation = Invitation {
            status: InvitationStatus::Accepted,
            response_message,
            ..invitation
        };
        Ok((invitation, membership))
    }

    async fn open_invitation(
        &self,
        organization_id: &OrganizationId,
        invitee_id: &UserId,
    ) -> Result<Option<Invitation>, AuthorityError> {
        let row = db::invitations::find_open(&self.pool, organization_id, invitee_id).await?;
        row.map(invitation_from_row).transpose()
    }

    async fn list_invitations(
        &self,
        filter: &InvitationFilter,
    ) -> Result<Vec<Invitation>, AuthorityError> {
        let status = filter.status.map(|s| s.to_string());
        let rows = db::invitations::list_for_org(
            &self.pool,
            &filter.organization_id,
            status.as_deref(),
        )
        .await?;
        rows.into_iter().map(invitation_from_row).collect()
    }
}
