use sqlx::{FromRow, SqliteExecutor};

use crate::app::domain::{InvitationId, OrganizationId, UserId};

/// Database row for organization_invitations table.
#[derive(Debug, FromRow)]
pub struct InvitationRow {
    pub id: String,
    pub organization_id: String,
    pub inviter_id: String,
    pub invitee_id: String,
    pub invitee_email: Option<String>,
    pub role: String,
    pub status: String,
    pub message: Option<String>,
    pub response_message: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
}

/// Data structure for inserting a new invitation. Status is always 'pending'
/// at creation.
pub struct NewInvitationRow {
    pub id: String,
    pub organization_id: String,
    pub inviter_id: String,
    pub invitee_id: String,
    pub invitee_email: Option<String>,
    pub role: String,
    pub message: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
}

const COLUMNS: &str = "id, organization_id, inviter_id, invitee_id, invitee_email, role, status, message, response_message, created_at, expires_at";

/// Insert a new invitation. Fails on the partial unique index if an open
/// invitation already exists for the same (organization, invitee) pair.
pub async fn insert<'e, E>(executor: E, invitation: &NewInvitationRow) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO organization_invitations (id, organization_id, inviter_id, invitee_id, invitee_email, role, status, message, response_message, created_at, expires_at) \
         VALUES (?, ?, ?, ?, ?, ?, 'pending', ?, NULL, ?, ?)",
    )
    .bind(&invitation.id)
    .bind(&invitation.organization_id)
    .bind(&invitation.inviter_id)
    .bind(&invitation.invitee_id)
    .bind(&invitation.invitee_email)
    .bind(&invitation.role)
    .bind(&invitation.message)
    .bind(invitation.created_at)
    .bind(invitation.expires_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// Find an invitation by id.
pub async fn find_by_id<'e, E>(
    executor: E,
    id: &InvitationId,
) -> Result<Option<InvitationRow>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, InvitationRow>(&format!(
        "SELECT {COLUMNS} FROM organization_invitations WHERE id = ?"
    ))
    .bind(id.as_str())
    .fetch_optional(executor)
    .await
}

/// Find the open (status = 'pending') invitation for an (organization,
/// invitee) pair. At most one exists, enforced by the partial unique index.
pub async fn find_open<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    invitee_id: &UserId,
) -> Result<Option<InvitationRow>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, InvitationRow>(&format!(
        "SELECT {COLUMNS} FROM organization_invitations WHERE organization_id = ? AND invitee_id = ? AND status = 'pending'"
    ))
    .bind(organization_id.as_str())
    .bind(invitee_id.as_str())
    .fetch_optional(executor)
    .await
}

/// Move an invitation to a new status, recording an optional response
/// message. Returns the number of rows updated.
pub async fn update_status<'e, E>(
    executor: E,
    id: &InvitationId,
    status: &str,
    response_message: Option<&str>,
) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE organization_invitations SET status = ?, response_message = ? WHERE id = ?",
    )
    .bind(status)
    .bind(response_message)
    .bind(id.as_str())
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Guarded accept: only fires while the row is still 'pending'. Returns the
/// number of rows updated; 0 means another caller got there first.
pub async fn mark_accepted_if_pending<'e, E>(
    executor: E,
    id: &InvitationId,
    response_message: Option<&str>,
) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE organization_invitations SET status = 'accepted', response_message = ? WHERE id = ? AND status = 'pending'",
    )
    .bind(response_message)
    .bind(id.as_str())
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Re-arm an invitation: back to 'pending' with a fresh window and no prior
/// response. Same identity, reset clock.
pub async fn rearm<'e, E>(
    executor: E,
    id: &InvitationId,
    created_at: i64,
    expires_at: i64,
) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE organization_invitations SET status = 'pending', response_message = NULL, created_at = ?, expires_at = ? WHERE id = ?",
    )
    .bind(created_at)
    .bind(expires_at)
    .bind(id.as_str())
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// List invitations for an organization, optionally filtered by status,
/// newest first.
pub async fn list_for_org<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    status: Option<&str>,
) -> Result<Vec<InvitationRow>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    match status {
        Some(status) => {
            sqlx::query_as::<_, InvitationRow>(&format!(
                "SELECT {COLUMNS} FROM organization_invitations WHERE organization_id = ? AND status = ? ORDER BY created_at DESC"
            ))
            .bind(organization_id.as_str())
            .bind(status)
            .fetch_all(executor)
            .await
        }
        None => {
            sqlx::query_as::<_, InvitationRow>(&format!(
                "SELECT {COLUMNS} FROM organization_invitations WHERE organization_id = ? ORDER BY created_at DESC"
            ))
            .bind(organization_id.as_str())
            .fetch_all(executor)
            .await
        }
    }
}
