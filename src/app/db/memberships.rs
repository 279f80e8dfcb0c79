use sqlx::{FromRow, SqliteExecutor};

use crate::app::domain::{OrganizationId, OrganizationRole, UserId};

/// Database row for organization_memberships table.
#[derive(Debug, FromRow)]
pub struct MembershipRow {
    pub organization_id: String,
    pub user_id: String,
    pub role: String,
    pub joined_at: i64,
    pub is_active: i64,
}

/// Find a membership record, active or not.
pub async fn find<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    user_id: &UserId,
) -> Result<Option<MembershipRow>, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, MembershipRow>(
        "SELECT organization_id, user_id, role, joined_at, is_active FROM organization_memberships WHERE organization_id = ? AND user_id = ?",
    )
    .bind(organization_id.as_str())
    .bind(user_id.as_str())
    .fetch_optional(executor)
    .await
}

/// Create or reactivate a membership. The historical record is retained:
/// a reactivated member keeps the original joined_at.
pub async fn upsert<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    user_id: &UserId,
    role: OrganizationRole,
    now: i64,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO organization_memberships (organization_id, user_id, role, joined_at, is_active) VALUES (?, ?, ?, ?, 1) \
         ON CONFLICT(organization_id, user_id) DO UPDATE SET role = excluded.role, is_active = 1",
    )
    .bind(organization_id.as_str())
    .bind(user_id.as_str())
    .bind(role.to_string())
    .bind(now)
    .execute(executor)
    .await?;
    Ok(())
}

/// Soft removal: flip is_active off, keep the row.
pub async fn deactivate<'e, E>(
    executor: E,
    organization_id: &OrganizationId,
    user_id: &UserId,
) -> Result<u64, sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        "UPDATE organization_memberships SET is_active = 0 WHERE organization_id = ? AND user_id = ?",
    )
    .bind(organization_id.as_str())
    .bind(user_id.as_str())
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
