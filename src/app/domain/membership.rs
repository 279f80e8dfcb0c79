use serde::{Deserialize, Serialize};

use super::{OrganizationId, OrganizationRole, UserId};

/// One (user, organization) membership. Created at invitation acceptance or
/// organization creation; `is_active` toggles false on removal but the record
/// itself is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub organization_id: OrganizationId,
    pub user_id: UserId,
    pub role: OrganizationRole,
    /// Unix timestamp (seconds).
    pub joined_at: i64,
    pub is_active: bool,
}
