//! Permission evaluation: maps (actor, entity, action, permission, role) to
//! an allow/deny decision.
//!
//! `evaluate` is the single source of truth; the `can_*` helpers are
//! pass-throughs that only bind the (entity, action) pair. Out-of-range
//! level/entity/action values are caught once, in [`Permission::from_record`],
//! and always deny.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::app::domain::{OrganizationRole, UserId};
use crate::app::error::CoreError;

/// Entity a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntityKind {
    Projects,
    Tasks,
    Organizations,
}

/// Action a permission grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Create,
    Read,
    Update,
    Delete,
    Assign,
    ManageMembers,
    ChangeStatus,
}

/// Who a permission applies to: nobody, a named subset, or all actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PermissionLevel {
    None,
    Specific,
    All,
}

/// One permission record: (entity, action, level, optional authorized set).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub entity: EntityKind,
    pub action: ActionKind,
    pub level: PermissionLevel,
    /// Authoritative when `level == Specific`; ignored otherwise.
    #[serde(default)]
    pub specific_users: Vec<UserId>,
}

impl Permission {
    pub fn new(entity: EntityKind, action: ActionKind, level: PermissionLevel) -> Self {
        Self {
            entity,
            action,
            level,
            specific_users: Vec::new(),
        }
    }

    pub fn with_users(mut self, users: Vec<UserId>) -> Self {
        self.specific_users = users;
        self
    }

    /// Build a permission from stored string parts. This is the one place an
    /// out-of-range value can appear; it becomes a configuration fault and
    /// the permission is never constructed (fail closed).
    pub fn from_record(
        entity: &str,
        action: &str,
        level: &str,
        specific_users: Vec<UserId>,
    ) -> Result<Self, CoreError> {
        let entity: EntityKind = entity.parse().map_err(|_| {
            tracing::error!(%entity, "unknown permission entity");
            CoreError::Configuration(format!("unknown permission entity '{entity}'"))
        })?;
        let action: ActionKind = action.parse().map_err(|_| {
            tracing::error!(%action, "unknown permission action");
            CoreError::Configuration(format!("unknown permission action '{action}'"))
        })?;
        let level: PermissionLevel = level.parse().map_err(|_| {
            tracing::error!(%level, "unknown permission level");
            CoreError::Configuration(format!("unknown permission level '{level}'"))
        })?;
        Ok(Self {
            entity,
            action,
            level,
            specific_users,
        })
    }
}

/// Evaluate whether `actor` may perform `action` on `entity` under
/// `permission`, given their role. Pure; identical inputs give identical
/// output.
///
/// Order is load-bearing: the super-admin bypass precedes every other check
/// and cannot be overridden by a `none` level.
pub fn evaluate(
    actor: &UserId,
    entity: EntityKind,
    action: ActionKind,
    permission: &Permission,
    role: OrganizationRole,
) -> bool {
    if role.is_super() {
        return true;
    }

    // A permission only grants the (entity, action) pair it names.
    if permission.entity != entity || permission.action != action {
        return false;
    }

    match permission.level {
        PermissionLevel::None => false,
        PermissionLevel::All => true,
        PermissionLevel::Specific => permission.specific_users.contains(actor),
    }
}

/// Typed-failure wrapper: `Err(Authorization)` on denial, for callers that
/// want "forbidden" distinguishable from transport problems.
pub fn authorize(
    actor: &UserId,
    entity: EntityKind,
    action: ActionKind,
    permission: &Permission,
    role: OrganizationRole,
) -> Result<(), CoreError> {
    if evaluate(actor, entity, action, permission, role) {
        Ok(())
    } else {
        Err(CoreError::Authorization(format!(
            "{action} on {entity} denied for user {actor}"
        )))
    }
}

pub fn can_create_project(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Projects, ActionKind::Create, p, role)
}

pub fn can_delete_project(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Projects, ActionKind::Delete, p, role)
}

pub fn can_read_task(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Tasks, ActionKind::Read, p, role)
}

pub fn can_update_task(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Tasks, ActionKind::Update, p, role)
}

pub fn can_assign_task(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Tasks, ActionKind::Assign, p, role)
}

pub fn can_change_task_status(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Tasks, ActionKind::ChangeStatus, p, role)
}

pub fn can_manage_members(actor: &UserId, p: &Permission, role: OrganizationRole) -> bool {
    evaluate(actor, EntityKind::Organizations, ActionKind::ManageMembers, p, role)
}
