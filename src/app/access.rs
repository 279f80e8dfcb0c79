//! Effective-role resolution for a (organization, user) pair.
//!
//! **Rule**: when the authority cannot be consulted, degrade to
//! least-privilege membership instead of hard-failing the caller. The
//! organization list shown to the user was already access-filtered upstream,
//! so a transport failure on this finer-grained check must not block all
//! functionality. The fallback never grants a role above `Member`.

use std::sync::Arc;

use crate::app::authority::Authority;
use crate::app::domain::{OrganizationId, OrganizationRole, UserId};
use crate::app::error::CoreError;

/// Ephemeral access decision. Never persisted; safe to duplicate across
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct AccessDecision {
    pub can_access: bool,
    pub role: Option<OrganizationRole>,
    pub reason: String,
}

impl AccessDecision {
    fn allow(role: OrganizationRole, reason: &str) -> Self {
        Self {
            can_access: true,
            role: Some(role),
            reason: reason.to_string(),
        }
    }

    fn deny(reason: &str) -> Self {
        Self {
            can_access: false,
            role: None,
            reason: reason.to_string(),
        }
    }
}

/// Resolves a user's effective role in an organization.
#[derive(Clone)]
pub struct AccessResolver {
    authority: Arc<dyn Authority>,
}

impl AccessResolver {
    pub fn new(authority: Arc<dyn Authority>) -> Self {
        Self { authority }
    }

    /// Resolve with the documented degrade-to-member fallback. This is the
    /// only place a transport failure becomes a default decision.
    pub async fn resolve(&self, organization_id: &OrganizationId, user_id: &UserId) -> AccessDecision {
        match self.authority.membership(organization_id, user_id).await {
            Ok(Some(m)) if m.is_active => {
                AccessDecision::allow(m.role, "active membership verified")
            }
            Ok(Some(_)) => AccessDecision::deny("membership is inactive"),
            Ok(None) => AccessDecision::deny("no membership in this organization"),
            Err(err) => {
                tracing::warn!(%err, %organization_id, %user_id, "authority unreachable, assuming member access");
                AccessDecision::allow(
                    OrganizationRole::Member,
                    "access assumed, not verified: authority unreachable",
                )
            }
        }
    }

    /// Resolve without the fallback: transport failures propagate. Used by
    /// the invitation lifecycle, which must surface authority errors.
    pub async fn resolve_strict(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<AccessDecision, CoreError> {
        match self.authority.membership(organization_id, user_id).await? {
            Some(m) if m.is_active => Ok(AccessDecision::allow(m.role, "active membership verified")),
            Some(_) => Ok(AccessDecision::deny("membership is inactive")),
            None => Ok(AccessDecision::deny("no membership in this organization")),
        }
    }
}
