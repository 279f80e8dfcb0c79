//! Integration tests for effective-role resolution, including the
//! degrade-to-member fallback when the authority is unreachable.

use std::sync::Arc;

use time::OffsetDateTime;

mod common;

use crate::common::*;

use orggate::app::access::AccessResolver;
use orggate::app::authority::{
    Authority, AuthorityError, InvitationFilter, NewInvitation,
};
use orggate::app::db;
use orggate::app::domain::{
    Invitation, InvitationId, InvitationStatus, Membership, OrganizationId, OrganizationRole,
    UserId,
};
use orggate::app::error::CoreError;

#[tokio::test]
async fn resolve_returns_the_stored_role_for_an_active_member() {
    let pool = test_pool().await;
    let core = test_core(pool.clone());

    let org = OrganizationId::new();
    let user = UserId::new();
    let now = OffsetDateTime::now_utc().unix_timestamp();
    db::memberships::upsert(&pool, &org, &user, OrganizationRole::Admin, now)
        .await
        .unwrap();

    let decision = core.access.resolve(&org, &user).await;
    assert!(decision.can_access);
    assert_eq!(decision.role, Some(OrganizationRole::Admin));
}

#[tokio::test]
async fn resolve_denies_a_user_with_no_membership() {
    let pool = test_pool().await;
    let core = test_core(pool);

    let decision = core.access.resolve(&OrganizationId::new(), &UserId::new()).await;
    assert!(!decision.can_access);
    assert!(decision.role.is_none());
}

#[tokio::test]
async fn resolve_denies_an_inactive_membership() {
    let pool = test_pool().await;
    let core = test_core(pool.clone());

    let org = OrganizationId::new();
    let user = UserId::new();
    let now = OffsetDateTime::now_utc().unix_timestamp();
    db::memberships::upsert(&pool, &org, &user, OrganizationRole::Member, now)
        .await
        .unwrap();
    db::memberships::deactivate(&pool, &org, &user).await.unwrap();

    let decision = core.access.resolve(&org, &user).await;
    assert!(!decision.can_access);
    assert!(decision.role.is_none());
}

#[tokio::test]
async fn resolve_is_idempotent_without_state_change() {
    let pool = test_pool().await;
    let core = test_core(pool.clone());

    let org = OrganizationId::new();
    let user = UserId::new();
    let now = OffsetDateTime::now_utc().unix_timestamp();
    db::memberships::upsert(&pool, &org, &user, OrganizationRole::Manager, now)
        .await
        .unwrap();

    let first = core.access.resolve(&org, &user).await;
    let second = core.access.resolve(&org, &user).await;
    assert_eq!(first.can_access, second.can_access);
    assert_eq!(first.role, second.role);
    assert_eq!(first.reason, second.reason);
}

/// Authority double whose every operation fails with a transport error.
struct UnreachableAuthority;

fn transport_err() -> AuthorityError {
    AuthorityError::Transport("connection refused".to_string())
}

#[async_trait::async_trait]
impl Authority for UnreachableAuthority {
    async fn membership(
        &self,
        _organization_id: &OrganizationId,
        _user_id: &UserId,
    ) -> Result<Option<Membership>, AuthorityError> {
        Err(transport_err())
    }

    async fn upsert_membership(
        &self,
        _organization_id: &OrganizationId,
        _user_id: &UserId,
        _role: OrganizationRole,
    ) -> Result<Membership, AuthorityError> {
        Err(transport_err())
    }

    async fn deactivate_membership(
        &self,
        _organization_id: &OrganizationId,
        _user_id: &UserId,
    ) -> Result<(), AuthorityError> {
        Err(transport_err())
    }

    async fn create_invitation(
        &self,
        _record: &NewInvitation,
    ) -> Result<Invitation, AuthorityError> {
        Err(transport_err())
    }

    async fn invitation(&self, _id: &InvitationId) -> Result<Option<Invitation>, AuthorityError> {
        Err(transport_err())
    }

    async fn update_invitation_status(
        &self,
        _id: &InvitationId,
        _status: InvitationStatus,
        _response_message: Option<String>,
    ) -> Result<Invitation, AuthorityError> {
        Err(transport_err())
    }

    async fn rearm_invitation(
        &self,
        _id: &InvitationId,
        _created_at: i64,
        _expires_at: i64,
    ) -> Result<Invitation, AuthorityError> {
        Err(transport_err())
    }

    async fn accept_invitation(
        &self,
        _id: &InvitationId,
        _response_message: Option<String>,
    ) -> Result<(Invitation, Membership), AuthorityError> {
        Err(transport_err())
    }

    async fn open_invitation(
        &self,
        _organization_id: &OrganizationId,
        _invitee_id: &UserId,
    ) -> Result<Option<Invitation>, AuthorityError> {
        Err(transport_err())
    }

    async fn list_invitations(
        &self,
        _filter: &InvitationFilter,
    ) -> Result<Vec<Invitation>, AuthorityError> {
        Err(transport_err())
    }
}

#[tokio::test]
async fn unreachable_authority_degrades_to_assumed_member_access() {
    let resolver = AccessResolver::new(Arc::new(UnreachableAuthority));

    let decision = resolver.resolve(&OrganizationId::new(), &UserId::new()).await;
    assert!(decision.can_access);
    assert_eq!(
        decision.role,
        Some(OrganizationRole::Member),
        "fallback must never grant above the least-privileged membership tier"
    );
    assert!(
        decision.reason.contains("assumed"),
        "reason must say the decision was assumed, got: {}",
        decision.reason
    );
}

#[tokio::test]
async fn resolve_strict_propagates_transport_failures() {
    let resolver = AccessResolver::new(Arc::new(UnreachableAuthority));

    let err = resolver
        .resolve_strict(&OrganizationId::new(), &UserId::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Transport(_)));
}

#[tokio::test]
async fn lifecycle_calls_propagate_transport_failures_unchanged() {
    use orggate::app::config::Config;
    use orggate::app::invitations::InvitationLifecycle;

    let lifecycle = InvitationLifecycle::new(Arc::new(UnreachableAuthority), Config::for_tests());

    let err = lifecycle
        .create(invite_request(
            &OrganizationId::new(),
            &UserId::new(),
            &UserId::new(),
            "member",
        ))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CoreError::Transport(_)),
        "only the resolver fallback may absorb transport errors"
    );
}
