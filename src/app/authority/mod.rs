use crate::app::domain::{
    Email, Invitation, InvitationId, InvitationStatus, Membership, OrganizationId,
    OrganizationRole, UserId,
};

/// Parameters for creating an invitation. Status is always `Pending`.
#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub id: InvitationId,
    pub organization_id: OrganizationId,
    pub inviter_id: UserId,
    pub invitee_id: UserId,
    pub invitee_email: Option<Email>,
    pub role: OrganizationRole,
    pub message: Option<String>,
    pub created_at: i64,
    pub expires_at: i64,
}

/// Filter for listing invitations. Always organization-scoped.
#[derive(Debug, Clone)]
pub struct InvitationFilter {
    pub organization_id: OrganizationId,
    pub status: Option<InvitationStatus>,
}

/// Errors that can occur at the authority boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// Storage-level failure. Treated as a transport fault by callers.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Authority unreachable.
    #[error("authority transport error: {0}")]
    Transport(String),

    /// The record a mutation targets does not exist.
    #[error("record not found")]
    NotFound,

    /// Another caller changed the record's state first.
    #[error("state conflict: {0}")]
    Conflict(String),

    /// A stored value failed to parse. Never silently becomes valid state.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Abstract interface to the membership/invitation authority. Swappable per
/// environment; the production implementation is SQLite-backed, tests may
/// inject failing doubles.
///
/// Only the access resolver may convert an error from this trait into a
/// default decision; every other caller propagates it.
#[async_trait::async_trait]
pub trait Authority: Send + Sync {
    /// Membership record for a (organization, user) pair, active or not.
    async fn membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, AuthorityError>;

    /// Create or reactivate a membership with the given role.
    async fn upsert_membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        role: OrganizationRole,
    ) -> Result<Membership, AuthorityError>;

    /// Soft removal: flip the membership inactive, keep the record.
    async fn deactivate_membership(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
    ) -> Result<(), AuthorityError>;

    /// Persist a new pending invitation. Fails with `Conflict` if an open
    /// invitation already exists for the same (organization, invitee) pair.
    async fn create_invitation(&self, record: &NewInvitation) -> Result<Invitation, AuthorityError>;

    /// Fetch an invitation by id.
    async fn invitation(&self, id: &InvitationId) -> Result<Option<Invitation>, AuthorityError>;

    /// Move an invitation to a new status with an optional response message.
    async fn update_invitation_status(
        &self,
        id: &InvitationId,
        status: InvitationStatus,
        response_message: Option<String>,
    ) -> Result<Invitation, AuthorityError>;

    /// Re-arm an invitation back to pending: fresh created_at/expires_at,
    /// response message cleared, same identity.
    async fn rearm_invitation(
        &self,
        id: &InvitationId,
        created_at: i64,
        expires_at: i64,
    ) -> Result<Invitation, AuthorityError>;

    /// Atomic accept: the status transition and the membership upsert commit
    /// or fail as one unit. Fails with `Conflict` if the invitation is no
    /// longer pending at write time.
    async fn accept_invitation(
        &self,
        id: &InvitationId,
        response_message: Option<String>,
    ) -> Result<(Invitation, Membership), AuthorityError>;

    /// Open (pending) invitation for a (organization, invitee) pair, if any.
    async fn open_invitation(
        &self,
        organization_id: &OrganizationId,
        invitee_id: &UserId,
    ) -> Result<Option<Invitation>, AuthorityError>;

    /// List invitations matching a filter.
    async fn list_invitations(
        &self,
        filter: &InvitationFilter,
    ) -> Result<Vec<Invitation>, AuthorityError>;
}

pub use sqlite::SqliteAuthority;

mod sqlite;
