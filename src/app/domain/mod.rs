pub mod email;
pub mod invitation;
pub mod invitation_id;
pub mod invitation_status;
pub mod membership;
pub mod membership_tier;
pub mod organization_id;
pub mod organization_role;
pub mod user_id;

pub use email::Email;
pub use invitation::Invitation;
pub use invitation_id::InvitationId;
pub use invitation_status::InvitationStatus;
pub use membership::Membership;
pub use membership_tier::MembershipTier;
pub use organization_id::OrganizationId;
pub use organization_role::OrganizationRole;
pub use user_id::UserId;
