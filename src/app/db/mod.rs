pub mod invitations;
pub mod memberships;
