//! Task-assignment rules, layered on the coarse membership tier.
//!
//! Owners may not assign to themselves; every other tier may assign to
//! anyone, including themselves. The asymmetry is intentional (owners
//! delegate) and must not be "fixed" into symmetry.

use crate::app::domain::{MembershipTier, UserId};

/// One entry in an assignee picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignee {
    pub id: UserId,
    pub display_name: String,
}

/// Whether `assigner` may assign a task to `assignee`.
pub fn can_assign(assigner: &UserId, assignee: &UserId, assigner_tier: MembershipTier) -> bool {
    !(assigner_tier == MembershipTier::Owner && assigner == assignee)
}

/// List-level form of [`can_assign`]: an owner's own id is excluded from the
/// result; every other tier receives the input unchanged.
pub fn available_assignees(
    users: Vec<Assignee>,
    assigner: &UserId,
    assigner_tier: MembershipTier,
) -> Vec<Assignee> {
    if assigner_tier != MembershipTier::Owner {
        return users;
    }
    users.into_iter().filter(|u| &u.id != assigner).collect()
}
