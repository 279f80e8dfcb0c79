use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Coarse membership tier. Consulted only by the task-assignment policy;
/// deliberately kept separate from [`OrganizationRole`](super::OrganizationRole).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum MembershipTier {
    Owner,
    Admin,
    Member,
}
