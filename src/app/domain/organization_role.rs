use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Fine-grained organization role. Used for display and permission checks.
///
/// Distinct from [`MembershipTier`](super::MembershipTier), which is the
/// coarse tier consulted only by the assignment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")] // Serialize as snake_case string
#[strum(serialize_all = "snake_case")] // Display/FromStr as snake_case string
pub enum OrganizationRole {
    SuperAdmin,
    Admin,
    Manager,
    Member,
    Viewer,
}

impl OrganizationRole {
    /// Parse a stored/displayed role string. Unknown values fall back to the
    /// least-privileged role, never to elevated privilege — this input is
    /// frequently data-corruption- or attacker-controlled.
    pub fn parse_or_lowest(raw: &str) -> Self {
        raw.parse().unwrap_or(OrganizationRole::Viewer)
    }

    /// The role that bypasses all permission-level checks.
    pub fn is_super(self) -> bool {
        matches!(self, OrganizationRole::SuperAdmin)
    }
}
