//! Static role catalog: display metadata and seniority ranks.
//!
//! **Rule**: an unrecognized role string maps to the lowest-rank entry,
//! never to elevated privilege and never to a panic. The raw string is
//! frequently data-corruption- or attacker-controlled display input.

use crate::app::domain::OrganizationRole;

/// Display metadata and rank for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInfo {
    pub role: OrganizationRole,
    pub display_name: &'static str,
    /// Presentation-only category tag.
    pub color_tag: &'static str,
    /// Presentation-only icon name.
    pub icon: &'static str,
    /// Seniority: higher outranks lower. Viewer is 0.
    pub rank: u8,
}

const CATALOG: [RoleInfo; 5] = [
    RoleInfo {
        role: OrganizationRole::SuperAdmin,
        display_name: "Super Admin",
        color_tag: "purple",
        icon: "shield",
        rank: 4,
    },
    RoleInfo {
        role: OrganizationRole::Admin,
        display_name: "Admin",
        color_tag: "red",
        icon: "star",
        rank: 3,
    },
    RoleInfo {
        role: OrganizationRole::Manager,
        display_name: "Manager",
        color_tag: "blue",
        icon: "briefcase",
        rank: 2,
    },
    RoleInfo {
        role: OrganizationRole::Member,
        display_name: "Member",
        color_tag: "green",
        icon: "user",
        rank: 1,
    },
    RoleInfo {
        role: OrganizationRole::Viewer,
        display_name: "Viewer",
        color_tag: "gray",
        icon: "eye",
        rank: 0,
    },
];

/// Catalog entry for a known role.
pub fn entry(role: OrganizationRole) -> &'static RoleInfo {
    CATALOG
        .iter()
        .find(|info| info.role == role)
        .unwrap_or(&CATALOG[4])
}

/// Catalog entry for a raw role string. Unknown input maps to the Viewer entry.
pub fn describe(raw: &str) -> &'static RoleInfo {
    entry(OrganizationRole::parse_or_lowest(raw))
}

/// Seniority rank of a role. Higher outranks lower.
pub fn rank(role: OrganizationRole) -> u8 {
    entry(role).rank
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_role_has_a_catalog_entry() {
        for role in OrganizationRole::iter() {
            assert_eq!(entry(role).role, role);
        }
    }

    #[test]
    fn describe_known_role() {
        let info = describe("admin");
        assert_eq!(info.role, OrganizationRole::Admin);
        assert_eq!(info.display_name, "Admin");
    }

    #[test]
    fn describe_unknown_role_falls_back_to_viewer() {
        let info = describe("definitely-not-a-role");
        assert_eq!(info.role, OrganizationRole::Viewer);
        assert_eq!(info.rank, 0);
    }

    #[test]
    fn describe_is_idempotent() {
        assert_eq!(describe("manager"), describe("manager"));
        assert_eq!(describe("garbage"), describe("garbage"));
    }

    #[test]
    fn rank_orders_seniority() {
        assert!(rank(OrganizationRole::SuperAdmin) > rank(OrganizationRole::Admin));
        assert!(rank(OrganizationRole::Admin) > rank(OrganizationRole::Manager));
        assert!(rank(OrganizationRole::Manager) > rank(OrganizationRole::Member));
        assert!(rank(OrganizationRole::Member) > rank(OrganizationRole::Viewer));
    }
}
