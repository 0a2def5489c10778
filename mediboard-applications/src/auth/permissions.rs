//! Permission System
//!
//! Capability tokens and the static role-to-permission table. The table is
//! configuration, not runtime state: it is built once at startup, read-only,
//! defined for every role, and the administrator set covers every token.

use super::roles::Role;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Specific capabilities that can be granted to roles
///
/// Each token names a resource plus an action on it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewDashboard,
    ViewOwnProfile,
    ViewOtherProfiles,
    ManagePatients,
    ViewPatients,
    ViewOwnPatients,
    ManageAppointments,
    ViewAppointments,
    ManagePrescriptions,
    ViewPrescriptions,
    ManageLabTests,
    ViewLabTests,
    ManageVitalSigns,
    ViewVitalSigns,
    ManagePharmacy,
    ViewPharmacy,
    ManageBilling,
    ViewBilling,
    ManageInventory,
    ViewInventory,
    ManageEhr,
    ViewEhr,
    ManageUsers,
    ViewUsers,
    ManageSystemSettings,
    ViewSystemSettings,
    ManageDischargeSummaries,
    ViewDischargeSummaries,
    ManageNursingNotes,
    ViewNursingNotes,
}

/// Every permission token in the system
pub const ALL_PERMISSIONS: [Permission; 30] = [
    Permission::ViewDashboard,
    Permission::ViewOwnProfile,
    Permission::ViewOtherProfiles,
    Permission::ManagePatients,
    Permission::ViewPatients,
    Permission::ViewOwnPatients,
    Permission::ManageAppointments,
    Permission::ViewAppointments,
    Permission::ManagePrescriptions,
    Permission::ViewPrescriptions,
    Permission::ManageLabTests,
    Permission::ViewLabTests,
    Permission::ManageVitalSigns,
    Permission::ViewVitalSigns,
    Permission::ManagePharmacy,
    Permission::ViewPharmacy,
    Permission::ManageBilling,
    Permission::ViewBilling,
    Permission::ManageInventory,
    Permission::ViewInventory,
    Permission::ManageEhr,
    Permission::ViewEhr,
    Permission::ManageUsers,
    Permission::ViewUsers,
    Permission::ManageSystemSettings,
    Permission::ViewSystemSettings,
    Permission::ManageDischargeSummaries,
    Permission::ViewDischargeSummaries,
    Permission::ManageNursingNotes,
    Permission::ViewNursingNotes,
];

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Permission::ViewDashboard => "view_dashboard",
            Permission::ViewOwnProfile => "view_own_profile",
            Permission::ViewOtherProfiles => "view_other_profiles",
            Permission::ManagePatients => "manage_patients",
            Permission::ViewPatients => "view_patients",
            Permission::ViewOwnPatients => "view_own_patients",
            Permission::ManageAppointments => "manage_appointments",
            Permission::ViewAppointments => "view_appointments",
            Permission::ManagePrescriptions => "manage_prescriptions",
            Permission::ViewPrescriptions => "view_prescriptions",
            Permission::ManageLabTests => "manage_lab_tests",
            Permission::ViewLabTests => "view_lab_tests",
            Permission::ManageVitalSigns => "manage_vital_signs",
            Permission::ViewVitalSigns => "view_vital_signs",
            Permission::ManagePharmacy => "manage_pharmacy",
            Permission::ViewPharmacy => "view_pharmacy",
            Permission::ManageBilling => "manage_billing",
            Permission::ViewBilling => "view_billing",
            Permission::ManageInventory => "manage_inventory",
            Permission::ViewInventory => "view_inventory",
            Permission::ManageEhr => "manage_ehr",
            Permission::ViewEhr => "view_ehr",
            Permission::ManageUsers => "manage_users",
            Permission::ViewUsers => "view_users",
            Permission::ManageSystemSettings => "manage_system_settings",
            Permission::ViewSystemSettings => "view_system_settings",
            Permission::ManageDischargeSummaries => "manage_discharge_summaries",
            Permission::ViewDischargeSummaries => "view_discharge_summaries",
            Permission::ManageNursingNotes => "manage_nursing_notes",
            Permission::ViewNursingNotes => "view_nursing_notes",
        };
        write!(f, "{}", token)
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_PERMISSIONS
            .iter()
            .find(|p| p.to_string() == s.to_lowercase())
            .copied()
            .ok_or_else(|| format!("Unknown permission: {}", s))
    }
}

/// The static role-to-permission table
///
/// Total over `Role`: looking up any role yields a non-empty set. The
/// administrator entry grants every token in `ALL_PERMISSIONS`.
static ROLE_PERMISSIONS: LazyLock<HashMap<Role, HashSet<Permission>>> = LazyLock::new(|| {
    use Permission::*;

    let mut map = HashMap::new();

    map.insert(
        Role::Patient,
        [
            ViewDashboard,
            ViewOwnProfile,
            ViewAppointments,
            ViewPrescriptions,
            ViewLabTests,
            ViewVitalSigns,
            ViewBilling,
            // Patients can request and reschedule their own appointments
            ManageAppointments,
        ]
        .into_iter()
        .collect(),
    );

    map.insert(
        Role::Doctor,
        [
            ViewDashboard,
            ViewOwnProfile,
            ViewOwnPatients,
            ViewAppointments,
            ManagePrescriptions,
            ManageLabTests,
            ManageVitalSigns,
            ManageDischargeSummaries,
            ManageEhr,
            ViewEhr,
            ViewVitalSigns,
            ViewNursingNotes,
        ]
        .into_iter()
        .collect(),
    );

    map.insert(
        Role::Nurse,
        [
            ViewDashboard,
            ViewOwnProfile,
            ViewVitalSigns,
            ManageVitalSigns,
            ManageNursingNotes,
            ViewNursingNotes,
            ViewEhr,
            ViewAppointments,
        ]
        .into_iter()
        .collect(),
    );

    map.insert(
        Role::LabTechnician,
        [ViewDashboard, ViewOwnProfile, ViewLabTests, ManageLabTests]
            .into_iter()
            .collect(),
    );

    map.insert(
        Role::Pharmacist,
        [
            ViewDashboard,
            ViewOwnProfile,
            ViewPrescriptions,
            ManagePharmacy,
            ViewPharmacy,
            ViewInventory,
            ManageInventory,
        ]
        .into_iter()
        .collect(),
    );

    map.insert(
        Role::Receptionist,
        [
            ViewDashboard,
            ViewOwnProfile,
            ViewPatients,
            ManagePatients,
            ManageAppointments,
            ViewAppointments,
            ViewOtherProfiles,
        ]
        .into_iter()
        .collect(),
    );

    map.insert(
        Role::Billing,
        [
            ViewDashboard,
            ViewOwnProfile,
            ViewBilling,
            ManageBilling,
            ViewPatients,
            ViewInventory,
        ]
        .into_iter()
        .collect(),
    );

    // Full-access invariant: the administrator holds every token
    map.insert(Role::Administrator, ALL_PERMISSIONS.into_iter().collect());

    map
});

/// Permissions granted to a role
pub fn permissions_for(role: Role) -> &'static HashSet<Permission> {
    // The table is total over Role; a missing entry would be a construction bug
    &ROLE_PERMISSIONS[&role]
}

/// Check whether a role holds a specific permission
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}

/// Check whether a role holds at least one of the given permissions
pub fn has_any_permission(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(role, *p))
}

/// Check whether a role holds every one of the given permissions
pub fn has_all_permissions(role: Role, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(role, *p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles::ALL_ROLES;

    #[test]
    fn table_is_total_and_non_empty() {
        for role in ALL_ROLES {
            assert!(
                !permissions_for(role).is_empty(),
                "role {} maps to an empty permission set",
                role
            );
        }
    }

    #[test]
    fn administrator_holds_every_permission() {
        assert!(has_all_permissions(
            Role::Administrator,
            &ALL_PERMISSIONS
        ));
    }

    #[test]
    fn permission_tokens_round_trip() {
        for permission in ALL_PERMISSIONS {
            let token = permission.to_string();
            let parsed: Permission = token.parse().unwrap();
            assert_eq!(parsed, permission);
        }
    }

    #[test]
    fn nurse_cannot_manage_billing() {
        assert!(!has_permission(Role::Nurse, Permission::ManageBilling));
        assert!(has_permission(Role::Nurse, Permission::ManageVitalSigns));
    }
}
