//! Navigation handler
//!
//! Returns the sidebar entries visible to the current user. The entries and
//! the route guards both derive from the same role-to-permission table, so
//! the links shown and the routes allowed cannot disagree.

use crate::auth::CurrentUser;
use crate::AppState;
use axum::{extract::State, response::Json};
use mediboard_applications::{auth::Allow, AccessContext, Permission};
use serde::Serialize;

/// One sidebar entry
#[derive(Debug, Clone, Serialize)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<Permission>,
}

/// The full sidebar, before permission filtering
const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry {
        label: "Dashboard",
        path: "/",
        required_permission: Some(Permission::ViewDashboard),
    },
    NavEntry {
        label: "Patients",
        path: "/patients",
        required_permission: Some(Permission::ViewPatients),
    },
    NavEntry {
        label: "Appointments",
        path: "/appointments",
        required_permission: Some(Permission::ViewAppointments),
    },
    NavEntry {
        label: "Health Records",
        path: "/ehr",
        required_permission: Some(Permission::ViewEhr),
    },
    NavEntry {
        label: "Lab Tests",
        path: "/lab",
        required_permission: Some(Permission::ViewLabTests),
    },
    NavEntry {
        label: "Pharmacy",
        path: "/pharmacy",
        required_permission: Some(Permission::ViewPharmacy),
    },
    NavEntry {
        label: "Billing",
        path: "/billing",
        required_permission: Some(Permission::ViewBilling),
    },
    NavEntry {
        label: "Inventory",
        path: "/inventory",
        required_permission: Some(Permission::ViewInventory),
    },
    NavEntry {
        label: "Settings",
        path: "/settings",
        required_permission: Some(Permission::ViewSystemSettings),
    },
    NavEntry {
        label: "Help & Support",
        path: "/help",
        required_permission: None,
    },
];

/// Sidebar entries visible to a given context
pub fn visible_entries(ctx: &AccessContext) -> Vec<NavEntry> {
    NAV_ENTRIES
        .iter()
        .filter(|entry| match entry.required_permission {
            Some(permission) => Allow::permission(permission).renders(ctx),
            None => true,
        })
        .cloned()
        .collect()
}

/// Navigation endpoint; requires an authenticated session
pub async fn navigation(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Json<Vec<NavEntry>> {
    let ctx = state.context().await;
    Json(visible_entries(&ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediboard_applications::StaffDirectory;

    fn context_for(email: &str) -> AccessContext {
        let directory = StaffDirectory::new();
        AccessContext::authenticated(directory.find_by_email(email).unwrap().clone())
    }

    #[test]
    fn administrator_sees_every_entry() {
        let entries = visible_entries(&context_for("admin@hospital.com"));
        assert_eq!(entries.len(), NAV_ENTRIES.len());
    }

    #[test]
    fn lab_technician_sees_a_narrow_sidebar() {
        let entries = visible_entries(&context_for("lab@hospital.com"));
        let labels: Vec<&str> = entries.iter().map(|e| e.label).collect();

        assert_eq!(labels, vec!["Dashboard", "Lab Tests", "Help & Support"]);
    }

    #[test]
    fn unpermissioned_entries_survive_for_everyone() {
        let entries = visible_entries(&context_for("patient@hospital.com"));
        assert!(entries.iter().any(|e| e.label == "Help & Support"));
    }
}
