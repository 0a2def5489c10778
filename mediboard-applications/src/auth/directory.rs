//! Staff Identity and Directory
//!
//! Defines the authenticated user record and the static demo-account
//! directory that backs the mock login. The directory is the only
//! credential source in the system; a login matches when the email is
//! known and the supplied password is non-empty.

use super::roles::{Role, ALL_ROLES};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Password shown next to every demo account on the login page.
///
/// The mock backend does not verify it; any non-empty password is accepted
/// for a known email.
pub const DEMO_PASSWORD: &str = "password123";

/// An authenticated hospital user
///
/// Created by the session store at login and destroyed at logout. The role
/// is fixed for the lifetime of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffUser {
    /// Opaque user identifier
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Job-function role
    pub role: Role,
    /// Department (optional)
    pub department: Option<String>,
    /// Avatar glyph (optional)
    pub avatar: Option<String>,
}

impl StaffUser {
    /// Display string for logging
    pub fn display_string(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

/// A demo account entry: the credentials advertised for one role
#[derive(Debug, Clone, Serialize)]
pub struct DemoAccount {
    pub role: Role,
    pub email: String,
    pub password: String,
    pub description: String,
}

/// Static staff directory backing the mock login
pub struct StaffDirectory {
    users: HashMap<String, StaffUser>,
}

impl StaffDirectory {
    /// Build the directory with the fixed demo accounts
    pub fn new() -> Self {
        let mut users = HashMap::new();

        let entries = [
            StaffUser {
                id: "1".to_string(),
                email: "admin@hospital.com".to_string(),
                name: "Admin User".to_string(),
                role: Role::Administrator,
                department: Some("Administration".to_string()),
                avatar: Some("👨‍💼".to_string()),
            },
            StaffUser {
                id: "2".to_string(),
                email: "doctor@hospital.com".to_string(),
                name: "Dr. John Smith".to_string(),
                role: Role::Doctor,
                department: Some("General Medicine".to_string()),
                avatar: Some("👨‍⚕️".to_string()),
            },
            StaffUser {
                id: "3".to_string(),
                email: "nurse@hospital.com".to_string(),
                name: "Sarah Johnson".to_string(),
                role: Role::Nurse,
                department: Some("Emergency Ward".to_string()),
                avatar: Some("👩‍⚕️".to_string()),
            },
            StaffUser {
                id: "4".to_string(),
                email: "lab@hospital.com".to_string(),
                name: "Michael Brown".to_string(),
                role: Role::LabTechnician,
                department: Some("Laboratory".to_string()),
                avatar: Some("🔬".to_string()),
            },
            StaffUser {
                id: "5".to_string(),
                email: "pharmacist@hospital.com".to_string(),
                name: "Emma Wilson".to_string(),
                role: Role::Pharmacist,
                department: Some("Pharmacy".to_string()),
                avatar: Some("💊".to_string()),
            },
            StaffUser {
                id: "6".to_string(),
                email: "receptionist@hospital.com".to_string(),
                name: "Lisa Anderson".to_string(),
                role: Role::Receptionist,
                department: Some("Front Desk".to_string()),
                avatar: Some("👩‍💼".to_string()),
            },
            StaffUser {
                id: "7".to_string(),
                email: "billing@hospital.com".to_string(),
                name: "Robert Davis".to_string(),
                role: Role::Billing,
                department: Some("Finance".to_string()),
                avatar: Some("💰".to_string()),
            },
            StaffUser {
                id: "8".to_string(),
                email: "patient@hospital.com".to_string(),
                name: "James Patient".to_string(),
                role: Role::Patient,
                department: Some("Patient".to_string()),
                avatar: Some("👤".to_string()),
            },
        ];

        for user in entries {
            users.insert(user.email.clone(), user);
        }

        Self { users }
    }

    /// Look up a user by login email
    pub fn find_by_email(&self, email: &str) -> Option<&StaffUser> {
        self.users.get(email)
    }

    /// Demo accounts for the login page, one per role
    pub fn demo_accounts(&self) -> Vec<DemoAccount> {
        let mut accounts: Vec<DemoAccount> = self
            .users
            .values()
            .map(|user| DemoAccount {
                role: user.role,
                email: user.email.clone(),
                password: DEMO_PASSWORD.to_string(),
                description: format!("{} ({})", user.name, user.role.display_name()),
            })
            .collect();

        // Stable ordering for display
        accounts.sort_by_key(|a| ALL_ROLES.iter().position(|r| *r == a.role));
        accounts
    }

    /// Number of directory entries
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for StaffDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_covers_every_role() {
        let directory = StaffDirectory::new();
        assert_eq!(directory.len(), ALL_ROLES.len());

        for role in ALL_ROLES {
            assert!(
                directory.demo_accounts().iter().any(|a| a.role == role),
                "no demo account for role {}",
                role
            );
        }
    }

    #[test]
    fn lookup_by_email() {
        let directory = StaffDirectory::new();

        let admin = directory.find_by_email("admin@hospital.com").unwrap();
        assert_eq!(admin.role, Role::Administrator);
        assert_eq!(admin.name, "Admin User");
        assert_eq!(admin.department.as_deref(), Some("Administration"));

        assert!(directory.find_by_email("stranger@hospital.com").is_none());
    }
}
