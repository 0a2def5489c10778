//! Access Context
//!
//! Capability query API over the current session state. The context is an
//! explicit value handed to components that need authorization answers,
//! rather than an ambient singleton; it is a pure snapshot with no side
//! effects and no caching of decisions.

use super::directory::StaffUser;
use super::permissions::{has_all_permissions, has_any_permission, has_permission, Permission};
use super::roles::Role;

/// Snapshot of the current session used to answer capability questions
///
/// All queries are fail-closed: with no authenticated user, `can` is false
/// for every permission.
#[derive(Debug, Clone, Default)]
pub struct AccessContext {
    /// Current authenticated user, if any
    user: Option<StaffUser>,
}

impl AccessContext {
    /// Context for an anonymous visitor
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Context for an authenticated user
    pub fn authenticated(user: StaffUser) -> Self {
        Self { user: Some(user) }
    }

    /// Current user, if authenticated
    pub fn user(&self) -> Option<&StaffUser> {
        self.user.as_ref()
    }

    /// Current role, if authenticated
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_administrator(&self) -> bool {
        self.role() == Some(Role::Administrator)
    }

    /// True iff a user is present and the permission is in the table for
    /// the user's role
    pub fn can(&self, permission: Permission) -> bool {
        match self.role() {
            Some(role) => has_permission(role, permission),
            None => false,
        }
    }

    /// True iff at least one of the given permissions satisfies `can`.
    ///
    /// An empty slice is false: a vacuous query never implicitly grants
    /// access.
    pub fn can_any(&self, permissions: &[Permission]) -> bool {
        match self.role() {
            Some(role) => has_any_permission(role, permissions),
            None => false,
        }
    }

    /// True iff every one of the given permissions satisfies `can`.
    ///
    /// An empty slice is true: the check is universally quantified over the
    /// empty set. Note the deliberate asymmetry with `can_any`.
    pub fn can_all(&self, permissions: &[Permission]) -> bool {
        match self.role() {
            Some(role) => has_all_permissions(role, permissions),
            None => permissions.is_empty(),
        }
    }

    /// Logical negation of `can`
    pub fn cannot(&self, permission: Permission) -> bool {
        !self.can(permission)
    }

    /// Summary string for logging
    pub fn summary(&self) -> String {
        match &self.user {
            Some(user) => format!("AccessContext[{}]", user.display_string()),
            None => "AccessContext[anonymous]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::StaffDirectory;

    fn context_for(email: &str) -> AccessContext {
        let directory = StaffDirectory::new();
        AccessContext::authenticated(directory.find_by_email(email).unwrap().clone())
    }

    #[test]
    fn anonymous_is_fail_closed() {
        let ctx = AccessContext::anonymous();
        assert!(!ctx.can(Permission::ViewDashboard));
        assert!(!ctx.can_any(&[Permission::ViewDashboard, Permission::ViewPatients]));
        assert!(ctx.cannot(Permission::ViewDashboard));
    }

    #[test]
    fn empty_slice_conventions() {
        let ctx = context_for("nurse@hospital.com");
        assert!(!ctx.can_any(&[]));
        assert!(ctx.can_all(&[]));

        // The conventions hold for anonymous visitors as well
        let anon = AccessContext::anonymous();
        assert!(!anon.can_any(&[]));
        assert!(anon.can_all(&[]));
    }

    #[test]
    fn queries_follow_the_role_table() {
        let ctx = context_for("doctor@hospital.com");
        assert!(ctx.can(Permission::ManageEhr));
        assert!(ctx.cannot(Permission::ManageBilling));
        assert!(ctx.can_any(&[Permission::ManageBilling, Permission::ViewEhr]));
        assert!(!ctx.can_all(&[Permission::ManageBilling, Permission::ViewEhr]));
    }
}
