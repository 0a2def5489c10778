//! Route Guard
//!
//! Protects an entire routed subtree. Evaluation is a small state machine
//! with exactly three terminal outcomes and no intermediate state; the
//! decision is recomputed synchronously on every navigation, never cached.
//!
//! The outcome asymmetry is deliberate: anonymous visitors are redirected to
//! the login entry point instead of being shown a blocking page, so the
//! existence of protected content is not leaked to them. Authenticated users
//! that fail the role or permission check stay on the same navigation path
//! and get the blocking Access Denied outcome.

use super::context::AccessContext;
use super::permissions::Permission;
use super::roles::Role;
use tracing::debug;

/// Terminal outcome of a guard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No authenticated user: send the visitor to the login entry point
    RedirectToLogin,
    /// Authenticated but not authorized: blocking view on the same path
    AccessDenied,
    /// Authorized: render the protected subtree
    Render,
}

/// Declarative protection for a routed subtree
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    /// Roles allowed through (empty = unconstrained)
    required_roles: Vec<Role>,
    /// Permissions required (empty = unconstrained)
    required_permissions: Vec<Permission>,
    /// Whether every required permission must be held (default) or any one
    require_all: bool,
}

impl RouteGuard {
    /// Guard that only requires authentication
    pub fn authenticated() -> Self {
        Self {
            required_roles: Vec::new(),
            required_permissions: Vec::new(),
            require_all: true,
        }
    }

    /// Restrict to the given roles
    pub fn with_roles(mut self, roles: Vec<Role>) -> Self {
        self.required_roles = roles;
        self
    }

    /// Require the given permissions
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.required_permissions = permissions;
        self
    }

    /// Switch the permission combination to any-of
    pub fn require_any(mut self) -> Self {
        self.require_all = false;
        self
    }

    /// Shorthand: authenticated + a single required permission
    pub fn permission(permission: Permission) -> Self {
        Self::authenticated().with_permissions(vec![permission])
    }

    /// Evaluate the guard against the current session state
    pub fn evaluate(&self, ctx: &AccessContext) -> GuardOutcome {
        // 1. Authentication check: anonymous visitors go to login
        let Some(role) = ctx.role() else {
            debug!("guard: anonymous visitor, redirecting to login");
            return GuardOutcome::RedirectToLogin;
        };

        // 2. Role check
        if !self.required_roles.is_empty() && !self.required_roles.contains(&role) {
            debug!(role = %role, "guard: role not permitted");
            return GuardOutcome::AccessDenied;
        }

        // 3. Permission check
        if !self.required_permissions.is_empty() {
            let authorized = if self.require_all {
                ctx.can_all(&self.required_permissions)
            } else {
                ctx.can_any(&self.required_permissions)
            };

            if !authorized {
                debug!(role = %role, "guard: missing required permissions");
                return GuardOutcome::AccessDenied;
            }
        }

        GuardOutcome::Render
    }
}
