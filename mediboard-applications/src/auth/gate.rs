//! Capability Gates
//!
//! Declarative wrappers that decide whether a piece of content should be
//! rendered for the current session. Gates hold no state of their own; every
//! call re-evaluates against the supplied context.

use super::context::AccessContext;
use super::permissions::Permission;

/// How a multi-permission requirement combines its elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequireMode {
    /// At least one permission must be held
    Any,
    /// Every permission must be held (the default)
    #[default]
    All,
}

/// A rendering requirement: one or more permissions plus a combination mode
#[derive(Debug, Clone)]
pub struct GateRequirement {
    permissions: Vec<Permission>,
    mode: RequireMode,
}

impl GateRequirement {
    /// Require a single permission
    pub fn single(permission: Permission) -> Self {
        Self {
            permissions: vec![permission],
            mode: RequireMode::All,
        }
    }

    /// Require a list of permissions, combined per `mode`
    pub fn list(permissions: Vec<Permission>, mode: RequireMode) -> Self {
        Self { permissions, mode }
    }

    /// Whether the requirement is satisfied for the given context
    pub fn satisfied(&self, ctx: &AccessContext) -> bool {
        match self.mode {
            RequireMode::Any => ctx.can_any(&self.permissions),
            RequireMode::All => ctx.can_all(&self.permissions),
        }
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}

/// Allow-gate: yields the content iff the requirement is satisfied
#[derive(Debug, Clone)]
pub struct Allow {
    requirement: GateRequirement,
}

impl Allow {
    pub fn new(requirement: GateRequirement) -> Self {
        Self { requirement }
    }

    /// Shorthand for a single-permission gate
    pub fn permission(permission: Permission) -> Self {
        Self::new(GateRequirement::single(permission))
    }

    /// Whether the gate lets the content through
    pub fn renders(&self, ctx: &AccessContext) -> bool {
        self.requirement.satisfied(ctx)
    }

    /// Pick content or fallback based on the gate decision
    pub fn render<T>(
        &self,
        ctx: &AccessContext,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.renders(ctx) {
            content()
        } else {
            fallback()
        }
    }
}

/// Deny-gate: the inverse of `Allow`
///
/// Yields the content iff the requirement is NOT satisfied. A list is
/// treated as "must fail the all-of check".
#[derive(Debug, Clone)]
pub struct Deny {
    permissions: Vec<Permission>,
}

impl Deny {
    pub fn new(permissions: Vec<Permission>) -> Self {
        Self { permissions }
    }

    pub fn permission(permission: Permission) -> Self {
        Self::new(vec![permission])
    }

    /// Whether the gate lets the content through
    pub fn renders(&self, ctx: &AccessContext) -> bool {
        match self.permissions.as_slice() {
            [single] => ctx.cannot(*single),
            many => !ctx.can_all(many),
        }
    }

    /// Pick content or fallback based on the gate decision
    pub fn render<T>(
        &self,
        ctx: &AccessContext,
        content: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        if self.renders(ctx) {
            content()
        } else {
            fallback()
        }
    }
}
