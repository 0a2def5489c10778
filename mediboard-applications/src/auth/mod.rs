//! Authentication and Authorization Module
//!
//! The role/permission model for the hospital back office:
//! - A closed set of roles and capability tokens
//! - A static, read-only role-to-permission table built once at startup
//! - Capability queries (can / can_any / can_all / cannot) over the current
//!   session, fail-closed for anonymous visitors
//! - Declarative allow/deny gates and the route guard state machine

pub mod context;
pub mod directory;
pub mod gate;
pub mod guard;
pub mod permissions;
pub mod roles;

pub use context::AccessContext;
pub use directory::{DemoAccount, StaffDirectory, StaffUser, DEMO_PASSWORD};
pub use gate::{Allow, Deny, GateRequirement, RequireMode};
pub use guard::{GuardOutcome, RouteGuard};
pub use permissions::{
    has_all_permissions, has_any_permission, has_permission, permissions_for, Permission,
    ALL_PERMISSIONS,
};
pub use roles::{Role, ALL_ROLES};
