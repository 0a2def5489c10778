//! Mediboard Applications - domain layer for the hospital back office
//!
//! This crate owns everything between infrastructure and presentation:
//!
//! - The role/permission authorization model (`auth`): a closed role set, a
//!   static role-to-permission table, capability queries, rendering gates,
//!   and the route guard state machine
//! - The session lifecycle (`session`): mock login against a static staff
//!   directory, logout, and rehydration from durable storage
//! - The back-office module registries (`modules`): patients, appointments,
//!   health records, billing, and inventory, each an in-memory collection
//!   with permission-checked operations
//!
//! ## Architecture
//!
//! The layering follows a clear separation:
//! - **Core** (mediboard-core): errors, logging, configuration
//! - **Applications** (this crate): domain logic and authorization
//! - **Presentation** (mediboard-web): the HTTP surface

pub mod auth;
pub mod modules;
pub mod session;

pub use auth::{
    AccessContext, GuardOutcome, Permission, Role, RouteGuard, StaffDirectory, StaffUser,
};
pub use session::{SessionStorage, SessionStore};

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Core error: {0}")]
    Core(#[from] mediboard_core::MediboardError),

    #[error("Authentication error: {message}")]
    Authentication { message: String },

    #[error("Permission error: {message}")]
    Permission { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Create a permission error
    pub fn permission<S: Into<String>>(message: S) -> Self {
        Self::Permission {
            message: message.into(),
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use super::{
        AccessContext, ApplicationError, ApplicationResult, GuardOutcome, Permission, Role,
        RouteGuard, SessionStore, StaffUser,
    };
}
