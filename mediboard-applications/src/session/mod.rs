//! Session Management Module
//!
//! Owns the current authenticated user: login, logout, and rehydration from
//! durable storage.

pub mod storage;
pub mod store;

pub use storage::SessionStorage;
pub use store::{SessionStore, INVALID_CREDENTIALS_MESSAGE};
