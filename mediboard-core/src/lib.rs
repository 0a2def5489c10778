//! Mediboard Core - shared infrastructure for the hospital back office
//!
//! This crate holds the pieces every other mediboard crate leans on:
//! structured errors, logging setup, and configuration loading.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
