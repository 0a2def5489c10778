//! Shared configuration types

use serde::{Deserialize, Serialize};

/// Top-level mediboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediboardConfig {
    pub session: SessionSettings,
    pub storage: StorageSettings,
}

/// Session behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Simulated backend latency applied to login, in milliseconds
    pub login_delay_ms: u64,
}

/// Durable storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the persisted session record
    pub data_dir: String,
}
