//! Application state for the web server

use crate::{WebConfig, WebError, WebResult};
use mediboard_applications::{
    modules::{
        AppointmentRegistry, BillingRegistry, InventoryRegistry, PatientRegistry, RecordRegistry,
    },
    AccessContext, SessionStorage, SessionStore, StaffDirectory,
};
use mediboard_core::SessionSettings;
use std::sync::Arc;
use tracing::info;

/// Shared state for all handlers
///
/// The session store is the single owner of the current user; every module
/// registry is handed an access context snapshot per request.
#[derive(Clone)]
pub struct AppState {
    /// Configuration
    pub config: WebConfig,
    /// Session store (current user + login/logout lifecycle)
    pub session: Arc<SessionStore>,
    /// Patient register
    pub patients: Arc<PatientRegistry>,
    /// Appointment book
    pub appointments: Arc<AppointmentRegistry>,
    /// Health record store
    pub records: Arc<RecordRegistry>,
    /// Invoice ledger
    pub billing: Arc<BillingRegistry>,
    /// Stock register
    pub inventory: Arc<InventoryRegistry>,
}

impl AppState {
    /// Create the application state and rehydrate any persisted session
    pub async fn new(config: WebConfig) -> WebResult<Self> {
        let storage = match &config.data_dir {
            Some(dir) => SessionStorage::new(dir),
            None => SessionStorage::in_data_dir(),
        }
        .map_err(|e| WebError::Config(format!("Failed to initialize session storage: {}", e)))?;

        let settings = SessionSettings {
            login_delay_ms: config.login_delay_ms,
        };
        let session = SessionStore::new(StaffDirectory::new(), storage, &settings);

        // Attempt to pick up a session persisted by a previous run;
        // malformed data is discarded inside restore
        session.restore().await;

        let state = Self {
            config,
            session: Arc::new(session),
            patients: Arc::new(PatientRegistry::with_seed_data()),
            appointments: Arc::new(AppointmentRegistry::with_seed_data()),
            records: Arc::new(RecordRegistry::with_seed_data()),
            billing: Arc::new(BillingRegistry::with_seed_data()),
            inventory: Arc::new(InventoryRegistry::with_seed_data()),
        };

        info!("Application state initialized");
        Ok(state)
    }

    /// Access context snapshot for the current session
    pub async fn context(&self) -> AccessContext {
        self.session.context().await
    }
}
