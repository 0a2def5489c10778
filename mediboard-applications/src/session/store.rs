//! Session Store - owner of the current authenticated user
//!
//! The store is the single owner of the current-user value and its
//! lifecycle: `login` creates it, `logout` destroys it, `restore` rehydrates
//! it from durable storage at startup. One logical session exists at a time;
//! racing logins are last-write-wins, which is acceptable for the mock
//! credential backend.

use super::storage::SessionStorage;
use crate::auth::{AccessContext, StaffDirectory, StaffUser};
use crate::{ApplicationError, ApplicationResult};
use mediboard_core::SessionSettings;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Message surfaced to the user on a failed login
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Owner of the current session
pub struct SessionStore {
    /// Static credential directory backing the mock login
    directory: StaffDirectory,
    /// Durable storage for the user record
    storage: SessionStorage,
    /// Current authenticated user
    user: RwLock<Option<StaffUser>>,
    /// Last login error, for inline display
    last_error: RwLock<Option<String>>,
    /// Simulated backend latency applied to login
    login_delay: Duration,
}

impl SessionStore {
    /// Create a session store over the given directory and storage
    pub fn new(directory: StaffDirectory, storage: SessionStorage, settings: &SessionSettings) -> Self {
        Self {
            directory,
            storage,
            user: RwLock::new(None),
            last_error: RwLock::new(None),
            login_delay: Duration::from_millis(settings.login_delay_ms),
        }
    }

    /// Rehydrate the session from durable storage
    ///
    /// Malformed stored data is discarded and treated as "no session";
    /// rehydration never fails.
    pub async fn restore(&self) {
        match self.storage.load_user() {
            Ok(Some(user)) => {
                info!("Restored session for {}", user.display_string());
                *self.user.write().await = Some(user);
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Discarding malformed session record: {}", e);
                if let Err(e) = self.storage.clear() {
                    warn!("Failed to remove malformed session record: {}", e);
                }
            }
        }
    }

    /// Attempt to log in with the given credentials
    ///
    /// The mock backend matches iff the email is in the directory and the
    /// password is non-empty. A fixed delay simulates network latency; there
    /// is no cancellation path.
    pub async fn login(&self, email: &str, password: &str) -> ApplicationResult<StaffUser> {
        tokio::time::sleep(self.login_delay).await;

        let found = self.directory.find_by_email(email).cloned();

        match found {
            Some(user) if !password.is_empty() => {
                // Persist first, then publish in memory, mirroring the
                // storage-then-state order of the original login flow
                self.storage.save_user(&user)?;

                *self.user.write().await = Some(user.clone());
                *self.last_error.write().await = None;

                info!("Login succeeded for {}", user.display_string());
                Ok(user)
            }
            _ => {
                warn!("Login failed for email: {}", email);
                *self.last_error.write().await = Some(INVALID_CREDENTIALS_MESSAGE.to_string());

                Err(ApplicationError::Authentication {
                    message: INVALID_CREDENTIALS_MESSAGE.to_string(),
                })
            }
        }
    }

    /// End the current session; idempotent and infallible
    pub async fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear persisted session on logout: {}", e);
        }

        let previous = self.user.write().await.take();
        *self.last_error.write().await = None;

        if let Some(user) = previous {
            info!("Logged out {}", user.display_string());
        }
    }

    /// Current user snapshot
    pub async fn current_user(&self) -> Option<StaffUser> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user.read().await.is_some()
    }

    /// Last login error message, if any
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Capability query context over the current session state
    pub async fn context(&self) -> AccessContext {
        match self.current_user().await {
            Some(user) => AccessContext::authenticated(user),
            None => AccessContext::anonymous(),
        }
    }

    /// Demo accounts advertised on the login page
    pub fn demo_accounts(&self) -> Vec<crate::auth::DemoAccount> {
        self.directory.demo_accounts()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(dir: &std::path::Path) -> SessionStore {
        let storage = SessionStorage::new(dir).unwrap();
        let settings = SessionSettings { login_delay_ms: 0 };
        SessionStore::new(StaffDirectory::new(), storage, &settings)
    }

    #[tokio::test]
    async fn login_with_known_email_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());

        let user = store.login("admin@hospital.com", "anything").await.unwrap();
        assert_eq!(user.name, "Admin User");
        assert!(store.is_authenticated().await);
        assert!(store.last_error().await.is_none());
    }

    #[tokio::test]
    async fn unknown_email_and_empty_password_fail() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());

        assert!(store.login("ghost@hospital.com", "secret").await.is_err());
        assert_eq!(
            store.last_error().await.as_deref(),
            Some(INVALID_CREDENTIALS_MESSAGE)
        );

        assert!(store.login("admin@hospital.com", "").await.is_err());
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = test_store(dir.path());

        store.login("nurse@hospital.com", "pw").await.unwrap();
        store.logout().await;
        assert!(!store.is_authenticated().await);

        // Logging out again is a no-op
        store.logout().await;
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn session_survives_a_fresh_store() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = test_store(dir.path());
            store.login("doctor@hospital.com", "pw").await.unwrap();
        }

        // Simulate a process restart over the same storage directory
        let fresh = test_store(dir.path());
        fresh.restore().await;

        let user = fresh.current_user().await.unwrap();
        assert_eq!(user.name, "Dr. John Smith");
        assert_eq!(user.department.as_deref(), Some("General Medicine"));
    }

    #[tokio::test]
    async fn malformed_record_is_discarded_on_restore() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hospital_user.json"), "{broken").unwrap();

        let store = test_store(dir.path());
        store.restore().await;

        assert!(!store.is_authenticated().await);
        // The corrupt record was removed, not left behind
        assert!(!dir.path().join("hospital_user.json").exists());
    }
}
