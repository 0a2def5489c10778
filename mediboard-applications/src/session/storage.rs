//! Session Storage - durable persistence for the current session
//!
//! A single JSON record on disk stands in for the browser local-storage slot
//! the session survives in. Absent and malformed records are distinguished so
//! the store can treat a corrupt file as "no session" instead of an error.

use crate::auth::StaffUser;
use crate::{ApplicationError, ApplicationResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the persisted user record
const USER_RECORD_FILE: &str = "hospital_user.json";

/// Durable storage for the session's user record
pub struct SessionStorage {
    storage_dir: PathBuf,
}

impl SessionStorage {
    /// Create a storage manager rooted at the given directory
    pub fn new<P: AsRef<Path>>(storage_dir: P) -> ApplicationResult<Self> {
        let storage_dir = storage_dir.as_ref().to_path_buf();

        std::fs::create_dir_all(&storage_dir).map_err(ApplicationError::Io)?;

        info!("Session storage initialized at: {}", storage_dir.display());

        Ok(Self { storage_dir })
    }

    /// Storage rooted at the platform data directory
    pub fn in_data_dir() -> ApplicationResult<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mediboard");
        Self::new(base_dir)
    }

    fn record_path(&self) -> PathBuf {
        self.storage_dir.join(USER_RECORD_FILE)
    }

    /// Persist the user record
    pub fn save_user(&self, user: &StaffUser) -> ApplicationResult<()> {
        let json_data =
            serde_json::to_string_pretty(user).map_err(ApplicationError::Serialization)?;

        std::fs::write(self.record_path(), json_data).map_err(ApplicationError::Io)?;

        debug!("Persisted session user {} to disk", user.email);
        Ok(())
    }

    /// Load the persisted user record
    ///
    /// Returns `Ok(None)` when no record exists. A record that cannot be
    /// read or parsed is an error; the caller decides whether to discard it.
    pub fn load_user(&self) -> ApplicationResult<Option<StaffUser>> {
        let path = self.record_path();

        if !path.exists() {
            return Ok(None);
        }

        let json_data = std::fs::read_to_string(&path).map_err(ApplicationError::Io)?;

        let user: StaffUser =
            serde_json::from_str(&json_data).map_err(ApplicationError::Serialization)?;

        debug!("Loaded persisted session user {}", user.email);
        Ok(Some(user))
    }

    /// Remove the persisted record; idempotent
    pub fn clear(&self) -> ApplicationResult<()> {
        let path = self.record_path();

        if path.exists() {
            std::fs::remove_file(&path).map_err(ApplicationError::Io)?;
            debug!("Cleared persisted session record");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaffDirectory;

    #[test]
    fn save_load_clear_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path()).unwrap();

        assert!(storage.load_user().unwrap().is_none());

        let directory = StaffDirectory::new();
        let user = directory.find_by_email("doctor@hospital.com").unwrap();
        storage.save_user(user).unwrap();

        let loaded = storage.load_user().unwrap().unwrap();
        assert_eq!(&loaded, user);

        storage.clear().unwrap();
        assert!(storage.load_user().unwrap().is_none());

        // clear is idempotent
        storage.clear().unwrap();
    }

    #[test]
    fn malformed_record_is_an_error_not_a_user() {
        let dir = tempfile::tempdir().unwrap();
        let storage = SessionStorage::new(dir.path()).unwrap();

        std::fs::write(dir.path().join("hospital_user.json"), "not json at all").unwrap();

        assert!(storage.load_user().is_err());
    }
}
