//! Session lifecycle scenarios

use mediboard_applications::session::INVALID_CREDENTIALS_MESSAGE;
use mediboard_applications::{ApplicationError, SessionStorage, SessionStore, StaffDirectory};
use mediboard_core::SessionSettings;

fn store_in(dir: &std::path::Path) -> SessionStore {
    let storage = SessionStorage::new(dir).unwrap();
    let settings = SessionSettings { login_delay_ms: 0 };
    SessionStore::new(StaffDirectory::new(), storage, &settings)
}

#[tokio::test]
async fn login_round_trip_rehydrates_the_same_user() {
    let dir = tempfile::tempdir().unwrap();

    // Log in, then drop the store
    {
        let store = store_in(dir.path());
        let user = store.login("admin@hospital.com", "anything").await.unwrap();
        assert_eq!(user.name, "Admin User");
    }

    // The persisted record survives on disk
    let raw = std::fs::read_to_string(dir.path().join("hospital_user.json")).unwrap();
    assert!(raw.contains("admin@hospital.com"));

    // A fresh load rehydrates the same user without re-prompting credentials
    let fresh = store_in(dir.path());
    fresh.restore().await;

    let user = fresh.current_user().await.unwrap();
    assert_eq!(user.name, "Admin User");
    assert_eq!(user.role.to_string(), "administrator");
    assert_eq!(user.department.as_deref(), Some("Administration"));
}

#[tokio::test]
async fn failed_login_surfaces_an_inline_message() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let err = store.login("nobody@hospital.com", "pw").await.unwrap_err();
    assert!(matches!(err, ApplicationError::Authentication { .. }));
    assert_eq!(
        store.last_error().await.as_deref(),
        Some(INVALID_CREDENTIALS_MESSAGE)
    );

    // A later successful login clears the message
    store.login("admin@hospital.com", "pw").await.unwrap();
    assert!(store.last_error().await.is_none());
}

#[tokio::test]
async fn empty_password_never_matches() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    assert!(store.login("admin@hospital.com", "").await.is_err());
    assert!(!store.is_authenticated().await);
    assert!(!dir.path().join("hospital_user.json").exists());
}

#[tokio::test]
async fn malformed_persisted_record_is_discarded_silently() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("hospital_user.json"), "]]]garbage[[[").unwrap();

    let store = store_in(dir.path());
    store.restore().await;

    assert!(!store.is_authenticated().await);
}

#[tokio::test]
async fn logout_clears_storage_unconditionally() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    store.login("billing@hospital.com", "pw").await.unwrap();
    assert!(dir.path().join("hospital_user.json").exists());

    store.logout().await;
    assert!(!dir.path().join("hospital_user.json").exists());
    assert!(!store.is_authenticated().await);

    // Idempotent with nothing persisted
    store.logout().await;
}

#[tokio::test]
async fn last_login_wins_when_logins_race() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    store.login("nurse@hospital.com", "pw").await.unwrap();
    store.login("doctor@hospital.com", "pw").await.unwrap();

    let user = store.current_user().await.unwrap();
    assert_eq!(user.email, "doctor@hospital.com");
}
