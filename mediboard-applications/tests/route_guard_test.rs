//! Guard scenarios over the live session store

use mediboard_applications::auth::ALL_PERMISSIONS;
use mediboard_applications::{
    GuardOutcome, Permission, Role, RouteGuard, SessionStorage, SessionStore, StaffDirectory,
};
use mediboard_core::SessionSettings;

fn store_in(dir: &std::path::Path) -> SessionStore {
    let storage = SessionStorage::new(dir).unwrap();
    let settings = SessionSettings { login_delay_ms: 0 };
    SessionStore::new(StaffDirectory::new(), storage, &settings)
}

#[tokio::test]
async fn anonymous_visitor_is_redirected_to_login() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let guard = RouteGuard::permission(Permission::ViewPatients);
    let ctx = store.context().await;

    // Never the denied view, never the children
    assert_eq!(guard.evaluate(&ctx), GuardOutcome::RedirectToLogin);
}

#[tokio::test]
async fn nurse_hits_the_access_denied_view_for_settings() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    store.login("nurse@hospital.com", "password123").await.unwrap();

    let guard = RouteGuard::permission(Permission::ViewSystemSettings);
    assert_eq!(
        guard.evaluate(&store.context().await),
        GuardOutcome::AccessDenied
    );
}

#[tokio::test]
async fn administrator_passes_any_single_permission_gate() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    store.login("admin@hospital.com", "pw").await.unwrap();
    let ctx = store.context().await;

    for permission in ALL_PERMISSIONS {
        let guard = RouteGuard::permission(permission);
        assert_eq!(
            guard.evaluate(&ctx),
            GuardOutcome::Render,
            "administrator blocked on {}",
            permission
        );
    }
}

#[tokio::test]
async fn logout_always_redirects_afterwards() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    store.login("doctor@hospital.com", "pw").await.unwrap();

    let guard = RouteGuard::permission(Permission::ViewEhr);
    assert_eq!(
        guard.evaluate(&store.context().await),
        GuardOutcome::Render
    );

    store.logout().await;
    assert_eq!(
        guard.evaluate(&store.context().await),
        GuardOutcome::RedirectToLogin
    );
}

#[tokio::test]
async fn role_restriction_and_permissions_compose() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let guard = RouteGuard::authenticated()
        .with_roles(vec![Role::Doctor, Role::Nurse])
        .with_permissions(vec![Permission::ViewEhr]);

    store.login("doctor@hospital.com", "pw").await.unwrap();
    assert_eq!(
        guard.evaluate(&store.context().await),
        GuardOutcome::Render
    );

    // The receptionist's role fails before permissions are consulted
    store.logout().await;
    store
        .login("receptionist@hospital.com", "pw")
        .await
        .unwrap();
    assert_eq!(
        guard.evaluate(&store.context().await),
        GuardOutcome::AccessDenied
    );
}
