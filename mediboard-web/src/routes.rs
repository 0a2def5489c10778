//! Route definitions for the mediboard web server

use crate::{handlers, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Authentication
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/me", get(handlers::current_user))
        .route("/auth/status", get(handlers::auth_status))
        .route("/auth/demo", get(handlers::demo_accounts))
        // Navigation (sidebar entries for the current user)
        .route("/nav", get(handlers::navigation))
        // Patient management
        .route(
            "/patients",
            get(handlers::list_patients).post(handlers::create_patient),
        )
        .route(
            "/patients/{id}",
            put(handlers::update_patient).delete(handlers::delete_patient),
        )
        // Appointment scheduling
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/appointments/{id}",
            put(handlers::update_appointment).delete(handlers::delete_appointment),
        )
        .route(
            "/appointments/{id}/cancel",
            post(handlers::cancel_appointment),
        )
        // Electronic health records
        .route(
            "/ehr",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/ehr/{id}",
            get(handlers::get_record)
                .put(handlers::update_record)
                .delete(handlers::delete_record),
        )
        // Billing & invoicing
        .route(
            "/billing",
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route("/billing/summary", get(handlers::billing_summary))
        .route(
            "/billing/{id}",
            put(handlers::update_invoice).delete(handlers::delete_invoice),
        )
        .route("/billing/{id}/pay", post(handlers::pay_invoice))
        // Inventory
        .route(
            "/inventory",
            get(handlers::list_inventory).post(handlers::create_inventory_item),
        )
        .route("/inventory/alerts", get(handlers::inventory_alerts))
        .route(
            "/inventory/{id}",
            put(handlers::update_inventory_item).delete(handlers::delete_inventory_item),
        )
        // System settings (administrator only)
        .route("/settings", get(handlers::system_settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppState, WebConfig};
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_check_route_responds() {
        let dir = tempfile::tempdir().unwrap();
        let config = WebConfig {
            data_dir: Some(dir.path().to_string_lossy().to_string()),
            login_delay_ms: 0,
            ..WebConfig::default()
        };
        let state = AppState::new(config).await.unwrap();
        let app = api_routes().with_state(state);

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
