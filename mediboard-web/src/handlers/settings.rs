//! System settings handler
//!
//! Administrator-only probe exposing the effective role-permission matrix.

use crate::auth::guard;
use crate::AppState;
use axum::{
    extract::State,
    response::{Json, Response},
};
use mediboard_applications::auth::{permissions_for, ALL_ROLES};
use mediboard_applications::{Permission, Role, RouteGuard};
use serde_json::{json, Value};

/// System settings endpoint
///
/// Guarded by both a role restriction and a permission requirement; either
/// failing renders the blocking Access Denied outcome.
pub async fn system_settings(State(state): State<AppState>) -> Result<Json<Value>, Response> {
    let _ctx = guard(
        &state,
        &RouteGuard::authenticated()
            .with_roles(vec![Role::Administrator])
            .with_permissions(vec![Permission::ViewSystemSettings]),
    )
    .await?;

    let mut matrix = serde_json::Map::new();
    for role in ALL_ROLES {
        let mut tokens: Vec<String> = permissions_for(role).iter().map(|p| p.to_string()).collect();
        tokens.sort();
        matrix.insert(role.to_string(), json!(tokens));
    }

    Ok(Json(json!({
        "role_permissions": matrix,
        "login_delay_ms": state.config.login_delay_ms,
        "dev_mode": state.config.dev_mode,
    })))
}
