//! Authentication handlers: login, logout, and session introspection

use crate::auth::{application_error_response, CurrentUser};
use crate::AppState;
use axum::{
    extract::State,
    response::{Json, Response},
};
use mediboard_applications::auth::DemoAccount;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public user information returned after login
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub role_display_name: String,
    pub department: Option<String>,
    pub avatar: Option<String>,
}

impl From<&mediboard_applications::StaffUser> for UserInfo {
    fn from(user: &mediboard_applications::StaffUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.to_string(),
            role_display_name: user.role.display_name().to_string(),
            department: user.department.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Login endpoint
///
/// Matches the email against the static staff directory; any non-empty
/// password is accepted for a known email. Failure surfaces the inline
/// "Invalid email or password" message.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, Response> {
    info!("Login attempt: {}", request.email);

    let user = state
        .session
        .login(&request.email, &request.password)
        .await
        .map_err(application_error_response)?;

    Ok(Json(json!({ "user": UserInfo::from(&user) })))
}

/// Logout endpoint; unconditional and idempotent
pub async fn logout(State(state): State<AppState>) -> Json<Value> {
    state.session.logout().await;

    Json(json!({ "message": "Logged out successfully" }))
}

/// Current user information; anonymous visitors are redirected to login
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "user": UserInfo::from(&user) }))
}

/// Session status probe, available to anonymous visitors
pub async fn auth_status(State(state): State<AppState>) -> Json<Value> {
    let user = state.session.current_user().await;
    let error = state.session.last_error().await;

    Json(json!({
        "authenticated": user.is_some(),
        "user": user.as_ref().map(UserInfo::from),
        "error": error,
    }))
}

/// Demo accounts advertised on the login page
pub async fn demo_accounts(State(state): State<AppState>) -> Json<Vec<DemoAccount>> {
    Json(state.session.demo_accounts())
}
