//! Authentication and authorization plumbing for the web layer
//!
//! Maps the three guard outcomes onto HTTP responses: anonymous visitors are
//! redirected to the login entry point, authenticated-but-unauthorized
//! visitors get a blocking 403 body on the same path, and authorized
//! requests proceed to the handler.

use crate::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Json, Redirect, Response},
};
use mediboard_applications::{
    AccessContext, ApplicationError, GuardOutcome, Role, RouteGuard, StaffUser,
};
use tracing::warn;

/// Redirect issued when an anonymous visitor hits protected content
#[derive(Debug)]
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::temporary("/login").into_response()
    }
}

/// Blocking Access Denied response for authenticated visitors
///
/// Rendered on the same navigation path rather than redirecting, matching
/// the guard's outcome asymmetry.
#[derive(Debug)]
pub struct AccessDenied {
    pub role: Option<Role>,
}

impl AccessDenied {
    pub fn new(role: Option<Role>) -> Self {
        Self { role }
    }
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "error": "access_denied",
                "title": "Access Denied",
                "message": "You do not have permission to access this page. \
                            Please contact your administrator if you believe this is an error.",
                "role": self.role.map(|r| r.to_string()),
            })),
        )
            .into_response()
    }
}

/// Extractor for the authenticated user; rejects anonymous visitors with a
/// redirect to login
pub struct CurrentUser(pub StaffUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        match app_state.session.current_user().await {
            Some(user) => Ok(CurrentUser(user)),
            None => Err(AuthRedirect),
        }
    }
}

/// Evaluate a route guard against the current session
///
/// Returns the access context for the handler to use, or the terminal
/// response for the two blocking outcomes. Evaluated fresh on every request;
/// nothing is cached.
pub async fn guard(state: &AppState, guard: &RouteGuard) -> Result<AccessContext, Response> {
    let ctx = state.context().await;

    match guard.evaluate(&ctx) {
        GuardOutcome::Render => Ok(ctx),
        GuardOutcome::RedirectToLogin => Err(AuthRedirect.into_response()),
        GuardOutcome::AccessDenied => {
            warn!(
                role = ?ctx.role().map(|r| r.to_string()),
                "access denied by route guard"
            );
            Err(AccessDenied::new(ctx.role()).into_response())
        }
    }
}

/// Convert an application-layer error into an HTTP response
pub fn application_error_response(error: ApplicationError) -> Response {
    match error {
        ApplicationError::Permission { .. } => AccessDenied::new(None).into_response(),
        ApplicationError::Authentication { message } => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "invalid_credentials",
                "message": message,
            })),
        )
            .into_response(),
        ApplicationError::NotFound { message } => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "not_found",
                "message": message,
            })),
        )
            .into_response(),
        ApplicationError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "validation",
                "message": message,
            })),
        )
            .into_response(),
        other => {
            warn!("internal error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "internal",
                    "message": "Internal server error",
                })),
            )
                .into_response()
        }
    }
}
