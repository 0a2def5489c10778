//! Appointment scheduling handlers

use crate::auth::{application_error_response, guard};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use mediboard_applications::{
    modules::{Appointment, AppointmentDraft, AppointmentStatus},
    Permission, RouteGuard,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct AppointmentListParams {
    pub status: Option<AppointmentStatus>,
}

/// List appointments, optionally filtered by status
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<Vec<Appointment>>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewAppointments)).await?;

    state
        .appointments
        .list(&ctx, params.status)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Book a new appointment
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<Json<Appointment>, Response> {
    let ctx = guard(
        &state,
        &RouteGuard::permission(Permission::ManageAppointments),
    )
    .await?;

    state
        .appointments
        .create(&ctx, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Update an existing appointment
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<Json<Appointment>, Response> {
    let ctx = guard(
        &state,
        &RouteGuard::permission(Permission::ManageAppointments),
    )
    .await?;

    state
        .appointments
        .update(&ctx, &id, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Cancel a scheduled appointment
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, Response> {
    let ctx = guard(
        &state,
        &RouteGuard::permission(Permission::ManageAppointments),
    )
    .await?;

    state
        .appointments
        .cancel(&ctx, &id)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Delete an appointment
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Response> {
    let ctx = guard(
        &state,
        &RouteGuard::permission(Permission::ManageAppointments),
    )
    .await?;

    state
        .appointments
        .delete(&ctx, &id)
        .await
        .map_err(application_error_response)?;

    Ok(Json(json!({ "message": "Appointment deleted" })))
}
