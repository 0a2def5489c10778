//! Patient management handlers

use crate::auth::{application_error_response, guard};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use mediboard_applications::{
    modules::{Patient, PatientDraft},
    Permission, RouteGuard,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct PatientListParams {
    pub search: Option<String>,
}

/// List patients, optionally narrowed by a search term
pub async fn list_patients(
    State(state): State<AppState>,
    Query(params): Query<PatientListParams>,
) -> Result<Json<Vec<Patient>>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewPatients)).await?;

    let patients = match params.search.as_deref() {
        Some(term) => state.patients.search(&ctx, term).await,
        None => state.patients.list(&ctx).await,
    }
    .map_err(application_error_response)?;

    Ok(Json(patients))
}

/// Register a new patient
pub async fn create_patient(
    State(state): State<AppState>,
    Json(draft): Json<PatientDraft>,
) -> Result<Json<Patient>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManagePatients)).await?;

    state
        .patients
        .create(&ctx, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Update an existing patient
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<PatientDraft>,
) -> Result<Json<Patient>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManagePatients)).await?;

    state
        .patients
        .update(&ctx, &id, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Delete a patient record
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManagePatients)).await?;

    state
        .patients
        .delete(&ctx, &id)
        .await
        .map_err(application_error_response)?;

    Ok(Json(json!({ "message": "Patient deleted" })))
}
