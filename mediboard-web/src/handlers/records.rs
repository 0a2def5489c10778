//! Electronic health record handlers

use crate::auth::{application_error_response, guard};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use mediboard_applications::{
    modules::{HealthRecord, HealthRecordDraft},
    Permission, RouteGuard,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct RecordListParams {
    pub patient_id: Option<String>,
}

/// List health records, optionally for a single patient
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<RecordListParams>,
) -> Result<Json<Vec<HealthRecord>>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewEhr)).await?;

    let records = match params.patient_id.as_deref() {
        Some(patient_id) => state.records.for_patient(&ctx, patient_id).await,
        None => state.records.list(&ctx).await,
    }
    .map_err(application_error_response)?;

    Ok(Json(records))
}

/// Fetch a single health record
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HealthRecord>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewEhr)).await?;

    state
        .records
        .get(&ctx, &id)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Create a new health record
pub async fn create_record(
    State(state): State<AppState>,
    Json(draft): Json<HealthRecordDraft>,
) -> Result<Json<HealthRecord>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageEhr)).await?;

    state
        .records
        .create(&ctx, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Update an existing health record
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<HealthRecordDraft>,
) -> Result<Json<HealthRecord>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageEhr)).await?;

    state
        .records
        .update(&ctx, &id, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Delete a health record
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageEhr)).await?;

    state
        .records
        .delete(&ctx, &id)
        .await
        .map_err(application_error_response)?;

    Ok(Json(json!({ "message": "Health record deleted" })))
}
