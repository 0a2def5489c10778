//! Billing and invoicing handlers

use crate::auth::{application_error_response, guard};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use mediboard_applications::{
    modules::{Invoice, InvoiceDraft, InvoiceStatus, RevenueSummary},
    Permission, RouteGuard,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct InvoiceListParams {
    pub status: Option<InvoiceStatus>,
}

/// List invoices, optionally filtered by status
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(params): Query<InvoiceListParams>,
) -> Result<Json<Vec<Invoice>>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewBilling)).await?;

    state
        .billing
        .list(&ctx, params.status)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Revenue totals grouped by invoice status
pub async fn billing_summary(
    State(state): State<AppState>,
) -> Result<Json<RevenueSummary>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewBilling)).await?;

    state
        .billing
        .summary(&ctx)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Issue a new invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(draft): Json<InvoiceDraft>,
) -> Result<Json<Invoice>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageBilling)).await?;

    state
        .billing
        .create(&ctx, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Update an existing invoice
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<InvoiceDraft>,
) -> Result<Json<Invoice>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageBilling)).await?;

    state
        .billing
        .update(&ctx, &id, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Mark an invoice as paid
pub async fn pay_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageBilling)).await?;

    state
        .billing
        .mark_paid(&ctx, &id)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Delete an invoice
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageBilling)).await?;

    state
        .billing
        .delete(&ctx, &id)
        .await
        .map_err(application_error_response)?;

    Ok(Json(json!({ "message": "Invoice deleted" })))
}
