//! Inventory management handlers

use crate::auth::{application_error_response, guard};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Json, Response},
};
use mediboard_applications::{
    modules::{InventoryItem, InventoryItemDraft, StockAlerts},
    Permission, RouteGuard,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct InventoryListParams {
    pub search: Option<String>,
}

/// List stock items, optionally narrowed by a search term
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<InventoryListParams>,
) -> Result<Json<Vec<InventoryItem>>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewInventory)).await?;

    let items = match params.search.as_deref() {
        Some(term) => state.inventory.search(&ctx, term).await,
        None => state.inventory.list(&ctx).await,
    }
    .map_err(application_error_response)?;

    Ok(Json(items))
}

/// Items that need restocking
pub async fn inventory_alerts(
    State(state): State<AppState>,
) -> Result<Json<StockAlerts>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ViewInventory)).await?;

    state
        .inventory
        .alerts(&ctx)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Add a new stock item
pub async fn create_inventory_item(
    State(state): State<AppState>,
    Json(draft): Json<InventoryItemDraft>,
) -> Result<Json<InventoryItem>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageInventory)).await?;

    state
        .inventory
        .create(&ctx, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Update an existing stock item
pub async fn update_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<InventoryItemDraft>,
) -> Result<Json<InventoryItem>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageInventory)).await?;

    state
        .inventory
        .update(&ctx, &id, draft)
        .await
        .map(Json)
        .map_err(application_error_response)
}

/// Remove a stock item
pub async fn delete_inventory_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Response> {
    let ctx = guard(&state, &RouteGuard::permission(Permission::ManageInventory)).await?;

    state
        .inventory
        .delete(&ctx, &id)
        .await
        .map_err(application_error_response)?;

    Ok(Json(json!({ "message": "Inventory item deleted" })))
}
