//! Inventory Management
//!
//! In-memory stock register with substring search, derived stock status,
//! and low-stock alerts. Reading requires `ViewInventory`; mutations require
//! `ManageInventory`.

use crate::auth::{AccessContext, Permission};
use crate::{ApplicationError, ApplicationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Stock status, derived from quantity against the minimum stock level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl StockStatus {
    /// Derive the status from current quantity and minimum stock level
    pub fn derive(quantity: u32, min_stock: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity < min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// A stocked inventory item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub unit: String,
    pub expiry_date: NaiveDate,
    pub supplier: String,
    pub cost: f64,
    pub status: StockStatus,
}

/// Fields supplied when adding or editing an item; status is derived, not
/// supplied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemDraft {
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub min_stock: u32,
    pub unit: String,
    pub expiry_date: NaiveDate,
    pub supplier: String,
    pub cost: f64,
}

/// Stock alert summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAlerts {
    /// Items that are low or out of stock
    pub items: Vec<InventoryItem>,
    pub low_stock_count: usize,
}

/// Permission-checked stock register
pub struct InventoryRegistry {
    items: RwLock<Vec<InventoryItem>>,
}

impl InventoryRegistry {
    /// Register seeded with the demo records
    pub fn with_seed_data() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        let seed = |id: &str,
                    name: &str,
                    category: &str,
                    quantity: u32,
                    min_stock: u32,
                    unit: &str,
                    expiry: NaiveDate,
                    supplier: &str,
                    cost: f64| InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            quantity,
            min_stock,
            unit: unit.to_string(),
            expiry_date: expiry,
            supplier: supplier.to_string(),
            cost,
            status: StockStatus::derive(quantity, min_stock),
        };

        Self {
            items: RwLock::new(vec![
                seed(
                    "INV-001",
                    "Surgical Masks",
                    "PPE",
                    450,
                    100,
                    "pieces",
                    date(2025, 12, 31),
                    "Medical Supplies Co.",
                    0.50,
                ),
                seed(
                    "INV-002",
                    "Oxygen Cylinders",
                    "Medical Gas",
                    15,
                    20,
                    "pieces",
                    date(2024, 12, 31),
                    "Gas Suppliers Ltd.",
                    150.0,
                ),
                seed(
                    "INV-003",
                    "Disposable Gloves",
                    "PPE",
                    0,
                    200,
                    "boxes",
                    date(2024, 6, 30),
                    "Medical Supplies Co.",
                    25.0,
                ),
                seed(
                    "INV-004",
                    "Antibiotics - Amoxicillin",
                    "Medicines",
                    340,
                    100,
                    "tablets",
                    date(2025, 8, 15),
                    "Pharma Inc.",
                    0.75,
                ),
                seed(
                    "INV-005",
                    "IV Fluids (Saline)",
                    "Fluids",
                    85,
                    150,
                    "bags",
                    date(2025, 6, 30),
                    "Fluid Suppliers",
                    8.50,
                ),
            ]),
        }
    }

    fn check_view(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ViewInventory) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to view inventory",
            ));
        }
        Ok(())
    }

    fn check_manage(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ManageInventory) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to manage inventory",
            ));
        }
        Ok(())
    }

    /// List every item
    pub async fn list(&self, ctx: &AccessContext) -> ApplicationResult<Vec<InventoryItem>> {
        Self::check_view(ctx)?;
        Ok(self.items.read().await.clone())
    }

    /// Case-insensitive search over name and category
    pub async fn search(
        &self,
        ctx: &AccessContext,
        term: &str,
    ) -> ApplicationResult<Vec<InventoryItem>> {
        Self::check_view(ctx)?;

        let needle = term.to_lowercase();
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| {
                i.name.to_lowercase().contains(&needle)
                    || i.category.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// Items that need restocking
    pub async fn alerts(&self, ctx: &AccessContext) -> ApplicationResult<StockAlerts> {
        Self::check_view(ctx)?;

        let items: Vec<InventoryItem> = self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.status != StockStatus::InStock)
            .cloned()
            .collect();

        let low_stock_count = items.len();
        Ok(StockAlerts {
            items,
            low_stock_count,
        })
    }

    /// Add a new stock item
    pub async fn create(
        &self,
        ctx: &AccessContext,
        draft: InventoryItemDraft,
    ) -> ApplicationResult<InventoryItem> {
        Self::check_manage(ctx)?;

        let mut items = self.items.write().await;
        let id = super::patients::next_display_id("INV-", items.iter().map(|i| i.id.as_str()));

        let item = InventoryItem {
            id,
            name: draft.name,
            category: draft.category,
            quantity: draft.quantity,
            min_stock: draft.min_stock,
            unit: draft.unit,
            expiry_date: draft.expiry_date,
            supplier: draft.supplier,
            cost: draft.cost,
            status: StockStatus::derive(draft.quantity, draft.min_stock),
        };

        info!("Added inventory item {} ({})", item.id, item.name);
        items.push(item.clone());
        Ok(item)
    }

    /// Replace an existing item's details; stock status is recomputed
    pub async fn update(
        &self,
        ctx: &AccessContext,
        id: &str,
        draft: InventoryItemDraft,
    ) -> ApplicationResult<InventoryItem> {
        Self::check_manage(ctx)?;

        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| {
                ApplicationError::not_found(format!("Inventory item not found: {}", id))
            })?;

        item.name = draft.name;
        item.category = draft.category;
        item.quantity = draft.quantity;
        item.min_stock = draft.min_stock;
        item.unit = draft.unit;
        item.expiry_date = draft.expiry_date;
        item.supplier = draft.supplier;
        item.cost = draft.cost;
        item.status = StockStatus::derive(draft.quantity, draft.min_stock);

        Ok(item.clone())
    }

    /// Remove an item from the register
    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<()> {
        Self::check_manage(ctx)?;

        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);

        if items.len() == before {
            return Err(ApplicationError::not_found(format!(
                "Inventory item not found: {}",
                id
            )));
        }

        info!("Deleted inventory item {}", id);
        Ok(())
    }
}

impl Default for InventoryRegistry {
    fn default() -> Self {
        Self::with_seed_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaffDirectory;

    fn context_for(email: &str) -> AccessContext {
        let directory = StaffDirectory::new();
        AccessContext::authenticated(directory.find_by_email(email).unwrap().clone())
    }

    #[test]
    fn stock_status_derivation() {
        assert_eq!(StockStatus::derive(0, 100), StockStatus::OutOfStock);
        assert_eq!(StockStatus::derive(50, 100), StockStatus::LowStock);
        assert_eq!(StockStatus::derive(100, 100), StockStatus::InStock);
    }

    #[tokio::test]
    async fn alerts_cover_low_and_out_of_stock() {
        let registry = InventoryRegistry::with_seed_data();
        let ctx = context_for("pharmacist@hospital.com");

        let alerts = registry.alerts(&ctx).await.unwrap();
        assert_eq!(alerts.low_stock_count, 3);
        assert!(alerts.items.iter().any(|i| i.id == "INV-003"));
    }

    #[tokio::test]
    async fn restocking_recomputes_status() {
        let registry = InventoryRegistry::with_seed_data();
        let ctx = context_for("pharmacist@hospital.com");

        let draft = InventoryItemDraft {
            name: "Disposable Gloves".to_string(),
            category: "PPE".to_string(),
            quantity: 500,
            min_stock: 200,
            unit: "boxes".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            supplier: "Medical Supplies Co.".to_string(),
            cost: 25.0,
        };

        let updated = registry.update(&ctx, "INV-003", draft).await.unwrap();
        assert_eq!(updated.status, StockStatus::InStock);

        let alerts = registry.alerts(&ctx).await.unwrap();
        assert_eq!(alerts.low_stock_count, 2);
    }

    #[tokio::test]
    async fn billing_views_but_cannot_manage() {
        let registry = InventoryRegistry::with_seed_data();
        let ctx = context_for("billing@hospital.com");

        assert!(registry.search(&ctx, "ppe").await.is_ok());
        assert!(matches!(
            registry.delete(&ctx, "INV-001").await,
            Err(ApplicationError::Permission { .. })
        ));
    }
}
