//! Billing & Invoicing
//!
//! In-memory invoice ledger with status filtering, mark-paid, and revenue
//! totals. Reading requires `ViewBilling`; mutations require
//! `ManageBilling`.

use super::patients::next_display_id;
use crate::auth::{AccessContext, Permission};
use crate::{ApplicationError, ApplicationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

/// A patient invoice
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub amount: f64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub description: String,
    pub status: InvoiceStatus,
}

/// Fields supplied when creating or editing an invoice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub patient_id: String,
    pub patient_name: String,
    pub amount: f64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub description: String,
    pub status: InvoiceStatus,
}

/// Revenue totals across the ledger, grouped by status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_paid: f64,
    pub total_pending: f64,
    pub total_overdue: f64,
}

/// Permission-checked invoice ledger
pub struct BillingRegistry {
    invoices: RwLock<Vec<Invoice>>,
}

impl BillingRegistry {
    /// Ledger seeded with the demo records
    pub fn with_seed_data() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        Self {
            invoices: RwLock::new(vec![
                Invoice {
                    id: "INV001".to_string(),
                    patient_id: "P001".to_string(),
                    patient_name: "John Smith".to_string(),
                    amount: 1500.0,
                    issue_date: date(2024, 1, 15),
                    due_date: date(2024, 2, 15),
                    description: "Cardiology Consultation & Tests".to_string(),
                    status: InvoiceStatus::Pending,
                },
                Invoice {
                    id: "INV002".to_string(),
                    patient_id: "P002".to_string(),
                    patient_name: "Jane Doe".to_string(),
                    amount: 2200.0,
                    issue_date: date(2024, 1, 10),
                    due_date: date(2024, 2, 10),
                    description: "Surgery & Hospital Stay".to_string(),
                    status: InvoiceStatus::Paid,
                },
                Invoice {
                    id: "INV003".to_string(),
                    patient_id: "P003".to_string(),
                    patient_name: "Robert Johnson".to_string(),
                    amount: 800.0,
                    issue_date: date(2023, 12, 15),
                    due_date: date(2024, 1, 15),
                    description: "Orthopedic Consultation".to_string(),
                    status: InvoiceStatus::Overdue,
                },
            ]),
        }
    }

    fn check_view(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ViewBilling) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to view billing",
            ));
        }
        Ok(())
    }

    fn check_manage(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ManageBilling) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to manage billing",
            ));
        }
        Ok(())
    }

    /// List invoices, optionally filtered by status
    pub async fn list(
        &self,
        ctx: &AccessContext,
        status: Option<InvoiceStatus>,
    ) -> ApplicationResult<Vec<Invoice>> {
        Self::check_view(ctx)?;

        let invoices = self.invoices.read().await;
        Ok(match status {
            Some(status) => invoices
                .iter()
                .filter(|i| i.status == status)
                .cloned()
                .collect(),
            None => invoices.clone(),
        })
    }

    /// Revenue totals grouped by invoice status
    pub async fn summary(&self, ctx: &AccessContext) -> ApplicationResult<RevenueSummary> {
        Self::check_view(ctx)?;

        let invoices = self.invoices.read().await;
        let mut summary = RevenueSummary::default();

        for invoice in invoices.iter() {
            match invoice.status {
                InvoiceStatus::Paid => summary.total_paid += invoice.amount,
                InvoiceStatus::Pending => summary.total_pending += invoice.amount,
                InvoiceStatus::Overdue => summary.total_overdue += invoice.amount,
            }
        }

        Ok(summary)
    }

    /// Issue a new invoice
    pub async fn create(
        &self,
        ctx: &AccessContext,
        draft: InvoiceDraft,
    ) -> ApplicationResult<Invoice> {
        Self::check_manage(ctx)?;

        let mut invoices = self.invoices.write().await;
        let id = next_display_id("INV", invoices.iter().map(|i| i.id.as_str()));

        let invoice = Invoice {
            id,
            patient_id: draft.patient_id,
            patient_name: draft.patient_name,
            amount: draft.amount,
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            description: draft.description,
            status: draft.status,
        };

        info!(
            "Issued invoice {} for {} ({:.2})",
            invoice.id, invoice.patient_name, invoice.amount
        );
        invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// Replace an existing invoice's details
    pub async fn update(
        &self,
        ctx: &AccessContext,
        id: &str,
        draft: InvoiceDraft,
    ) -> ApplicationResult<Invoice> {
        Self::check_manage(ctx)?;

        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ApplicationError::not_found(format!("Invoice not found: {}", id)))?;

        invoice.patient_id = draft.patient_id;
        invoice.patient_name = draft.patient_name;
        invoice.amount = draft.amount;
        invoice.issue_date = draft.issue_date;
        invoice.due_date = draft.due_date;
        invoice.description = draft.description;
        invoice.status = draft.status;

        Ok(invoice.clone())
    }

    /// Mark a pending or overdue invoice as paid
    pub async fn mark_paid(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<Invoice> {
        Self::check_manage(ctx)?;

        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| ApplicationError::not_found(format!("Invoice not found: {}", id)))?;

        invoice.status = InvoiceStatus::Paid;
        info!("Marked invoice {} as paid", id);
        Ok(invoice.clone())
    }

    /// Remove an invoice
    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<()> {
        Self::check_manage(ctx)?;

        let mut invoices = self.invoices.write().await;
        let before = invoices.len();
        invoices.retain(|i| i.id != id);

        if invoices.len() == before {
            return Err(ApplicationError::not_found(format!(
                "Invoice not found: {}",
                id
            )));
        }

        info!("Deleted invoice {}", id);
        Ok(())
    }
}

impl Default for BillingRegistry {
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

    #[tokio::test]
    async fn summary_groups_amounts_by_status() {
        let registry = BillingRegistry::with_seed_data();
        let ctx = context_for("billing@hospital.com");

        let summary = registry.summary(&ctx).await.unwrap();
        assert_eq!(summary.total_paid, 2200.0);
        assert_eq!(summary.total_pending, 1500.0);
        assert_eq!(summary.total_overdue, 800.0);
    }

    #[tokio::test]
    async fn mark_paid_moves_revenue() {
        let registry = BillingRegistry::with_seed_data();
        let ctx = context_for("billing@hospital.com");

        registry.mark_paid(&ctx, "INV001").await.unwrap();

        let summary = registry.summary(&ctx).await.unwrap();
        assert_eq!(summary.total_paid, 3700.0);
        assert_eq!(summary.total_pending, 0.0);
    }

    #[tokio::test]
    async fn patients_see_billing_but_cannot_change_it() {
        let registry = BillingRegistry::with_seed_data();
        let ctx = context_for("patient@hospital.com");

        assert!(registry.list(&ctx, None).await.is_ok());
        assert!(matches!(
            registry.mark_paid(&ctx, "INV001").await,
            Err(ApplicationError::Permission { .. })
        ));
    }

    #[tokio::test]
    async fn pharmacist_has_no_billing_access() {
        let registry = BillingRegistry::with_seed_data();
        let ctx = context_for("pharmacist@hospital.com");

        assert!(matches!(
            registry.list(&ctx, None).await,
            Err(ApplicationError::Permission { .. })
        ));
    }
}
