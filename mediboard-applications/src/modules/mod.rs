//! Back-office Module Registries
//!
//! Each module owns one in-memory collection seeded with mock records and
//! follows the same shape: list + filter + create/update/delete, every
//! operation checked against the caller's access context before touching
//! data. The view permission gates reads; the matching manage permission
//! gates writes.

pub mod appointments;
pub mod billing;
pub mod inventory;
pub mod patients;
pub mod records;

pub use appointments::{Appointment, AppointmentDraft, AppointmentRegistry, AppointmentStatus};
pub use billing::{BillingRegistry, Invoice, InvoiceDraft, InvoiceStatus, RevenueSummary};
pub use inventory::{
    InventoryItem, InventoryItemDraft, InventoryRegistry, StockAlerts, StockStatus,
};
pub use patients::{Patient, PatientDraft, PatientRegistry, PatientStatus};
pub use records::{HealthRecord, HealthRecordDraft, RecordRegistry};
