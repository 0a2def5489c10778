//! Electronic Health Records
//!
//! In-memory record store for patient health records. Reading requires
//! `ViewEhr`; writing requires `ManageEhr`.

use super::patients::next_display_id;
use crate::auth::{AccessContext, Permission};
use crate::{ApplicationError, ApplicationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// A patient health record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthRecord {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub record_date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub medications: String,
    pub notes: String,
    pub doctor: String,
}

/// Fields supplied when creating or editing a health record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecordDraft {
    pub patient_id: String,
    pub patient_name: String,
    pub record_date: NaiveDate,
    pub diagnosis: String,
    pub treatment: String,
    pub medications: String,
    pub notes: String,
    pub doctor: String,
}

/// Permission-checked health record store
pub struct RecordRegistry {
    records: RwLock<Vec<HealthRecord>>,
}

impl RecordRegistry {
    /// Store seeded with the demo records
    pub fn with_seed_data() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        Self {
            records: RwLock::new(vec![
                HealthRecord {
                    id: "EHR001".to_string(),
                    patient_id: "P001".to_string(),
                    patient_name: "John Smith".to_string(),
                    record_date: date(2024, 1, 20),
                    diagnosis: "Hypertension".to_string(),
                    treatment: "Medication & Lifestyle Changes".to_string(),
                    medications: "Lisinopril 10mg daily".to_string(),
                    notes: "Patient shows good compliance".to_string(),
                    doctor: "Dr. Sarah Johnson".to_string(),
                },
                HealthRecord {
                    id: "EHR002".to_string(),
                    patient_id: "P002".to_string(),
                    patient_name: "Jane Doe".to_string(),
                    record_date: date(2024, 1, 18),
                    diagnosis: "Type 2 Diabetes".to_string(),
                    treatment: "Insulin Therapy".to_string(),
                    medications: "Metformin 500mg twice daily".to_string(),
                    notes: "Blood sugar levels stable".to_string(),
                    doctor: "Dr. James Lee".to_string(),
                },
            ]),
        }
    }

    fn check_view(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ViewEhr) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to view health records",
            ));
        }
        Ok(())
    }

    fn check_manage(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ManageEhr) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to manage health records",
            ));
        }
        Ok(())
    }

    /// List every health record
    pub async fn list(&self, ctx: &AccessContext) -> ApplicationResult<Vec<HealthRecord>> {
        Self::check_view(ctx)?;
        Ok(self.records.read().await.clone())
    }

    /// Fetch one record by id
    pub async fn get(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<HealthRecord> {
        Self::check_view(ctx)?;

        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found(format!("Health record not found: {}", id)))
    }

    /// Records for a specific patient
    pub async fn for_patient(
        &self,
        ctx: &AccessContext,
        patient_id: &str,
    ) -> ApplicationResult<Vec<HealthRecord>> {
        Self::check_view(ctx)?;

        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect())
    }

    /// Create a new health record
    pub async fn create(
        &self,
        ctx: &AccessContext,
        draft: HealthRecordDraft,
    ) -> ApplicationResult<HealthRecord> {
        Self::check_manage(ctx)?;

        let mut records = self.records.write().await;
        let id = next_display_id("EHR", records.iter().map(|r| r.id.as_str()));

        let record = HealthRecord {
            id,
            patient_id: draft.patient_id,
            patient_name: draft.patient_name,
            record_date: draft.record_date,
            diagnosis: draft.diagnosis,
            treatment: draft.treatment,
            medications: draft.medications,
            notes: draft.notes,
            doctor: draft.doctor,
        };

        info!(
            "Created health record {} for patient {}",
            record.id, record.patient_id
        );
        records.push(record.clone());
        Ok(record)
    }

    /// Replace an existing record's details
    pub async fn update(
        &self,
        ctx: &AccessContext,
        id: &str,
        draft: HealthRecordDraft,
    ) -> ApplicationResult<HealthRecord> {
        Self::check_manage(ctx)?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| {
                ApplicationError::not_found(format!("Health record not found: {}", id))
            })?;

        record.patient_id = draft.patient_id;
        record.patient_name = draft.patient_name;
        record.record_date = draft.record_date;
        record.diagnosis = draft.diagnosis;
        record.treatment = draft.treatment;
        record.medications = draft.medications;
        record.notes = draft.notes;
        record.doctor = draft.doctor;

        Ok(record.clone())
    }

    /// Remove a record
    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<()> {
        Self::check_manage(ctx)?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return Err(ApplicationError::not_found(format!(
                "Health record not found: {}",
                id
            )));
        }

        info!("Deleted health record {}", id);
        Ok(())
    }
}

impl Default for RecordRegistry {
    fn default() -> Self {
        Self::with_seed_data()
    }
}
