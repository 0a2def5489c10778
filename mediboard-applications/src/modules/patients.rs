//! Patient Management
//!
//! In-memory patient register seeded with mock records. Listing requires
//! `ViewPatients`; every mutation requires `ManagePatients`.

use crate::auth::{AccessContext, Permission};
use crate::{ApplicationError, ApplicationResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Patient lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Active,
    Inactive,
    Discharged,
}

/// A registered patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub blood_type: String,
    pub registered_date: NaiveDate,
    pub status: PatientStatus,
}

/// Fields supplied when creating or editing a patient; the register owns
/// the identifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDraft {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub blood_type: String,
    pub registered_date: NaiveDate,
    pub status: PatientStatus,
}

/// Permission-checked patient register
pub struct PatientRegistry {
    patients: RwLock<Vec<Patient>>,
}

impl PatientRegistry {
    /// Register seeded with the demo records
    pub fn with_seed_data() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        Self {
            patients: RwLock::new(vec![
                Patient {
                    id: "P001".to_string(),
                    name: "John Smith".to_string(),
                    age: 45,
                    gender: "Male".to_string(),
                    phone: "+1 (555) 123-4567".to_string(),
                    email: "john.smith@email.com".to_string(),
                    blood_type: "O+".to_string(),
                    registered_date: date(2024, 1, 15),
                    status: PatientStatus::Active,
                },
                Patient {
                    id: "P002".to_string(),
                    name: "Jane Doe".to_string(),
                    age: 32,
                    gender: "Female".to_string(),
                    phone: "+1 (555) 234-5678".to_string(),
                    email: "jane.doe@email.com".to_string(),
                    blood_type: "A+".to_string(),
                    registered_date: date(2024, 1, 10),
                    status: PatientStatus::Active,
                },
                Patient {
                    id: "P003".to_string(),
                    name: "Robert Johnson".to_string(),
                    age: 58,
                    gender: "Male".to_string(),
                    phone: "+1 (555) 345-6789".to_string(),
                    email: "robert.j@email.com".to_string(),
                    blood_type: "B+".to_string(),
                    registered_date: date(2024, 1, 8),
                    status: PatientStatus::Discharged,
                },
            ]),
        }
    }

    /// Empty register, for tests
    pub fn empty() -> Self {
        Self {
            patients: RwLock::new(Vec::new()),
        }
    }

    fn check_view(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ViewPatients) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to view patients",
            ));
        }
        Ok(())
    }

    fn check_manage(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ManagePatients) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to manage patients",
            ));
        }
        Ok(())
    }

    /// List every patient
    pub async fn list(&self, ctx: &AccessContext) -> ApplicationResult<Vec<Patient>> {
        Self::check_view(ctx)?;
        Ok(self.patients.read().await.clone())
    }

    /// Case-insensitive search over name and id
    pub async fn search(&self, ctx: &AccessContext, term: &str) -> ApplicationResult<Vec<Patient>> {
        Self::check_view(ctx)?;

        let needle = term.to_lowercase();
        Ok(self
            .patients
            .read()
            .await
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.id.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// Register a new patient
    pub async fn create(
        &self,
        ctx: &AccessContext,
        draft: PatientDraft,
    ) -> ApplicationResult<Patient> {
        Self::check_manage(ctx)?;

        let mut patients = self.patients.write().await;
        let id = next_display_id("P", patients.iter().map(|p| p.id.as_str()));

        let patient = Patient {
            id,
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            phone: draft.phone,
            email: draft.email,
            blood_type: draft.blood_type,
            registered_date: draft.registered_date,
            status: draft.status,
        };

        info!("Registered patient {} ({})", patient.id, patient.name);
        patients.push(patient.clone());
        Ok(patient)
    }

    /// Replace an existing patient's details
    pub async fn update(
        &self,
        ctx: &AccessContext,
        id: &str,
        draft: PatientDraft,
    ) -> ApplicationResult<Patient> {
        Self::check_manage(ctx)?;

        let mut patients = self.patients.write().await;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApplicationError::not_found(format!("Patient not found: {}", id)))?;

        patient.name = draft.name;
        patient.age = draft.age;
        patient.gender = draft.gender;
        patient.phone = draft.phone;
        patient.email = draft.email;
        patient.blood_type = draft.blood_type;
        patient.registered_date = draft.registered_date;
        patient.status = draft.status;

        Ok(patient.clone())
    }

    /// Remove a patient record
    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<()> {
        Self::check_manage(ctx)?;

        let mut patients = self.patients.write().await;
        let before = patients.len();
        patients.retain(|p| p.id != id);

        if patients.len() == before {
            return Err(ApplicationError::not_found(format!(
                "Patient not found: {}",
                id
            )));
        }

        info!("Deleted patient {}", id);
        Ok(())
    }
}

impl Default for PatientRegistry {
    fn default() -> Self {
        Self::with_seed_data()
    }
}

/// Next sequential display id for a prefix, e.g. `P004`
///
/// Scans for the highest existing numeric suffix so ids stay unique after
/// deletions.
pub(crate) fn next_display_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.trim_start_matches('-').parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    format!("{}{:03}", prefix, max + 1)
}
