//! Appointment Scheduling
//!
//! In-memory appointment book with status filtering and cancellation.
//! Listing requires `ViewAppointments`; mutations require
//! `ManageAppointments`.

use super::patients::next_display_id;
use crate::auth::{AccessContext, Permission};
use crate::{ApplicationError, ApplicationResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

/// A scheduled appointment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub reason: String,
    pub status: AppointmentStatus,
}

/// Fields supplied when booking or editing an appointment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub patient_name: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub reason: String,
    pub status: AppointmentStatus,
}

/// Permission-checked appointment book
pub struct AppointmentRegistry {
    appointments: RwLock<Vec<Appointment>>,
}

impl AppointmentRegistry {
    /// Book seeded with the demo records
    pub fn with_seed_data() -> Self {
        let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
        let time = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();

        Self {
            appointments: RwLock::new(vec![
                Appointment {
                    id: "APT001".to_string(),
                    patient_name: "Michael Brown".to_string(),
                    patient_id: "P001".to_string(),
                    doctor_name: "Dr. Sarah Johnson".to_string(),
                    department: "Cardiology".to_string(),
                    date: date(2024, 2, 15),
                    time: time(9, 30),
                    duration_minutes: 30,
                    reason: "Heart Checkup".to_string(),
                    status: AppointmentStatus::Scheduled,
                },
                Appointment {
                    id: "APT002".to_string(),
                    patient_name: "Emily Wilson".to_string(),
                    patient_id: "P002".to_string(),
                    doctor_name: "Dr. James Lee".to_string(),
                    department: "Orthopedics".to_string(),
                    date: date(2024, 2, 15),
                    time: time(10, 15),
                    duration_minutes: 45,
                    reason: "Knee Pain Consultation".to_string(),
                    status: AppointmentStatus::Scheduled,
                },
                Appointment {
                    id: "APT003".to_string(),
                    patient_name: "David Martinez".to_string(),
                    patient_id: "P003".to_string(),
                    doctor_name: "Dr. Patricia Chen".to_string(),
                    department: "Neurology".to_string(),
                    date: date(2024, 2, 16),
                    time: time(14, 0),
                    duration_minutes: 30,
                    reason: "Headache Treatment".to_string(),
                    status: AppointmentStatus::Completed,
                },
            ]),
        }
    }

    fn check_view(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ViewAppointments) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to view appointments",
            ));
        }
        Ok(())
    }

    fn check_manage(ctx: &AccessContext) -> ApplicationResult<()> {
        if !ctx.can(Permission::ManageAppointments) {
            return Err(ApplicationError::permission(
                "Insufficient permissions to manage appointments",
            ));
        }
        Ok(())
    }

    /// List appointments, optionally filtered by status
    pub async fn list(
        &self,
        ctx: &AccessContext,
        status: Option<AppointmentStatus>,
    ) -> ApplicationResult<Vec<Appointment>> {
        Self::check_view(ctx)?;

        let appointments = self.appointments.read().await;
        Ok(match status {
            Some(status) => appointments
                .iter()
                .filter(|a| a.status == status)
                .cloned()
                .collect(),
            None => appointments.clone(),
        })
    }

    /// Book a new appointment
    pub async fn create(
        &self,
        ctx: &AccessContext,
        draft: AppointmentDraft,
    ) -> ApplicationResult<Appointment> {
        Self::check_manage(ctx)?;

        let mut appointments = self.appointments.write().await;
        let id = next_display_id("APT", appointments.iter().map(|a| a.id.as_str()));

        let appointment = Appointment {
            id,
            patient_name: draft.patient_name,
            patient_id: draft.patient_id,
            doctor_name: draft.doctor_name,
            department: draft.department,
            date: draft.date,
            time: draft.time,
            duration_minutes: draft.duration_minutes,
            reason: draft.reason,
            status: draft.status,
        };

        info!(
            "Booked appointment {} for {} with {}",
            appointment.id, appointment.patient_name, appointment.doctor_name
        );
        appointments.push(appointment.clone());
        Ok(appointment)
    }

    /// Replace an existing appointment's details
    pub async fn update(
        &self,
        ctx: &AccessContext,
        id: &str,
        draft: AppointmentDraft,
    ) -> ApplicationResult<Appointment> {
        Self::check_manage(ctx)?;

        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApplicationError::not_found(format!("Appointment not found: {}", id)))?;

        appointment.patient_name = draft.patient_name;
        appointment.patient_id = draft.patient_id;
        appointment.doctor_name = draft.doctor_name;
        appointment.department = draft.department;
        appointment.date = draft.date;
        appointment.time = draft.time;
        appointment.duration_minutes = draft.duration_minutes;
        appointment.reason = draft.reason;
        appointment.status = draft.status;

        Ok(appointment.clone())
    }

    /// Cancel a scheduled appointment (status transition, not removal)
    pub async fn cancel(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<Appointment> {
        Self::check_manage(ctx)?;

        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ApplicationError::not_found(format!("Appointment not found: {}", id)))?;

        appointment.status = AppointmentStatus::Cancelled;
        info!("Cancelled appointment {}", id);
        Ok(appointment.clone())
    }

    /// Remove an appointment entirely
    pub async fn delete(&self, ctx: &AccessContext, id: &str) -> ApplicationResult<()> {
        Self::check_manage(ctx)?;

        let mut appointments = self.appointments.write().await;
        let before = appointments.len();
        appointments.retain(|a| a.id != id);

        if appointments.len() == before {
            return Err(ApplicationError::not_found(format!(
                "Appointment not found: {}",
                id
            )));
        }

        info!("Deleted appointment {}", id);
        Ok(())
    }
}

impl Default for AppointmentRegistry {
    fn default() -> Self {
        Self::with_seed_data()
    }
}
