//! Staff Roles
//!
//! Closed enumeration of job-function categories. A role is assigned to a
//! user at login and is immutable for the lifetime of the session.

use serde::{Deserialize, Serialize};

/// Job-function category assigned to a user for a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Patient / visitor account
    Patient,
    /// Doctor
    Doctor,
    /// Nurse / ward staff
    Nurse,
    /// Laboratory technician
    LabTechnician,
    /// Pharmacist
    Pharmacist,
    /// Receptionist / front desk
    Receptionist,
    /// Billing & accounts clerk
    Billing,
    /// Hospital administrator
    Administrator,
}

/// Every role in the system, in declaration order
pub const ALL_ROLES: [Role; 8] = [
    Role::Patient,
    Role::Doctor,
    Role::Nurse,
    Role::LabTechnician,
    Role::Pharmacist,
    Role::Receptionist,
    Role::Billing,
    Role::Administrator,
];

impl Role {
    /// Human-readable display name for this role
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Doctor => "Doctor",
            Role::Nurse => "Nurse",
            Role::LabTechnician => "Lab Technician",
            Role::Pharmacist => "Pharmacist",
            Role::Receptionist => "Receptionist",
            Role::Billing => "Billing & Accounts",
            Role::Administrator => "Hospital Administrator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Doctor => write!(f, "doctor"),
            Role::Nurse => write!(f, "nurse"),
            Role::LabTechnician => write!(f, "lab_technician"),
            Role::Pharmacist => write!(f, "pharmacist"),
            Role::Receptionist => write!(f, "receptionist"),
            Role::Billing => write!(f, "billing"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "lab_technician" => Ok(Role::LabTechnician),
            "pharmacist" => Ok(Role::Pharmacist),
            "receptionist" => Ok(Role::Receptionist),
            "billing" => Ok(Role::Billing),
            "administrator" => Ok(Role::Administrator),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tokens_round_trip() {
        for role in ALL_ROLES {
            let token = role.to_string();
            let parsed: Role = token.parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("surgeon".parse::<Role>().is_err());
    }
}
