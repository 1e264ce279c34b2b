use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "Id")]
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<u32>,
    pub patient_name: String,
    pub doctor_name: String,
    pub medicines: Vec<Medicine>,
    pub created_at: NaiveDate,
    pub status: PrescriptionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Active,
    Completed,
    Cancelled,
}

impl fmt::Display for PrescriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPrescription {
    pub patient_id: u32,
    pub doctor_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<u32>,
    pub patient_name: String,
    pub doctor_name: String,
    pub medicines: Vec<Medicine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionUpdate {
    pub patient_id: Option<u32>,
    pub doctor_id: Option<u32>,
    pub appointment_id: Option<u32>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub medicines: Option<Vec<Medicine>>,
    pub status: Option<PrescriptionStatus>,
}

impl Record for Prescription {
    const ENTITY: &'static str = "Prescription";

    fn id(&self) -> u32 {
        self.id
    }
}
