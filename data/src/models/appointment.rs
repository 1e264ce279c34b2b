use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "Id")]
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    /// Clock time as entered at the desk, e.g. "09:30".
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Duration in minutes.
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

/// Lifecycle stage of an appointment. Any value is settable via update; no
/// transition graph is enforced here — the pages decide which buttons to
/// offer for each stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: u32,
    pub doctor_id: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub patient_id: Option<u32>,
    pub doctor_id: Option<u32>,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl Record for Appointment {
    const ENTITY: &'static str = "Appointment";

    fn id(&self) -> u32 {
        self.id
    }
}
