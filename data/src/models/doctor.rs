use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    #[serde(rename = "Id")]
    pub id: u32,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub patient_count: u32,
    pub years_experience: u32,
    pub rating: f64,
    pub review_count: u32,
    pub status: DoctorStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoctorStatus {
    Active,
    Inactive,
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// Create payload. Counters and status are assigned by the service:
/// a new doctor starts active with zero patients and no reviews.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDoctor {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub years_experience: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorUpdate {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub patient_count: Option<u32>,
    pub years_experience: Option<u32>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub status: Option<DoctorStatus>,
}

/// Aggregate returned by the ratings lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average_rating: f64,
    pub total_reviews: u32,
}

impl Record for Doctor {
    const ENTITY: &'static str = "Doctor";

    fn id(&self) -> u32 {
        self.id
    }
}
