use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(rename = "Id")]
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub patient_name: String,
    pub doctor_name: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    pub comments: String,
    pub service_type: String,
    pub submitted_date: NaiveDate,
    pub status: FeedbackStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub patient_id: u32,
    pub doctor_id: u32,
    pub patient_name: String,
    pub doctor_name: String,
    pub rating: u8,
    pub comments: String,
    pub service_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackUpdate {
    pub rating: Option<u8>,
    pub comments: Option<String>,
    pub service_type: Option<String>,
    pub status: Option<FeedbackStatus>,
}

/// On-demand aggregate over the whole collection; not cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    /// Mean rating over approved feedback only, rounded to one decimal.
    pub average_rating: f64,
}

impl Record for Feedback {
    const ENTITY: &'static str = "Feedback";

    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_external_field_names() {
        let feedback = Feedback {
            id: 2,
            patient_id: 5,
            doctor_id: 1,
            patient_name: "Maria Garcia".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            rating: 5,
            comments: "Very thorough".to_string(),
            service_type: "Consultation".to_string(),
            submitted_date: NaiveDate::from_ymd_opt(2025, 7, 28).unwrap(),
            status: FeedbackStatus::Pending,
        };

        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(json["serviceType"], "Consultation");
        assert_eq!(json["submittedDate"], "2025-07-28");
        assert_eq!(json["status"], "pending");
    }
}
