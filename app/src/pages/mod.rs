//! Per-entity page controllers.
//!
//! Pages are thin orchestration: fetch-on-mount, a local search query that
//! filters the already-fetched rows (never the underlying collection), column
//! definitions for the table, and action wiring back into the services.
//! Failures surface as a uniform, retryable error state.

mod appointments;
mod billing;
mod dashboard;
mod doctors;
mod feedback;
mod patients;
mod prescriptions;

pub use appointments::AppointmentsPage;
pub use billing::BillingPage;
pub use dashboard::{load_stats, DashboardPage, DashboardStats};
pub use doctors::DoctorsPage;
pub use feedback::FeedbackPage;
pub use patients::PatientsPage;
pub use prescriptions::PrescriptionsPage;

use serde::Serialize;
use serde_json::Value;

/// Convert records to the JSON rows the table consumes.
pub(crate) fn to_rows<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).unwrap_or(Value::Null))
        .collect()
}

/// The uniform retry-capable error presentation.
pub(crate) fn error_state(message: &str) -> String {
    format!("Something went wrong\n{message}\n[Try Again]")
}
