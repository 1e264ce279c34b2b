use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use mediflow_data::models::{Appointment, AppointmentStatus};
use mediflow_data::services::AppointmentService;
use mediflow_data::Result;

use super::{error_state, to_rows};
use crate::table::{CellKind, Column, DataTable, RowAction};

pub struct AppointmentsPage {
    service: Arc<AppointmentService>,
    appointments: Vec<Appointment>,
    search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl AppointmentsPage {
    pub fn new(service: Arc<AppointmentService>) -> Self {
        Self {
            service,
            appointments: Vec::new(),
            search_query: String::new(),
            loading: false,
            error: None,
            table: DataTable::new(columns())
                .with_actions(vec![RowAction::new("Delete", "Trash2")])
                .selectable(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.get_all().await {
            Ok(appointments) => self.appointments = appointments,
            Err(err) => {
                warn!(error = %err, "failed to load appointments");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Patient, doctor, visit type or status contains-match.
    pub fn filtered(&self) -> Vec<Appointment> {
        if self.search_query.is_empty() {
            return self.appointments.clone();
        }
        let query = self.search_query.to_lowercase();
        self.appointments
            .iter()
            .filter(|appointment| {
                appointment.patient_name.to_lowercase().contains(&query)
                    || appointment.doctor_name.to_lowercase().contains(&query)
                    || appointment.kind.to_lowercase().contains(&query)
                    || appointment.status.to_string().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.filtered())
    }

    pub fn appointment_count(&self) -> usize {
        self.appointments.len()
    }

    pub fn count_with_status(&self, status: AppointmentStatus) -> usize {
        self.appointments
            .iter()
            .filter(|a| a.status == status)
            .count()
    }

    /// Move an appointment to a new stage and patch the local copy.
    pub async fn update_status(&mut self, id: u32, status: AppointmentStatus) -> Result<Appointment> {
        let updated = self.service.update_status(id, status).await?;
        if let Some(local) = self.appointments.iter_mut().find(|a| a.id == id) {
            local.status = status;
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: u32) -> Result<Appointment> {
        let appointment = self.service.delete(id).await?;
        self.appointments.retain(|a| a.id != id);
        Ok(appointment)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        format!(
            "Appointments  ({} confirmed, {} pending, {} completed)\n\n{}",
            self.count_with_status(AppointmentStatus::Confirmed),
            self.count_with_status(AppointmentStatus::Scheduled),
            self.count_with_status(AppointmentStatus::Completed),
            self.table.render(&self.rows(), self.loading)
        )
    }
}

/// The buttons offered for an appointment in its current stage. This is page
/// presentation only; the service itself accepts any transition.
pub fn available_transitions(
    status: AppointmentStatus,
) -> Vec<(&'static str, AppointmentStatus)> {
    match status {
        AppointmentStatus::Scheduled => vec![
            ("Confirm", AppointmentStatus::Confirmed),
            ("Cancel", AppointmentStatus::Cancelled),
        ],
        AppointmentStatus::Confirmed => vec![
            ("Complete", AppointmentStatus::Completed),
            ("Cancel", AppointmentStatus::Cancelled),
        ],
        AppointmentStatus::Completed => Vec::new(),
        AppointmentStatus::Cancelled => vec![("Reschedule", AppointmentStatus::Scheduled)],
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("patientName", "Patient").sortable(),
        Column::new("doctorName", "Doctor").sortable(),
        Column::new("date", "Date").sortable().kind(CellKind::Date),
        Column::new("time", "Time"),
        Column::new("type", "Type"),
        Column::new("duration", "Duration")
            .render(|value, _| format!("{} min", value.as_u64().unwrap_or_default())),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mediflow_data::{LatencyProfile, Store};

    fn appointment(id: u32, patient: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            patient_id: 1,
            doctor_id: 1,
            patient_name: patient.to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            time: "09:00".to_string(),
            kind: "Consultation".to_string(),
            duration: 30,
            notes: None,
            status,
        }
    }

    fn page(appointments: Vec<Appointment>) -> AppointmentsPage {
        AppointmentsPage::new(Arc::new(AppointmentService::new(
            Store::new(appointments),
            LatencyProfile::instant(),
        )))
    }

    #[test]
    fn transitions_follow_the_stage() {
        let scheduled = available_transitions(AppointmentStatus::Scheduled);
        assert_eq!(scheduled[0].1, AppointmentStatus::Confirmed);
        assert_eq!(scheduled[1].1, AppointmentStatus::Cancelled);

        assert!(available_transitions(AppointmentStatus::Completed).is_empty());
        assert_eq!(
            available_transitions(AppointmentStatus::Cancelled),
            vec![("Reschedule", AppointmentStatus::Scheduled)]
        );
    }

    #[tokio::test]
    async fn update_status_patches_the_local_copy() {
        let mut page = page(vec![appointment(1, "John Smith", AppointmentStatus::Scheduled)]);
        page.load().await;

        page.update_status(1, AppointmentStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(page.count_with_status(AppointmentStatus::Confirmed), 1);
        assert_eq!(page.count_with_status(AppointmentStatus::Scheduled), 0);
    }

    #[tokio::test]
    async fn filter_matches_status_text() {
        let mut page = page(vec![
            appointment(1, "John Smith", AppointmentStatus::Scheduled),
            appointment(2, "Emily Davis", AppointmentStatus::Cancelled),
        ]);
        page.load().await;
        page.set_query("cancel");
        let filtered = page.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }
}
