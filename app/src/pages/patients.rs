use std::sync::Arc;

use chrono::Datelike;
use serde_json::Value;
use tracing::warn;

use mediflow_data::models::Patient;
use mediflow_data::services::PatientService;
use mediflow_data::{Clock, Result};

use super::{error_state, to_rows};
use crate::table::{CellKind, Column, DataTable, RowAction};

pub struct PatientsPage {
    service: Arc<PatientService>,
    clock: Clock,
    patients: Vec<Patient>,
    search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl PatientsPage {
    pub fn new(service: Arc<PatientService>, clock: Clock) -> Self {
        Self {
            service,
            clock,
            patients: Vec::new(),
            search_query: String::new(),
            loading: false,
            error: None,
            table: DataTable::new(columns())
                .with_actions(vec![
                    RowAction::new("View", "Eye"),
                    RowAction::new("Edit", "Pencil"),
                    RowAction::new("Delete", "Trash2"),
                ])
                .selectable(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.get_all().await {
            Ok(patients) => self.patients = patients,
            Err(err) => {
                warn!(error = %err, "failed to load patients");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Name, email, phone or blood type contains-match.
    pub fn filtered(&self) -> Vec<Patient> {
        if self.search_query.is_empty() {
            return self.patients.clone();
        }
        let query = self.search_query.to_lowercase();
        self.patients
            .iter()
            .filter(|patient| {
                patient.name.to_lowercase().contains(&query)
                    || patient.email.to_lowercase().contains(&query)
                    || patient.phone.contains(self.search_query.as_str())
                    || patient
                        .blood_type
                        .as_deref()
                        .is_some_and(|blood| blood.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.filtered())
    }

    pub fn patient_count(&self) -> usize {
        self.patients.len()
    }

    /// Patients with more than one recorded condition.
    pub fn critical_cases(&self) -> usize {
        self.patients.iter().filter(|p| p.is_critical_case()).count()
    }

    /// Patients whose last visit falls in the current month.
    pub fn new_this_month(&self) -> usize {
        let today = self.clock.today();
        self.patients
            .iter()
            .filter(|patient| {
                patient.last_visit.is_some_and(|visit| {
                    visit.year() == today.year() && visit.month() == today.month()
                })
            })
            .count()
    }

    pub async fn delete(&mut self, id: u32) -> Result<Patient> {
        let patient = self.service.delete(id).await?;
        self.patients.retain(|p| p.id != id);
        Ok(patient)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        format!(
            "Patients  ({} total, {} critical)\n\n{}",
            self.patient_count(),
            self.critical_cases(),
            self.table.render(&self.rows(), self.loading)
        )
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Patient").sortable(),
        Column::new("email", "Email"),
        Column::new("phone", "Phone"),
        Column::new("bloodType", "Blood Type"),
        Column::new("lastVisit", "Last Visit").sortable().kind(CellKind::Date),
        Column::new("medicalHistory", "Conditions").render(|value, _| {
            match value.as_array().map(Vec::len).unwrap_or_default() {
                0 => "-".to_string(),
                1 => "1 condition".to_string(),
                n => format!("{n} conditions"),
            }
        }),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}
