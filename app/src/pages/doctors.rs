use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use mediflow_data::models::Doctor;
use mediflow_data::services::DoctorService;
use mediflow_data::Result;

use super::{error_state, to_rows};
use crate::table::{CellKind, Column, DataTable, RowAction};

pub struct DoctorsPage {
    service: Arc<DoctorService>,
    doctors: Vec<Doctor>,
    search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl DoctorsPage {
    pub fn new(service: Arc<DoctorService>) -> Self {
        Self {
            service,
            doctors: Vec::new(),
            search_query: String::new(),
            loading: false,
            error: None,
            table: DataTable::new(columns())
                .with_actions(vec![
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
            Ok(doctors) => self.doctors = doctors,
            Err(err) => {
                warn!(error = %err, "failed to load doctors");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Name, specialization or email contains-match, case-insensitive.
    pub fn filtered(&self) -> Vec<Doctor> {
        if self.search_query.is_empty() {
            return self.doctors.clone();
        }
        let query = self.search_query.to_lowercase();
        self.doctors
            .iter()
            .filter(|doctor| {
                doctor.name.to_lowercase().contains(&query)
                    || doctor.specialization.to_lowercase().contains(&query)
                    || doctor.email.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.filtered())
    }

    pub fn doctor_count(&self) -> usize {
        self.doctors.len()
    }

    pub async fn delete(&mut self, id: u32) -> Result<Doctor> {
        let doctor = self.service.delete(id).await?;
        self.doctors.retain(|d| d.id != id);
        Ok(doctor)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        format!("Doctors\n\n{}", self.table.render(&self.rows(), self.loading))
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Doctor").sortable(),
        Column::new("specialization", "Specialization").sortable(),
        Column::new("email", "Email"),
        Column::new("phone", "Phone"),
        Column::new("yearsExperience", "Experience")
            .sortable()
            .render(|value, _| format!("{} yrs", value.as_u64().unwrap_or_default())),
        Column::new("rating", "Rating").sortable().render(|value, row| {
            format!(
                "{:.1} ({} reviews)",
                value.as_f64().unwrap_or_default(),
                row.get("reviewCount").and_then(Value::as_u64).unwrap_or_default()
            )
        }),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediflow_data::models::DoctorStatus;
    use mediflow_data::{LatencyProfile, Store};

    fn doctor(id: u32, name: &str, specialization: &str) -> Doctor {
        Doctor {
            id,
            name: name.to_string(),
            specialization: specialization.to_string(),
            email: format!("doc{id}@mediflow.example"),
            phone: "555-0100".to_string(),
            patient_count: 5,
            years_experience: 10,
            rating: 4.5,
            review_count: 12,
            status: DoctorStatus::Active,
        }
    }

    fn page(doctors: Vec<Doctor>) -> DoctorsPage {
        DoctorsPage::new(Arc::new(DoctorService::new(
            Store::new(doctors),
            LatencyProfile::instant(),
        )))
    }

    #[tokio::test]
    async fn load_populates_rows() {
        let mut page = page(vec![doctor(1, "Dr. Sarah Johnson", "Cardiology")]);
        page.load().await;
        assert!(!page.loading);
        assert_eq!(page.rows().len(), 1);
    }

    #[tokio::test]
    async fn filter_matches_specialization() {
        let mut page = page(vec![
            doctor(1, "Dr. Sarah Johnson", "Cardiology"),
            doctor(2, "Dr. Priya Patel", "Dermatology"),
        ]);
        page.load().await;
        page.set_query("derma");
        let filtered = page.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[tokio::test]
    async fn miss_filters_to_empty_without_touching_the_collection() {
        let mut page = page(vec![doctor(1, "Dr. Sarah Johnson", "Cardiology")]);
        page.load().await;
        page.set_query("no such doctor");
        assert!(page.filtered().is_empty());
        assert_eq!(page.doctor_count(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_local_row() {
        let mut page = page(vec![
            doctor(1, "Dr. Sarah Johnson", "Cardiology"),
            doctor(2, "Dr. Priya Patel", "Dermatology"),
        ]);
        page.load().await;
        page.delete(1).await.unwrap();
        assert_eq!(page.doctor_count(), 1);
        assert_eq!(page.filtered()[0].id, 2);
    }

    #[tokio::test]
    async fn render_shows_empty_state_after_a_filter_miss() {
        let mut page = page(vec![doctor(1, "Dr. Sarah Johnson", "Cardiology")]);
        page.load().await;
        page.set_query("zzz");
        assert!(page.render().contains("No data found"));
    }
}
