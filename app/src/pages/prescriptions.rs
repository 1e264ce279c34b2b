use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use mediflow_data::models::Prescription;
use mediflow_data::services::PrescriptionService;
use mediflow_data::Result;

use super::{error_state, to_rows};
use crate::table::{CellKind, Column, DataTable, RowAction};

pub struct PrescriptionsPage {
    service: Arc<PrescriptionService>,
    prescriptions: Vec<Prescription>,
    search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl PrescriptionsPage {
    pub fn new(service: Arc<PrescriptionService>) -> Self {
        Self {
            service,
            prescriptions: Vec::new(),
            search_query: String::new(),
            loading: false,
            error: None,
            table: DataTable::new(columns())
                .with_actions(vec![
                    RowAction::new("View", "Eye"),
                    RowAction::new("Delete", "Trash2"),
                ])
                .selectable(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.get_all().await {
            Ok(prescriptions) => self.prescriptions = prescriptions,
            Err(err) => {
                warn!(error = %err, "failed to load prescriptions");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Patient, doctor or any medicine name contains-match.
    pub fn filtered(&self) -> Vec<Prescription> {
        if self.search_query.is_empty() {
            return self.prescriptions.clone();
        }
        let query = self.search_query.to_lowercase();
        self.prescriptions
            .iter()
            .filter(|prescription| {
                prescription.patient_name.to_lowercase().contains(&query)
                    || prescription.doctor_name.to_lowercase().contains(&query)
                    || prescription
                        .medicines
                        .iter()
                        .any(|medicine| medicine.name.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.filtered())
    }

    pub fn prescription_count(&self) -> usize {
        self.prescriptions.len()
    }

    pub async fn delete(&mut self, id: u32) -> Result<Prescription> {
        let prescription = self.service.delete(id).await?;
        self.prescriptions.retain(|p| p.id != id);
        Ok(prescription)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        format!(
            "Prescriptions\n\n{}",
            self.table.render(&self.rows(), self.loading)
        )
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("patientName", "Patient").sortable(),
        Column::new("doctorName", "Doctor").sortable(),
        Column::new("medicines", "Medicines").render(|value, _| {
            let medicines = value.as_array().cloned().unwrap_or_default();
            let first = medicines
                .first()
                .and_then(|medicine| medicine.get("name"))
                .and_then(Value::as_str)
                .unwrap_or("-");
            match medicines.len() {
                0 => "-".to_string(),
                1 => first.to_string(),
                n => format!("{first} (+{} more)", n - 1),
            }
        }),
        Column::new("createdAt", "Issued").sortable().kind(CellKind::Date),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mediflow_data::models::{Medicine, PrescriptionStatus};
    use mediflow_data::{LatencyProfile, Store};

    fn prescription(id: u32, patient: &str, medicines: &[&str]) -> Prescription {
        Prescription {
            id,
            patient_id: 1,
            doctor_id: 1,
            appointment_id: None,
            patient_name: patient.to_string(),
            doctor_name: "Dr. Priya Patel".to_string(),
            medicines: medicines
                .iter()
                .map(|name| Medicine {
                    name: name.to_string(),
                    dosage: "10mg".to_string(),
                    frequency: "1x daily".to_string(),
                    duration: "30 days".to_string(),
                    instructions: "Take in the morning".to_string(),
                })
                .collect(),
            created_at: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
            status: PrescriptionStatus::Active,
        }
    }

    fn page(prescriptions: Vec<Prescription>) -> PrescriptionsPage {
        PrescriptionsPage::new(Arc::new(PrescriptionService::new(
            Store::new(prescriptions),
            LatencyProfile::instant(),
            mediflow_data::Clock::System,
        )))
    }

    #[tokio::test]
    async fn filter_matches_medicine_names() {
        let mut page = page(vec![
            prescription(1, "John Smith", &["Lisinopril"]),
            prescription(2, "Linda Park", &["Sumatriptan", "Ibuprofen"]),
        ]);
        page.load().await;
        page.set_query("ibupro");
        let filtered = page.filtered();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
    }

    #[tokio::test]
    async fn delete_removes_the_local_row() {
        let mut page = page(vec![prescription(1, "John Smith", &["Lisinopril"])]);
        page.load().await;
        page.delete(1).await.unwrap();
        assert_eq!(page.prescription_count(), 0);
        assert!(page.render().contains("No data found"));
    }
}
