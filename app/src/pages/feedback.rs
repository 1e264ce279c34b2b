use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use mediflow_data::models::{Feedback, FeedbackStats, FeedbackStatus};
use mediflow_data::services::FeedbackService;
use mediflow_data::Result;

use super::{error_state, to_rows};
use crate::table::{CellKind, Column, DataTable, RowAction};

pub struct FeedbackPage {
    service: Arc<FeedbackService>,
    feedback: Vec<Feedback>,
    /// `None` shows every status.
    pub status_filter: Option<FeedbackStatus>,
    search_query: String,
    pub stats: Option<FeedbackStats>,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl FeedbackPage {
    pub fn new(service: Arc<FeedbackService>) -> Self {
        Self {
            service,
            feedback: Vec::new(),
            status_filter: None,
            search_query: String::new(),
            stats: None,
            loading: false,
            error: None,
            table: DataTable::new(columns())
                .with_actions(vec![
                    RowAction::new("Approve", "Check"),
                    RowAction::new("Reject", "X"),
                    RowAction::new("Delete", "Trash2"),
                ])
                .selectable(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.get_all().await {
            Ok(feedback) => {
                self.feedback = feedback;
                match self.service.get_stats().await {
                    Ok(stats) => self.stats = Some(stats),
                    Err(err) => warn!(error = %err, "failed to load feedback stats"),
                }
            }
            Err(err) => {
                warn!(error = %err, "failed to load feedback");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_status_filter(&mut self, status: Option<FeedbackStatus>) {
        self.status_filter = status;
    }

    /// Status filter first, then the text query over patient, doctor,
    /// service type and comments.
    pub fn filtered(&self) -> Vec<Feedback> {
        let mut filtered: Vec<Feedback> = self
            .feedback
            .iter()
            .filter(|item| {
                self.status_filter
                    .map_or(true, |status| item.status == status)
            })
            .cloned()
            .collect();

        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            filtered.retain(|item| {
                item.patient_name.to_lowercase().contains(&query)
                    || item.doctor_name.to_lowercase().contains(&query)
                    || item.service_type.to_lowercase().contains(&query)
                    || item.comments.to_lowercase().contains(&query)
            });
        }
        filtered
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.filtered())
    }

    pub fn feedback_count(&self) -> usize {
        self.feedback.len()
    }

    pub async fn approve(&mut self, id: u32) -> Result<Feedback> {
        let updated = self.service.approve(id).await?;
        self.patch_local(&updated);
        Ok(updated)
    }

    pub async fn reject(&mut self, id: u32) -> Result<Feedback> {
        let updated = self.service.reject(id).await?;
        self.patch_local(&updated);
        Ok(updated)
    }

    pub async fn delete(&mut self, id: u32) -> Result<Feedback> {
        let feedback = self.service.delete(id).await?;
        self.feedback.retain(|f| f.id != id);
        Ok(feedback)
    }

    fn patch_local(&mut self, updated: &Feedback) {
        if let Some(local) = self.feedback.iter_mut().find(|f| f.id == updated.id) {
            local.status = updated.status;
        }
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        let header = self.stats.map_or_else(
            || "Feedback".to_string(),
            |stats| {
                format!(
                    "Feedback  ({} total, {} pending, avg {:.1})",
                    stats.total, stats.pending, stats.average_rating
                )
            },
        );
        format!("{header}\n\n{}", self.table.render(&self.rows(), self.loading))
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("patientName", "Patient").sortable(),
        Column::new("doctorName", "Doctor").sortable(),
        Column::new("rating", "Rating").sortable().render(|value, _| {
            let stars = value.as_u64().unwrap_or_default().min(5) as usize;
            "★".repeat(stars)
        }),
        Column::new("serviceType", "Service"),
        Column::new("comments", "Comments"),
        Column::new("submittedDate", "Submitted").sortable().kind(CellKind::Date),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}
