use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use mediflow_data::models::{Bill, BillStatus};
use mediflow_data::services::BillService;
use mediflow_data::Result;

use super::{error_state, to_rows};
use crate::table::{CellKind, Column, DataTable, RowAction};

pub struct BillingPage {
    service: Arc<BillService>,
    bills: Vec<Bill>,
    search_query: String,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl BillingPage {
    pub fn new(service: Arc<BillService>) -> Self {
        Self {
            service,
            bills: Vec::new(),
            search_query: String::new(),
            loading: false,
            error: None,
            table: DataTable::new(columns())
                .with_actions(vec![
                    RowAction::new("Download", "Download"),
                    RowAction::new("Send", "Send"),
                    RowAction::new("Delete", "Trash2"),
                ])
                .selectable(),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.service.get_all().await {
            Ok(bills) => self.bills = bills,
            Err(err) => {
                warn!(error = %err, "failed to load bills");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Patient name, bill number or status contains-match.
    pub fn filtered(&self) -> Vec<Bill> {
        if self.search_query.is_empty() {
            return self.bills.clone();
        }
        let query = self.search_query.to_lowercase();
        self.bills
            .iter()
            .filter(|bill| {
                bill.patient_name.to_lowercase().contains(&query)
                    || bill.id.to_string().contains(&query)
                    || bill.status.to_string().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.filtered())
    }

    pub fn bill_count(&self) -> usize {
        self.bills.len()
    }

    /// Sum of totals over paid bills.
    pub fn total_revenue(&self) -> f64 {
        self.sum_where(BillStatus::Paid)
    }

    /// Sum of totals over pending bills.
    pub fn pending_amount(&self) -> f64 {
        self.sum_where(BillStatus::Pending)
    }

    /// Sum of totals over overdue bills.
    pub fn overdue_amount(&self) -> f64 {
        self.sum_where(BillStatus::Overdue)
    }

    fn sum_where(&self, status: BillStatus) -> f64 {
        self.bills
            .iter()
            .filter(|bill| bill.status == status)
            .map(|bill| bill.total)
            .sum()
    }

    /// Move a bill to a new status and patch the local copy; marking paid
    /// also stamps the payment date, mirroring what the service stores.
    pub async fn update_status(&mut self, id: u32, status: BillStatus) -> Result<Bill> {
        let updated = self.service.update_status(id, status).await?;
        if let Some(local) = self.bills.iter_mut().find(|b| b.id == id) {
            local.status = updated.status;
            local.paid_at = updated.paid_at;
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: u32) -> Result<Bill> {
        let bill = self.service.delete(id).await?;
        self.bills.retain(|b| b.id != id);
        Ok(bill)
    }

    /// Simulated download; there is no real document store behind this.
    pub fn download(bill: &Bill) -> String {
        format!("Downloading bill #{} for {}", bill.id, bill.patient_name)
    }

    /// Simulated delivery to the patient.
    pub fn send(bill: &Bill) -> String {
        format!("Bill sent to patient {}", bill.patient_name)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        format!(
            "Billing  (revenue ${:.2}, pending ${:.2}, overdue ${:.2})\n\n{}",
            self.total_revenue(),
            self.pending_amount(),
            self.overdue_amount(),
            self.table.render(&self.rows(), self.loading)
        )
    }
}

fn columns() -> Vec<Column> {
    vec![
        Column::new("Id", "Bill #").sortable().render(|value, _| {
            format!("#{:04}", value.as_u64().unwrap_or_default())
        }),
        Column::new("patientName", "Patient").sortable(),
        Column::new("createdAt", "Date").sortable().kind(CellKind::Date),
        Column::new("items", "Services").render(|value, _| {
            let items = value.as_array().cloned().unwrap_or_default();
            let first = items
                .first()
                .and_then(|item| item.get("description"))
                .and_then(Value::as_str)
                .unwrap_or("-");
            let plural = if items.len() == 1 { "item" } else { "items" };
            format!("{} {plural}: {first}", items.len())
        }),
        Column::new("total", "Total").sortable().kind(CellKind::Currency),
        Column::new("dueDate", "Due").sortable().kind(CellKind::Date),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}
