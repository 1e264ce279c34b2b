use serde_json::Value;
use tracing::warn;

use mediflow_data::models::{Appointment, BillStatus};
use mediflow_data::Result;

use super::{error_state, to_rows};
use crate::state::AppState;
use crate::table::{CellKind, Column, DataTable};

/// The four headline numbers at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub doctors: usize,
    pub patients: usize,
    pub today_appointments: usize,
    pub pending_bills: usize,
}

/// Load all four statistics with one joint await: the four fetches run
/// concurrently, racing only against each other's simulated delay.
pub async fn load_stats(state: &AppState) -> Result<DashboardStats> {
    let (doctors, patients, appointments, bills) = tokio::try_join!(
        state.doctors.get_all(),
        state.patients.get_all(),
        state.appointments.get_all(),
        state.bills.get_all(),
    )?;

    let today = state.clock.today();
    Ok(DashboardStats {
        doctors: doctors.len(),
        patients: patients.len(),
        today_appointments: appointments.iter().filter(|a| a.date == today).count(),
        pending_bills: bills
            .iter()
            .filter(|b| b.status == BillStatus::Pending)
            .count(),
    })
}

pub struct DashboardPage {
    state: AppState,
    pub stats: Option<DashboardStats>,
    schedule: Vec<Appointment>,
    pub loading: bool,
    pub error: Option<String>,
    pub table: DataTable,
}

impl DashboardPage {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            stats: None,
            schedule: Vec::new(),
            loading: false,
            error: None,
            table: DataTable::new(schedule_columns()),
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        let today = self.state.clock.today();
        match tokio::try_join!(load_stats(&self.state), self.state.appointments.get_by_date(today))
        {
            Ok((stats, schedule)) => {
                self.stats = Some(stats);
                self.schedule = schedule;
            }
            Err(err) => {
                warn!(error = %err, "failed to load dashboard");
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn rows(&self) -> Vec<Value> {
        to_rows(&self.schedule)
    }

    pub fn render(&self) -> String {
        if let Some(error) = &self.error {
            return error_state(error);
        }
        let stats = self.stats.map_or_else(
            || "loading...".to_string(),
            |stats| {
                format!(
                    "Active Doctors: {}   Total Patients: {}   Today's Appointments: {}   Pending Bills: {}",
                    stats.doctors, stats.patients, stats.today_appointments, stats.pending_bills
                )
            },
        );
        format!(
            "Dashboard\n{stats}\n\nToday's schedule\n{}",
            self.table.render(&self.rows(), self.loading)
        )
    }
}

fn schedule_columns() -> Vec<Column> {
    vec![
        Column::new("time", "Time").sortable(),
        Column::new("patientName", "Patient"),
        Column::new("doctorName", "Doctor"),
        Column::new("type", "Type"),
        Column::new("status", "Status").kind(CellKind::Status),
    ]
}
