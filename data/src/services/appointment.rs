use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::latency::LatencyProfile;
use crate::models::{Appointment, AppointmentStatus, AppointmentUpdate, NewAppointment};
use crate::store::Store;

pub struct AppointmentService {
    store: Store<Appointment>,
    latency: LatencyProfile,
}

impl AppointmentService {
    pub fn new(store: Store<Appointment>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> Result<Vec<Appointment>> {
        self.latency.list.wait().await;
        Ok(self.store.all().await)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Appointment> {
        self.latency.fetch.wait().await;
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewAppointment) -> Result<Appointment> {
        self.latency.create.wait().await;
        let appointment = self
            .store
            .insert(|id| Appointment {
                id,
                patient_id: new.patient_id,
                doctor_id: new.doctor_id,
                patient_name: new.patient_name,
                doctor_name: new.doctor_name,
                date: new.date,
                time: new.time,
                kind: new.kind,
                duration: new.duration,
                notes: new.notes,
                status: AppointmentStatus::Scheduled,
            })
            .await;
        debug!(id = appointment.id, "appointment created");
        Ok(appointment)
    }

    pub async fn update(&self, id: u32, update: AppointmentUpdate) -> Result<Appointment> {
        self.latency.update.wait().await;
        self.store
            .modify(id, |appointment| {
                if let Some(patient_id) = update.patient_id {
                    appointment.patient_id = patient_id;
                }
                if let Some(doctor_id) = update.doctor_id {
                    appointment.doctor_id = doctor_id;
                }
                if let Some(patient_name) = update.patient_name {
                    appointment.patient_name = patient_name;
                }
                if let Some(doctor_name) = update.doctor_name {
                    appointment.doctor_name = doctor_name;
                }
                if let Some(date) = update.date {
                    appointment.date = date;
                }
                if let Some(time) = update.time {
                    appointment.time = time;
                }
                if let Some(kind) = update.kind {
                    appointment.kind = kind;
                }
                if let Some(duration) = update.duration {
                    appointment.duration = duration;
                }
                if let Some(notes) = update.notes {
                    appointment.notes = Some(notes);
                }
                if let Some(status) = update.status {
                    appointment.status = status;
                }
            })
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<Appointment> {
        self.latency.delete.wait().await;
        let appointment = self.store.remove(id).await?;
        debug!(id, "appointment deleted");
        Ok(appointment)
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|a| a.date == date).await)
    }

    pub async fn get_by_patient(&self, patient_id: u32) -> Result<Vec<Appointment>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|a| a.patient_id == patient_id).await)
    }

    pub async fn get_by_doctor(&self, doctor_id: u32) -> Result<Vec<Appointment>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|a| a.doctor_id == doctor_id).await)
    }

    /// Set the lifecycle stage. Any value is accepted — there is no enforced
    /// transition graph.
    pub async fn update_status(&self, id: u32, status: AppointmentStatus) -> Result<Appointment> {
        self.update(
            id,
            AppointmentUpdate {
                status: Some(status),
                ..AppointmentUpdate::default()
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: u32, date: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            patient_id: 1,
            doctor_id: 2,
            patient_name: "John Smith".to_string(),
            doctor_name: "Dr. Sarah Johnson".to_string(),
            date: date.parse().unwrap(),
            time: "10:00".to_string(),
            kind: "Consultation".to_string(),
            duration: 30,
            notes: None,
            status,
        }
    }

    fn service(appointments: Vec<Appointment>) -> AppointmentService {
        AppointmentService::new(Store::new(appointments), LatencyProfile::instant())
    }

    #[tokio::test]
    async fn create_starts_scheduled() {
        let service = service(Vec::new());
        let created = service
            .create(NewAppointment {
                patient_id: 1,
                doctor_id: 2,
                patient_name: "John Smith".to_string(),
                doctor_name: "Dr. Sarah Johnson".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
                time: "09:30".to_string(),
                kind: "Checkup".to_string(),
                duration: 20,
                notes: None,
            })
            .await
            .unwrap();
        assert_eq!(created.status, AppointmentStatus::Scheduled);
    }

    #[tokio::test]
    async fn any_status_transition_is_accepted() {
        let service = service(vec![appointment(1, "2025-08-04", AppointmentStatus::Completed)]);

        // Backwards jump: completed straight back to scheduled.
        let updated = service
            .update_status(1, AppointmentStatus::Scheduled)
            .await
            .unwrap();
        assert_eq!(updated.status, AppointmentStatus::Scheduled);
        assert_eq!(updated.id, 1);
    }

    #[tokio::test]
    async fn get_by_date_filters_exact_day() {
        let service = service(vec![
            appointment(1, "2025-08-04", AppointmentStatus::Scheduled),
            appointment(2, "2025-08-05", AppointmentStatus::Scheduled),
        ]);

        let day = service
            .get_by_date(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap())
            .await
            .unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].id, 1);
    }
}
