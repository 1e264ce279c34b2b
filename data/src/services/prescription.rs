use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::latency::LatencyProfile;
use crate::models::{NewPrescription, Prescription, PrescriptionStatus, PrescriptionUpdate};
use crate::store::Store;

pub struct PrescriptionService {
    store: Store<Prescription>,
    latency: LatencyProfile,
    clock: Clock,
}

impl PrescriptionService {
    pub fn new(store: Store<Prescription>, latency: LatencyProfile, clock: Clock) -> Self {
        Self {
            store,
            latency,
            clock,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Prescription>> {
        self.latency.list.wait().await;
        Ok(self.store.all().await)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Prescription> {
        self.latency.fetch.wait().await;
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewPrescription) -> Result<Prescription> {
        self.latency.create.wait().await;
        let today = self.clock.today();
        let prescription = self
            .store
            .insert(|id| Prescription {
                id,
                patient_id: new.patient_id,
                doctor_id: new.doctor_id,
                appointment_id: new.appointment_id,
                patient_name: new.patient_name,
                doctor_name: new.doctor_name,
                medicines: new.medicines,
                created_at: today,
                status: PrescriptionStatus::Active,
            })
            .await;
        debug!(id = prescription.id, "prescription created");
        Ok(prescription)
    }

    pub async fn update(&self, id: u32, update: PrescriptionUpdate) -> Result<Prescription> {
        self.latency.update.wait().await;
        self.store
            .modify(id, |prescription| {
                if let Some(patient_id) = update.patient_id {
                    prescription.patient_id = patient_id;
                }
                if let Some(doctor_id) = update.doctor_id {
                    prescription.doctor_id = doctor_id;
                }
                if let Some(appointment_id) = update.appointment_id {
                    prescription.appointment_id = Some(appointment_id);
                }
                if let Some(patient_name) = update.patient_name {
                    prescription.patient_name = patient_name;
                }
                if let Some(doctor_name) = update.doctor_name {
                    prescription.doctor_name = doctor_name;
                }
                if let Some(medicines) = update.medicines {
                    prescription.medicines = medicines;
                }
                if let Some(status) = update.status {
                    prescription.status = status;
                }
            })
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<Prescription> {
        self.latency.delete.wait().await;
        let prescription = self.store.remove(id).await?;
        debug!(id, "prescription deleted");
        Ok(prescription)
    }

    pub async fn get_by_patient(&self, patient_id: u32) -> Result<Vec<Prescription>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|p| p.patient_id == patient_id).await)
    }

    pub async fn get_by_doctor(&self, doctor_id: u32) -> Result<Vec<Prescription>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|p| p.doctor_id == doctor_id).await)
    }

    pub async fn get_by_appointment(&self, appointment_id: u32) -> Result<Vec<Prescription>> {
        self.latency.query.wait().await;
        Ok(self
            .store
            .matching(|p| p.appointment_id == Some(appointment_id))
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Medicine;
    use chrono::NaiveDate;

    fn medicine(name: &str) -> Medicine {
        Medicine {
            name: name.to_string(),
            dosage: "500mg".to_string(),
            frequency: "2x daily".to_string(),
            duration: "7 days".to_string(),
            instructions: "Take with food".to_string(),
        }
    }

    fn service() -> PrescriptionService {
        PrescriptionService::new(
            Store::empty(),
            LatencyProfile::instant(),
            Clock::Fixed(NaiveDate::from_ymd_opt(2025, 7, 20).unwrap()),
        )
    }

    #[tokio::test]
    async fn create_stamps_creation_date_and_starts_active() {
        let service = service();
        let created = service
            .create(NewPrescription {
                patient_id: 1,
                doctor_id: 2,
                appointment_id: Some(7),
                patient_name: "John Smith".to_string(),
                doctor_name: "Dr. Michael Wilson".to_string(),
                medicines: vec![medicine("Amoxicillin")],
            })
            .await
            .unwrap();

        assert_eq!(created.created_at, NaiveDate::from_ymd_opt(2025, 7, 20).unwrap());
        assert_eq!(created.status, PrescriptionStatus::Active);
    }

    #[tokio::test]
    async fn queries_filter_by_linked_ids() {
        let service = service();
        service
            .create(NewPrescription {
                patient_id: 1,
                doctor_id: 2,
                appointment_id: Some(7),
                patient_name: "John Smith".to_string(),
                doctor_name: "Dr. Michael Wilson".to_string(),
                medicines: vec![medicine("Amoxicillin")],
            })
            .await
            .unwrap();
        service
            .create(NewPrescription {
                patient_id: 3,
                doctor_id: 2,
                appointment_id: None,
                patient_name: "Emily Davis".to_string(),
                doctor_name: "Dr. Michael Wilson".to_string(),
                medicines: vec![medicine("Ibuprofen")],
            })
            .await
            .unwrap();

        assert_eq!(service.get_by_patient(1).await.unwrap().len(), 1);
        assert_eq!(service.get_by_doctor(2).await.unwrap().len(), 2);
        assert_eq!(service.get_by_appointment(7).await.unwrap().len(), 1);
        assert_eq!(service.get_by_appointment(8).await.unwrap().len(), 0);
    }
}
