use tracing::debug;

use crate::error::Result;
use crate::latency::LatencyProfile;
use crate::models::{NewPatient, Patient, PatientStatus, PatientUpdate};
use crate::store::Store;

pub struct PatientService {
    store: Store<Patient>,
    latency: LatencyProfile,
}

impl PatientService {
    pub fn new(store: Store<Patient>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> Result<Vec<Patient>> {
        self.latency.list.wait().await;
        Ok(self.store.all().await)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Patient> {
        self.latency.fetch.wait().await;
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewPatient) -> Result<Patient> {
        self.latency.create.wait().await;
        let patient = self
            .store
            .insert(|id| Patient {
                id,
                name: new.name,
                email: new.email,
                phone: new.phone,
                date_of_birth: new.date_of_birth,
                gender: new.gender,
                blood_type: new.blood_type,
                last_visit: None,
                medical_history: new.medical_history,
                status: PatientStatus::Active,
            })
            .await;
        debug!(id = patient.id, "patient created");
        Ok(patient)
    }

    pub async fn update(&self, id: u32, update: PatientUpdate) -> Result<Patient> {
        self.latency.update.wait().await;
        self.store
            .modify(id, |patient| {
                if let Some(name) = update.name {
                    patient.name = name;
                }
                if let Some(email) = update.email {
                    patient.email = email;
                }
                if let Some(phone) = update.phone {
                    patient.phone = phone;
                }
                if let Some(date_of_birth) = update.date_of_birth {
                    patient.date_of_birth = date_of_birth;
                }
                if let Some(gender) = update.gender {
                    patient.gender = gender;
                }
                if let Some(blood_type) = update.blood_type {
                    patient.blood_type = Some(blood_type);
                }
                if let Some(last_visit) = update.last_visit {
                    patient.last_visit = Some(last_visit);
                }
                if let Some(medical_history) = update.medical_history {
                    patient.medical_history = medical_history;
                }
                if let Some(status) = update.status {
                    patient.status = status;
                }
            })
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<Patient> {
        self.latency.delete.wait().await;
        let patient = self.store.remove(id).await?;
        debug!(id, "patient deleted");
        Ok(patient)
    }

    /// Case-insensitive contains-match over name and email, plus a literal
    /// match over the phone number. An empty query returns everything.
    pub async fn search(&self, query: &str) -> Result<Vec<Patient>> {
        self.latency.query.wait().await;
        if query.is_empty() {
            return Ok(self.store.all().await);
        }
        let lowered = query.to_lowercase();
        Ok(self
            .store
            .matching(|patient| {
                patient.name.to_lowercase().contains(&lowered)
                    || patient.email.to_lowercase().contains(&lowered)
                    || patient.phone.contains(query)
            })
            .await)
    }
}
