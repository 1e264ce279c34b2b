use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::latency::LatencyProfile;
use crate::models::{Doctor, DoctorStatus, DoctorUpdate, NewDoctor, RatingSummary};
use crate::store::Store;

pub struct DoctorService {
    store: Store<Doctor>,
    latency: LatencyProfile,
}

impl DoctorService {
    pub fn new(store: Store<Doctor>, latency: LatencyProfile) -> Self {
        Self { store, latency }
    }

    pub async fn get_all(&self) -> Result<Vec<Doctor>> {
        self.latency.list.wait().await;
        Ok(self.store.all().await)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Doctor> {
        self.latency.fetch.wait().await;
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewDoctor) -> Result<Doctor> {
        self.latency.create.wait().await;
        let doctor = self
            .store
            .insert(|id| Doctor {
                id,
                name: new.name,
                specialization: new.specialization,
                email: new.email,
                phone: new.phone,
                patient_count: 0,
                years_experience: new.years_experience,
                rating: 0.0,
                review_count: 0,
                status: DoctorStatus::Active,
            })
            .await;
        debug!(id = doctor.id, "doctor created");
        Ok(doctor)
    }

    pub async fn update(&self, id: u32, update: DoctorUpdate) -> Result<Doctor> {
        self.latency.update.wait().await;
        self.store
            .modify(id, |doctor| {
                if let Some(name) = update.name {
                    doctor.name = name;
                }
                if let Some(specialization) = update.specialization {
                    doctor.specialization = specialization;
                }
                if let Some(email) = update.email {
                    doctor.email = email;
                }
                if let Some(phone) = update.phone {
                    doctor.phone = phone;
                }
                if let Some(patient_count) = update.patient_count {
                    doctor.patient_count = patient_count;
                }
                if let Some(years_experience) = update.years_experience {
                    doctor.years_experience = years_experience;
                }
                if let Some(rating) = update.rating {
                    doctor.rating = rating;
                }
                if let Some(review_count) = update.review_count {
                    doctor.review_count = review_count;
                }
                if let Some(status) = update.status {
                    doctor.status = status;
                }
            })
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<Doctor> {
        self.latency.delete.wait().await;
        let doctor = self.store.remove(id).await?;
        debug!(id, "doctor deleted");
        Ok(doctor)
    }

    /// Doctors free at the given slot. The slot is accepted but not yet
    /// consulted: availability is simply "active", the same answer the mock
    /// backend gives.
    pub async fn get_available(&self, _date: NaiveDate, _time: &str) -> Result<Vec<Doctor>> {
        self.latency.query.wait().await;
        Ok(self
            .store
            .matching(|doctor| doctor.status == DoctorStatus::Active)
            .await)
    }

    pub async fn get_ratings(&self, id: u32) -> Result<RatingSummary> {
        self.latency.query.wait().await;
        let doctor = self.store.get(id).await?;
        Ok(RatingSummary {
            average_rating: doctor.rating,
            total_reviews: doctor.review_count,
        })
    }

    /// Overwrite the stored rating aggregate. This is the only path that
    /// mutates `rating`.
    pub async fn update_rating(&self, id: u32, rating: f64, review_count: u32) -> Result<Doctor> {
        self.latency.query.wait().await;
        self.store
            .modify(id, |doctor| {
                doctor.rating = rating;
                doctor.review_count = review_count;
            })
            .await
    }
}
