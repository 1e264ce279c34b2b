use tracing::debug;

use crate::clock::Clock;
use crate::error::Result;
use crate::latency::LatencyProfile;
use crate::models::{Feedback, FeedbackStats, FeedbackStatus, FeedbackUpdate, NewFeedback};
use crate::store::Store;

pub struct FeedbackService {
    store: Store<Feedback>,
    latency: LatencyProfile,
    clock: Clock,
}

impl FeedbackService {
    pub fn new(store: Store<Feedback>, latency: LatencyProfile, clock: Clock) -> Self {
        Self {
            store,
            latency,
            clock,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<Feedback>> {
        self.latency.list.wait().await;
        Ok(self.store.all().await)
    }

    pub async fn get_by_id(&self, id: u32) -> Result<Feedback> {
        self.latency.fetch.wait().await;
        self.store.get(id).await
    }

    pub async fn create(&self, new: NewFeedback) -> Result<Feedback> {
        self.latency.create.wait().await;
        let today = self.clock.today();
        let feedback = self
            .store
            .insert(|id| Feedback {
                id,
                patient_id: new.patient_id,
                doctor_id: new.doctor_id,
                patient_name: new.patient_name,
                doctor_name: new.doctor_name,
                rating: new.rating,
                comments: new.comments,
                service_type: new.service_type,
                submitted_date: today,
                status: FeedbackStatus::Pending,
            })
            .await;
        debug!(id = feedback.id, "feedback submitted");
        Ok(feedback)
    }

    pub async fn update(&self, id: u32, update: FeedbackUpdate) -> Result<Feedback> {
        self.latency.update.wait().await;
        self.store
            .modify(id, |feedback| {
                if let Some(rating) = update.rating {
                    feedback.rating = rating;
                }
                if let Some(comments) = update.comments {
                    feedback.comments = comments;
                }
                if let Some(service_type) = update.service_type {
                    feedback.service_type = service_type;
                }
                if let Some(status) = update.status {
                    feedback.status = status;
                }
            })
            .await
    }

    pub async fn delete(&self, id: u32) -> Result<Feedback> {
        self.latency.delete.wait().await;
        let feedback = self.store.remove(id).await?;
        debug!(id, "feedback deleted");
        Ok(feedback)
    }

    pub async fn get_by_doctor(&self, doctor_id: u32) -> Result<Vec<Feedback>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|f| f.doctor_id == doctor_id).await)
    }

    pub async fn get_by_patient(&self, patient_id: u32) -> Result<Vec<Feedback>> {
        self.latency.query.wait().await;
        Ok(self.store.matching(|f| f.patient_id == patient_id).await)
    }

    pub async fn approve(&self, id: u32) -> Result<Feedback> {
        self.latency.query.wait().await;
        self.update(
            id,
            FeedbackUpdate {
                status: Some(FeedbackStatus::Approved),
                ..FeedbackUpdate::default()
            },
        )
        .await
    }

    pub async fn reject(&self, id: u32) -> Result<Feedback> {
        self.latency.query.wait().await;
        self.update(
            id,
            FeedbackUpdate {
                status: Some(FeedbackStatus::Rejected),
                ..FeedbackUpdate::default()
            },
        )
        .await
    }

    /// Aggregate counts plus the mean rating over approved feedback, rounded
    /// to one decimal. Computed on demand from the live collection.
    pub async fn get_stats(&self) -> Result<FeedbackStats> {
        self.latency.query.wait().await;
        let all = self.store.all().await;
        let approved: Vec<&Feedback> = all
            .iter()
            .filter(|f| f.status == FeedbackStatus::Approved)
            .collect();
        let average_rating = if approved.is_empty() {
            0.0
        } else {
            let sum: u32 = approved.iter().map(|f| u32::from(f.rating)).sum();
            (f64::from(sum) / approved.len() as f64 * 10.0).round() / 10.0
        };

        Ok(FeedbackStats {
            total: all.len(),
            approved: approved.len(),
            pending: all
                .iter()
                .filter(|f| f.status == FeedbackStatus::Pending)
                .count(),
            rejected: all
                .iter()
                .filter(|f| f.status == FeedbackStatus::Rejected)
                .count(),
            average_rating,
        })
    }
}
